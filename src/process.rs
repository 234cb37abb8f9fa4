//! The external plotting process.

use crate::config::FigureConfig;
use crate::error::{GnupipeError, Result};
use std::io::{BufWriter, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Command that asks gnuplot to exit.
pub const QUIT: &str = "q";

/// How long a process may take to exit after `q` before it is killed.
pub const QUIT_GRACE: Duration = Duration::from_millis(500);

/// Interval between exit checks during the grace period.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A running plotting program with a pipe to its standard input.
#[derive(Debug)]
pub struct GnuplotProcess {
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
}

impl GnuplotProcess {
    /// Launch the configured program.
    pub fn spawn(config: &FigureConfig) -> Result<Self> {
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| GnupipeError::spawn(config.program_name(), e))?;

        let stdin = child.stdin.take().map(BufWriter::new);
        tracing::debug!("Started {} (pid {})", config.program_name(), child.id());

        Ok(Self { child, stdin })
    }

    /// Process id.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Check whether the input pipe is still open.
    pub fn is_open(&self) -> bool {
        self.stdin.is_some()
    }

    /// Write one command line.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or(GnupipeError::Closed)?;
        stdin.write_all(line.as_bytes())?;
        stdin.write_all(b"\n")?;
        Ok(())
    }

    /// Push buffered commands to the process.
    pub fn flush(&mut self) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or(GnupipeError::Closed)?;
        stdin.flush()?;
        Ok(())
    }

    /// Exit status if the process has already exited.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Ask the process to quit, close its input and terminate it.
    ///
    /// gnuplot windows may outlive a killed process, so the `q` command is sent
    /// first. A process still running after [`QUIT_GRACE`], or whose pipe is
    /// already broken, is killed.
    pub fn quit(&mut self) -> Result<ExitStatus> {
        if let Some(mut stdin) = self.stdin.take() {
            let sent = send_quit(&mut stdin);
            drop(stdin);

            if let Err(e) = sent {
                tracing::warn!("Could not send quit to pid {}: {}", self.child.id(), e);
                return self.kill();
            }
        }

        let deadline = Instant::now() + QUIT_GRACE;
        while Instant::now() < deadline {
            if let Some(status) = self.child.try_wait()? {
                tracing::debug!("Process {} exited with {}", self.child.id(), status);
                return Ok(status);
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        tracing::debug!("Process {} still running after quit, killing it", self.child.id());
        self.kill()
    }

    /// Kill the process and reap it.
    pub fn kill(&mut self) -> Result<ExitStatus> {
        self.stdin = None;
        if let Some(status) = self.child.try_wait()? {
            return Ok(status);
        }
        self.child.kill()?;
        Ok(self.child.wait()?)
    }
}

fn send_quit(stdin: &mut BufWriter<ChildStdin>) -> std::io::Result<()> {
    stdin.write_all(QUIT.as_bytes())?;
    stdin.write_all(b"\n")?;
    stdin.flush()
}

impl Drop for GnuplotProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            if let Err(e) = self.kill() {
                tracing::error!("Failed to terminate pid {}: {}", self.child.id(), e);
            }
        }
    }
}
