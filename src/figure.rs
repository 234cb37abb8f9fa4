//! Figures: one plotting session per gnuplot process.
//!
//! A [`Figure`] records commands in issue order and sends them to its process
//! on [`Figure::show`]. Dropping the figure quits the process.

use crate::command::{self, PlotCall, PlotKind, PlotSource, REPLOT};
use crate::config::FigureConfig;
use crate::data::DataBlock;
use crate::error::{GnupipeError, Result};
use crate::process::GnuplotProcess;
use std::io::BufRead;

/// Prefix of the names of inline data blocks.
const BLOCK_PREFIX: &str = "gnupipe_data_";

/// One plotting session bound to one gnuplot process.
#[derive(Debug)]
pub struct Figure {
    config: FigureConfig,
    process: Option<GnuplotProcess>,
    history: Vec<String>,
    sent: usize,
    plotted: bool,
    blocks: usize,
}

impl Figure {
    /// Start a figure with the default configuration (see [`FigureConfig::from_env`]).
    pub fn new() -> Result<Self> {
        Self::with_config(FigureConfig::from_env())
    }

    /// Start a figure with the given configuration.
    pub fn with_config(config: FigureConfig) -> Result<Self> {
        let process = GnuplotProcess::spawn(&config)?;
        Ok(Self {
            config,
            process: Some(process),
            history: Vec::new(),
            sent: 0,
            plotted: false,
            blocks: 0,
        })
    }

    /// Run `f` with a new figure and close the figure afterwards.
    ///
    /// The figure is closed even when `f` fails; the error of `f` takes
    /// precedence over an error from closing.
    pub fn scoped<T, E, F>(config: FigureConfig, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Figure) -> std::result::Result<T, E>,
        E: From<GnupipeError>,
    {
        let mut figure = Self::with_config(config)?;
        let outcome = f(&mut figure);
        let closed = figure.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    /// Send `set <setting>`, e.g. `fig.set("xlabel 'x'")`.
    pub fn set(&mut self, setting: &str) -> Result<()> {
        self.record(command::set_command(setting))
    }

    /// Send `unset <setting>`, e.g. `fig.unset("key")`.
    pub fn unset(&mut self, setting: &str) -> Result<()> {
        self.record(command::unset_command(setting))
    }

    /// Send a raw command.
    pub fn command(&mut self, command: &str) -> Result<()> {
        self.record(command.to_string())
    }

    /// Draw a 2D plot.
    pub fn plot(&mut self, call: PlotCall) -> Result<()> {
        self.draw(PlotKind::Plot, call)
    }

    /// Draw a 3D plot or surface.
    pub fn splot(&mut self, call: PlotCall) -> Result<()> {
        self.draw(PlotKind::Splot, call)
    }

    fn draw(&mut self, kind: PlotKind, call: PlotCall) -> Result<()> {
        self.ensure_open()?;

        let keyword = if self.config.replot && self.plotted {
            REPLOT
        } else {
            kind.keyword()
        };

        let line = match call.source() {
            PlotSource::Expression(expr) => call.render(keyword, expr),
            PlotSource::Data(columns) => {
                kind.check_columns(columns.len())?;
                let name = format!("{}{}", BLOCK_PREFIX, self.blocks + 1);
                let block = DataBlock::new(name, columns.clone())?;
                self.blocks += 1;

                tracing::debug!(
                    "Inlining {} rows x {} columns as {}",
                    block.rows(),
                    block.width(),
                    block.reference()
                );
                for data_line in block.lines() {
                    self.history.push(data_line);
                }
                call.render(keyword, &block.reference())
            },
        };

        self.record(line)?;
        self.plotted = true;
        Ok(())
    }

    fn record(&mut self, line: String) -> Result<()> {
        self.ensure_open()?;
        if self.config.verbose {
            tracing::info!("gnuplot> {}", line);
        } else {
            tracing::debug!("gnuplot> {}", line);
        }
        self.history.push(line);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.process.is_some() {
            Ok(())
        } else {
            Err(GnupipeError::Closed)
        }
    }

    /// Write commands to the process without pausing.
    ///
    /// With replot enabled the whole history is replayed; otherwise only the
    /// commands issued since the last send are written.
    pub fn send(&mut self) -> Result<()> {
        let start = if self.config.replot { 0 } else { self.sent };
        let process = self.process.as_mut().ok_or(GnupipeError::Closed)?;

        for line in &self.history[start..] {
            process.write_line(line)?;
        }
        process.flush()?;

        tracing::debug!(
            "Sent {} commands to pid {}",
            self.history.len() - start,
            process.id()
        );
        self.sent = self.history.len();
        Ok(())
    }

    /// Show the figure, then wait for enter if the figure is interactive.
    pub fn show(&mut self) -> Result<()> {
        self.send()?;
        if self.config.interactive {
            wait_for_enter(&mut std::io::stdin().lock())?;
        }
        Ok(())
    }

    /// Quit the process. Closing an already closed figure does nothing.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut process) = self.process.take() {
            let status = process.quit()?;
            tracing::debug!("Figure closed ({})", status);
        }
        Ok(())
    }

    /// Check whether the figure has been closed.
    pub fn is_closed(&self) -> bool {
        self.process.is_none()
    }

    /// Process id, while the figure is open.
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(GnuplotProcess::id)
    }

    /// Every command issued so far, in order, including inline data lines.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Commands issued since the last send.
    pub fn pending(&self) -> &[String] {
        &self.history[self.sent..]
    }

    /// Current configuration.
    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Enable or disable replot mode.
    pub fn set_replot(&mut self, replot: bool) {
        self.config.replot = replot;
    }

    /// Enable or disable the pause in [`Figure::show`].
    pub fn set_interactive(&mut self, interactive: bool) {
        self.config.interactive = interactive;
    }

    /// Enable or disable verbose command logging.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::error!("Error closing figure: {}", e);
        }
    }
}

/// Show several figures at once, then wait for enter once if `interactive`.
pub fn show_all(figures: &mut [&mut Figure], interactive: bool) -> Result<()> {
    for figure in figures.iter_mut() {
        figure.send()?;
    }
    if interactive {
        wait_for_enter(&mut std::io::stdin().lock())?;
    }
    Ok(())
}

/// Block until a line (or end of input) is read.
pub fn wait_for_enter<R: BufRead>(reader: &mut R) -> Result<()> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(())
}
