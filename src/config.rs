//! Figure configuration.

use std::ffi::OsString;

/// Environment variable that overrides the plotting program.
pub const PROGRAM_ENV: &str = "GNUPIPE_PROGRAM";

/// Program launched when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "gnuplot";

/// Settings for one figure and its plotting process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureConfig {
    /// Executable to launch.
    pub program: OsString,
    /// Extra arguments passed to the executable.
    pub args: Vec<OsString>,
    /// Log every command at `info` level instead of `debug`.
    pub verbose: bool,
    /// Later plot calls draw into the same figure.
    pub replot: bool,
    /// `show` waits for the user to press enter.
    pub interactive: bool,
}

impl FigureConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            args: Vec::new(),
            verbose: false,
            replot: false,
            interactive: true,
        }
    }

    /// Default configuration with the program taken from `GNUPIPE_PROGRAM` if set.
    pub fn from_env() -> Self {
        let config = Self::new();
        match std::env::var_os(PROGRAM_ENV) {
            Some(program) if !program.is_empty() => {
                tracing::debug!("Using plotting program from {}: {:?}", PROGRAM_ENV, program);
                config.with_program(program)
            },
            _ => config,
        }
    }

    /// Set the program to launch.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Append an argument for the program.
    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set verbose command logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set replot mode.
    pub fn with_replot(mut self, replot: bool) -> Self {
        self.replot = replot;
        self
    }

    /// Set interactive mode.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Program name for messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self::new()
    }
}
