//! Gnupipe - drive gnuplot from Rust.
//!
//! Gnupipe launches one gnuplot process per figure, sends it commands in
//! gnuplot's own syntax, and streams in-memory numbers to it as inline data
//! blocks, so no temporary files are written. Rendering is left entirely to
//! gnuplot.
//!
//! # Example
//!
//! ```no_run
//! use gnupipe::{Figure, FigureConfig, PlotCall};
//!
//! let config = FigureConfig::new().with_replot(true);
//! Figure::scoped(config, |fig| {
//!     fig.set("grid")?;
//!     fig.plot(PlotCall::expression("sin(x)").opt("dashtype", 0))?;
//!     fig.plot(PlotCall::xy(vec![0.0, 1.0], vec![0.0, 0.5]).with("lines"))?;
//!     fig.show()
//! })?;
//! # Ok::<(), gnupipe::GnupipeError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod process;

pub use command::{PlotCall, PlotKind, PlotSource};
pub use config::FigureConfig;
pub use data::{Column, DataBlock, Numeric};
pub use error::{GnupipeError, Result};
pub use figure::{show_all, wait_for_enter, Figure};
pub use process::GnuplotProcess;
