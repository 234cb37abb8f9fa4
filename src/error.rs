//! Error types for gnupipe.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

/// Result type alias for gnupipe operations.
pub type Result<T> = std::result::Result<T, GnupipeError>;

/// Errors that can occur while driving a gnuplot process.
#[derive(Debug, Error)]
pub enum GnupipeError {
    /// The plotting program could not be launched.
    #[error("Failed to launch plotting program: {program}")]
    Spawn {
        /// Program that was launched.
        program: String,
        /// Underlying launch error.
        #[source]
        source: std::io::Error,
    },

    /// Data columns passed to one plot call differ in length.
    #[error("Column {column} has {found} values, expected {expected}")]
    LengthMismatch {
        /// Length of the first column.
        expected: usize,
        /// Length of the offending column.
        found: usize,
        /// Zero-based index of the offending column.
        column: usize,
    },

    /// A plot call got the wrong number of data columns.
    #[error("{kind} needs {needed} data columns, got {given}")]
    MissingData {
        /// Plot keyword the columns were given to.
        kind: &'static str,
        /// Accepted column counts, e.g. "1 or 2".
        needed: &'static str,
        /// Number of columns actually given.
        given: usize,
    },

    /// The figure was already closed.
    #[error("Figure is closed")]
    Closed,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GnupipeError {
    /// Create a Spawn error.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a LengthMismatch error.
    pub fn length_mismatch(expected: usize, found: usize, column: usize) -> Self {
        Self::LengthMismatch {
            expected,
            found,
            column,
        }
    }
}
