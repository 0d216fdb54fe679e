//! Error types for the command shell.

use layerkv_core::StoreError;
use std::io;
use thiserror::Error;

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors that can occur while running shell commands.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A line could not be parsed as a command.
    #[error("parse error: {message}")]
    Parse {
        /// Description of the problem.
        message: String,
    },

    /// The store rejected the command.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A script stopped at a failing line.
    #[error("line {line}: {source}")]
    Script {
        /// One-based line number.
        line: usize,
        /// The underlying failure.
        source: Box<ShellError>,
    },
}

impl ShellError {
    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
