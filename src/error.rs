//! Error types for sasskit

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SassError {
    /// The input file of a file compile does not exist or cannot be read.
    /// Raised before any compilation context is built.
    #[error("File {} could not be found", path.display())]
    FileNotFound { path: PathBuf },

    /// libsass reported a non-zero status. The message is libsass' own,
    /// untouched (it already carries file, line and column).
    #[error("{message}")]
    Compilation { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

pub type Result<T> = std::result::Result<T, SassError>;

impl SassError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn compilation(message: impl Into<String>) -> Self {
        Self::Compilation {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// True for errors produced by libsass itself rather than by the façade.
    pub fn is_compilation(&self) -> bool {
        matches!(self, Self::Compilation { .. })
    }
}
