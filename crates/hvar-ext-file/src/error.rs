//! File access error types.

use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing data files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened, read or written.
    #[error("I/O error on '{path}': {reason}")]
    Io {
        /// The file concerned.
        path: String,
        /// Underlying error.
        reason: String,
    },

    /// A row could not be parsed.
    #[error("Parse error in '{path}' at line {line}: {reason}")]
    Parse {
        /// The file concerned.
        path: String,
        /// One-based line number, header included.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },
}

impl FileError {
    pub(crate) fn io(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn parse(path: &std::path::Path, line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            line,
            reason: reason.into(),
        }
    }
}
