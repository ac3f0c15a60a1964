//! Error types for the data-loader crate.
//!
//! Every failure here is fatal for a run: a rating file that does not parse
//! cleanly must not be partially ingested into the index.

use thiserror::Error;

use crate::types::UserId;

/// Errors that can occur while reading rating files and building indices
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a rating file couldn't be parsed
    ///
    /// Carries the file and 1-based line so the offending row can be found.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field parsed but holds a value the index cannot use (NaN, infinity)
    #[error("Invalid value for {field} at line {line}: {value}")]
    InvalidValue {
        field: String,
        value: String,
        line: usize,
    },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A user key is present in the index without any ratings
    #[error("User {user_id} has no ratings to average")]
    EmptyInput { user_id: UserId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
