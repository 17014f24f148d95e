//! Error types for query parsing and record fetching.
//!
//! Both error families are scoped to a single user-triggered operation:
//! neither is fatal, and the table state decides how each one is surfaced.

use thiserror::Error;

/// Range query parse failures.
///
/// Validation stops at the first failing step, so each variant names
/// exactly one defect in the raw input.
///
/// # Examples
///
/// ```
/// use glance_core::error::QueryError;
///
/// let err = QueryError::UnsupportedColumn("foo".to_string());
/// assert!(err.to_string().contains("foo"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Input does not contain exactly one `:` separator.
    #[error("Malformed query: expected '<column>: <min>-<max>'")]
    MalformedQuery,

    /// Column name is not one of the searchable columns.
    #[error("Unsupported column: '{0}'")]
    UnsupportedColumn(String),

    /// Range segment is not two non-empty bounds joined by a single `-`.
    #[error("Malformed range: expected '<min>-<max>'")]
    MalformedRange,

    /// A range bound is not an integer.
    #[error("Non-numeric range: bounds must be integers")]
    NonNumericRange,
}

/// Record source failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {code}")]
    Status {
        /// HTTP status code
        code: u16,
    },

    /// The response body was not a list of income statements.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Local file source could not be read.
    #[error("IO error: {0}")]
    Io(String),
}

impl FetchError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
