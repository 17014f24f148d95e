//! Error types for the Value Glance application.

use glance_core::error::{FetchError, QueryError};
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum GlanceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Record source error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Query or sort argument error
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Result alias for application operations
pub type Result<T> = std::result::Result<T, GlanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: GlanceError = QueryError::MalformedRange.into();
        assert!(err.to_string().starts_with("Query error"));

        let err: GlanceError = FetchError::Status { code: 429 }.into();
        assert!(err.to_string().contains("429"));
    }
}
