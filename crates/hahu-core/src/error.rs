use std::time::Duration;

use thiserror::Error;

/// Application-wide error types for hahu.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (non-2xx status, unreadable body, bad URL).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The fetch was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The URL points outside the allowed source domains.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// The page was fetched but no listing blocks were found in it.
    #[error("No job listings found at {0}")]
    NoListings(String),

    /// HTML could not be parsed or a layout rule is invalid.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Reading or writing the jobs file failed.
    #[error("File error: {0}")]
    FileError(String),

    /// A requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Timeout error for `limit`, in whole seconds rounded up.
    pub fn timeout(limit: Duration) -> Self {
        let secs = limit.as_millis().div_ceil(1000);
        AppError::Timeout(u64::try_from(secs).unwrap_or(u64::MAX))
    }

    /// Returns true if this error means the live scrape produced nothing usable
    /// (network or match failure), so the persisted file should be used instead.
    pub fn is_live_failure(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_)
                | AppError::NetworkError(_)
                | AppError::Timeout(_)
                | AppError::Cancelled
                | AppError::DomainNotAllowed(_)
                | AppError::NoListings(_)
                | AppError::ParseError(_)
        )
    }
}
