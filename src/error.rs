//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Student list endpoint answered with a non-success status
    #[error("Could not fetch student list")]
    FetchStudents,

    /// Analytics endpoint answered with a non-success status
    #[error("Could not fetch analytics")]
    FetchAnalytics,

    /// Check-in failed without a usable server message
    #[error("{0}")]
    CheckInFailed(String),

    /// Check-in refused with a `detail` message from the server
    #[error("{0}")]
    Rejected(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create an export error with message
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Message supplied by the server, if this error carries one.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Rejected(detail) => Some(detail),
            _ => None,
        }
    }
}
