//! Error types for dashboard assembly
//!
//! Errors are classified by origin:
//! - Boundary: malformed source data (unparseable instants, inverted events)
//! - Ambient: configuration and IO failures
//!
//! The core selector and formatter never error — an absent result is `None`,
//! not a failure.

use thiserror::Error;

/// Error type for the dashboard engine
#[derive(Debug, Error)]
pub enum DashboardError {
    // Boundary errors
    #[error("Invalid instant: {value:?}")]
    InvalidInstant { value: String },

    #[error("Invalid event '{id}': {reason}")]
    InvalidEvent { id: String, reason: String },

    // Ambient errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl DashboardError {
    /// Returns true if this error originates from malformed source data
    /// (as opposed to a local config/IO problem).
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidInstant { .. } | DashboardError::InvalidEvent { .. }
        )
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err.to_string())
    }
}
