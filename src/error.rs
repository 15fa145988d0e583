//! Error types for `mediawatch`
//!
//! This module defines all error types used throughout the crate,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use std::path::PathBuf;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `mediawatch`
#[derive(Debug, Error)]
pub enum MediaWatchError {
    /// The external monitoring process could not be started.
    /// Fatal for the affected monitor task; there is no retry.
    #[error("Failed to launch monitor process: {0}")]
    MonitorLaunchFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The synchronous device info query exited with a non-zero status.
    /// Fatal for the affected add operation only.
    #[error("Device info query failed for {device}: {reason}")]
    InfoQueryFailed {
        /// Device path the query was run against
        device: PathBuf,
        /// Exit status or failure description from the external tool
        reason: String,
    },

    /// A device monitor failed while running
    /// Preserves the underlying error source for full error chain transparency
    #[error("Device monitor error: {0}")]
    MonitorError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `mediawatch` operations
pub type Result<T> = std::result::Result<T, MediaWatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MediaWatchError::InfoQueryFailed {
            device: PathBuf::from("/dev/sdb1"),
            reason: "exit status: 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Device info query failed for /dev/sdb1: exit status: 1"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: MediaWatchError = io_error.into();
        assert!(matches!(error, MediaWatchError::IoError(_)));
    }

    #[test]
    fn test_launch_failure_preserves_source() {
        let error = MediaWatchError::MonitorLaunchFailed(StringError::new("no such file"));
        assert_eq!(
            error.to_string(),
            "Failed to launch monitor process: no such file"
        );
        assert!(std::error::Error::source(&error).is_some());
    }
}
