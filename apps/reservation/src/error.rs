//! Error types for the reservation client

use thiserror::Error;

/// Errors from the movie backend
///
/// Both catalog queries and reservation submissions report through this
/// type. Reducers turn it into a failure action at the effect boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, ...)
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("failed to parse response: {0}")]
    ResponseParseFailed(String),
}

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is set but cannot be used
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value as found
        value: String,
        /// What was expected
        reason: &'static str,
    },
}
