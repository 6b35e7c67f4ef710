// --- File: crates/lessongrid_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared across the Lessongrid crates.
///
/// Each crate can extend this by implementing From<SpecificError> for
/// LessongridError.
#[derive(Error, Debug)]
pub enum LessongridError {
    /// A request never produced a usable response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A response arrived but could not be parsed.
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The server answered with `success: false`; the message is the
    /// server's error string, surfaced verbatim.
    #[error("Server rejected the request: {0}")]
    ServerError(String),

    /// Anything that does not fit the categories above.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for LessongridError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            LessongridError::NetworkError(err.to_string())
        } else {
            LessongridError::InternalError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LessongridError {
    fn from(err: serde_json::Error) -> Self {
        LessongridError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for LessongridError {
    fn from(err: std::io::Error) -> Self {
        LessongridError::InternalError(err.to_string())
    }
}

// Utility constructor for error handling
pub fn config_error<T: fmt::Display>(message: T) -> LessongridError {
    LessongridError::ConfigError(message.to_string())
}

impl LessongridError {
    /// The message shown to the user. Transport failures collapse to one
    /// generic line; server messages pass through untouched.
    pub fn user_message(&self) -> String {
        match self {
            LessongridError::NetworkError(_) => "Network error. Please try again.".to_string(),
            LessongridError::ServerError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
