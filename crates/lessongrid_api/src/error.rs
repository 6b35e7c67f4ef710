// --- File: crates/lessongrid_api/src/error.rs ---
use lessongrid_common::LessongridError;
use thiserror::Error;

/// Errors from talking to the booking server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, decode).
    #[error("Booking API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The server answered outside the 2xx range.
    #[error("Booking API returned status {0}")]
    StatusError(reqwest::StatusCode),

    /// A timestamp in a response was not ISO 8601.
    #[error("Unparseable timestamp in booking API response: {0}")]
    TimestampError(String),

    /// `success: false` — the message is the server's, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// The line the user sees. Transport problems collapse into the generic
    /// retry message; a server rejection passes through untouched.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(message) => message.clone(),
            ApiError::RequestError(_) | ApiError::StatusError(_) => {
                "Network error. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for LessongridError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => LessongridError::NetworkError(e.to_string()),
            ApiError::StatusError(status) => {
                LessongridError::NetworkError(format!("unexpected status {status}"))
            }
            ApiError::TimestampError(raw) => {
                LessongridError::ParseError(format!("bad timestamp: {raw}"))
            }
            ApiError::Rejected(message) => LessongridError::ServerError(message),
        }
    }
}
