//! Client error types

use thiserror::Error;

/// Error taxonomy for backend calls
///
/// `Network` means no response reached the server, `Server` means the
/// backend answered with a non-2xx status and a message payload, `Client`
/// covers request construction and response decoding failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received
    #[error("could not connect to server: {0}")]
    Network(String),

    /// The backend returned an error payload
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request could not be built or its response decoded
    #[error("request failed: {0}")]
    Client(String),

    /// Checkout was attempted while no cart is active on the server
    #[error("no active cart found")]
    NoActiveCart,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            ApiError::Client(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            // Connect errors and timeouts: the request never got an answer
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;
