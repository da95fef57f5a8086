//! API errors

use thiserror::Error;

/// Errors that can occur when talking to the storefront backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,

        /// Server-supplied message, or the raw body.
        message: String,
    },
}

impl ApiError {
    /// Message to show the user, preferring the server's own wording.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::UnexpectedResponse { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
