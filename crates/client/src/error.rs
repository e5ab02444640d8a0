//! Client error types.

use domain::CheckoutError;
use thiserror::Error;

/// Route the UI is sent to when the backend rejects the bearer token.
pub const LOGIN_ROUTE: &str = "/admin/login";

/// Message used when a business error arrives without one.
pub const DEFAULT_ERROR_MESSAGE: &str = "request failed";

/// Errors returned by the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer token. The stored token has been dropped.
    #[error("Authentication required, redirect to {redirect_to}")]
    Unauthorized { redirect_to: String },

    /// Non-success HTTP status other than 401.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The envelope carried a code other than 200.
    #[error("Business error {code}: {message}")]
    Business { code: i64, message: String },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The cart cannot be submitted.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl ClientError {
    /// Creates the error returned after a 401.
    pub fn unauthorized() -> Self {
        ClientError::Unauthorized {
            redirect_to: LOGIN_ROUTE.to_string(),
        }
    }

    /// Returns true if the user must sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
