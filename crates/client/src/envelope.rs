//! The `{code, message, data}` wrapper around every backend response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult, DEFAULT_ERROR_MESSAGE};

/// Envelope code signalling success.
pub const SUCCESS_CODE: i64 = 200;

/// Response envelope.
///
/// `data` is kept as raw JSON until the code has been checked, so endpoints
/// returning nothing (`data: null` or no `data` at all) decode as `()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i64,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    /// Parses an envelope from a response body.
    pub fn from_slice(body: &[u8]) -> ClientResult<Self> {
        serde_json::from_slice(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Returns true if the code signals success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Unwraps the payload, or turns a non-success code into a business error.
    pub fn into_data<T: DeserializeOwned>(self) -> ClientResult<T> {
        if !self.is_success() {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            return Err(ClientError::Business {
                code: self.code,
                message,
            });
        }

        Ok(serde_json::from_value(self.data)?)
    }
}
