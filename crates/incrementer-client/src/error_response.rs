//! Error response handling logic.

use serde::Deserialize;

/// A utility type assisting with decoding error response bodies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ErrorResponse {
    /// A machine-readable code identifying the error.
    pub error_code: String,
}

impl TryFrom<String> for ErrorResponse {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        serde_json::from_str(&s).map_err(|_parsing_error| s)
    }
}

/// The error condition shared by all of the calls.
pub(super) enum Common {
    /// The server could not reach its store.
    StoreUnavailable,
    /// The server gave up on the call.
    DeadlineExceeded,
}

impl Common {
    /// Recognize the error code shared by all of the calls.
    pub fn from_error_code(error_code: &str) -> Option<Self> {
        match error_code {
            "STORE_UNAVAILABLE" => Some(Self::StoreUnavailable),
            "DEADLINE_EXCEEDED" => Some(Self::DeadlineExceeded),
            _ => None,
        }
    }
}
