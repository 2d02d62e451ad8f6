//! The logic errors converted to the HTTP terms.

use warp::hyper::StatusCode;

use crate::logic::{op_get_number, op_increment_number, op_set_settings};

/// A logic error, ready to be rendered as a response.
#[derive(Debug)]
pub struct Logic {
    /// The status code to respond with.
    pub status_code: StatusCode,
    /// The machine-readable error code.
    pub error_code: &'static str,
    /// The human-readable error description.
    pub message: String,
}

impl warp::reject::Reject for Logic {}

impl Logic {
    /// Create a new [`Logic`] error.
    fn new(status_code: StatusCode, error_code: &'static str, err: impl ToString) -> Self {
        Self {
            status_code,
            error_code,
            message: err.to_string(),
        }
    }

    /// The operation took longer than the caller was willing to wait.
    pub fn deadline_exceeded() -> Self {
        Self::new(
            StatusCode::GATEWAY_TIMEOUT,
            "DEADLINE_EXCEEDED",
            "operation deadline exceeded",
        )
    }
}

/// The store unavailability, common for all the operations.
fn store_unavailable(err: impl ToString) -> Logic {
    Logic::new(StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", err)
}

impl From<op_get_number::Error> for Logic {
    fn from(err: op_get_number::Error) -> Self {
        match err {
            op_get_number::Error::NotProvisioned => {
                Self::new(StatusCode::CONFLICT, "GET_NUMBER_NOT_PROVISIONED", err)
            }
            op_get_number::Error::StoreUnavailable(_) => store_unavailable(err),
        }
    }
}

impl From<op_increment_number::Error> for Logic {
    fn from(err: op_increment_number::Error) -> Self {
        match err {
            op_increment_number::Error::NotConfigured => {
                Self::new(StatusCode::CONFLICT, "INCREMENT_NUMBER_NOT_CONFIGURED", err)
            }
            op_increment_number::Error::StoreUnavailable(_) => store_unavailable(err),
        }
    }
}

impl From<op_set_settings::Error> for Logic {
    fn from(err: op_set_settings::Error) -> Self {
        match err {
            op_set_settings::Error::InvalidMaximum => {
                Self::new(StatusCode::BAD_REQUEST, "SET_SETTINGS_INVALID_MAXIMUM", err)
            }
            op_set_settings::Error::InvalidStep => {
                Self::new(StatusCode::BAD_REQUEST, "SET_SETTINGS_INVALID_STEP", err)
            }
            op_set_settings::Error::StoreUnavailable(_) => store_unavailable(err),
        }
    }
}
