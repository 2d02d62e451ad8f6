//! Rejection handling logic.

use serde::Serialize;
use warp::{hyper::StatusCode, Reply};

use super::error;

/// Error response shape that we can return for the error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// The machine-readable error code describing the error condition.
    pub error_code: &'static str,
    /// The human-readable error description.
    pub message: &'a str,
}

/// This function receives a `Rejection` and generates an error response.
pub async fn handle(err: warp::reject::Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (status_code, error_code, message) = if let Some(logic_error) = err.find::<error::Logic>()
    {
        (
            logic_error.status_code,
            logic_error.error_code,
            logic_error.message.clone(),
        )
    } else if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST_BODY",
            body_error.to_string(),
        )
    } else if let Some(header_error) = err.find::<warp::reject::InvalidHeader>() {
        (
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST_HEADER",
            header_error.to_string(),
        )
    } else {
        (
            StatusCode::NOT_IMPLEMENTED,
            "UNKNOWN_CALL",
            "unknown call".to_owned(),
        )
    };

    let json = warp::reply::json(&ErrorResponse {
        error_code,
        message: &message,
    });
    Ok(warp::reply::with_status(json, status_code))
}
