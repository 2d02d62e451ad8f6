//! The increment number call.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    error_response::{Common, ErrorResponse},
    Client, Error,
};

impl Client {
    /// Advance the counter by the configured step and return the new value.
    pub async fn increment_number(
        &self,
    ) -> Result<IncrementNumberResponse, Error<IncrementNumberError>> {
        let url = format!("{}/number/increment", self.base_url);
        let res = self.with_deadline(self.reqwest.post(url)).send().await?;
        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            _ => Err(Error::Call(IncrementNumberError::from_response(
                res.text().await?,
            ))),
        }
    }
}

/// The increment number response.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct IncrementNumberResponse {
    /// The counter value after the increment.
    pub number: i64,
}

/// The increment-number-specific error condition.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IncrementNumberError {
    /// The counter settings were never written.
    #[error("not configured")]
    NotConfigured,
    /// The server could not reach its store.
    #[error("store unavailable")]
    StoreUnavailable,
    /// The server gave up on the call, the increment may or may not have
    /// been applied.
    #[error("deadline exceeded")]
    DeadlineExceeded,
    /// Some other error occured.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl IncrementNumberError {
    /// Parse the error response.
    fn from_response(body: String) -> Self {
        let error_code = match ErrorResponse::try_from(body) {
            Ok(ErrorResponse { error_code }) => error_code,
            Err(body) => return Self::Unknown(body),
        };
        match Common::from_error_code(&error_code) {
            Some(Common::StoreUnavailable) => return Self::StoreUnavailable,
            Some(Common::DeadlineExceeded) => return Self::DeadlineExceeded,
            None => {}
        }
        match error_code.as_str() {
            "INCREMENT_NUMBER_NOT_CONFIGURED" => Self::NotConfigured,
            _ => Self::Unknown(error_code),
        }
    }
}
