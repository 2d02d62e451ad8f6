//! The get number call.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    error_response::{Common, ErrorResponse},
    Client, Error,
};

impl Client {
    /// Read the current counter value.
    pub async fn get_number(&self) -> Result<GetNumberResponse, Error<GetNumberError>> {
        let url = format!("{}/number", self.base_url);
        let res = self.with_deadline(self.reqwest.get(url)).send().await?;
        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            _ => Err(Error::Call(GetNumberError::from_response(res.text().await?))),
        }
    }
}

/// The get number response.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct GetNumberResponse {
    /// The current counter value.
    pub number: i64,
}

/// The get-number-specific error condition.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GetNumberError {
    /// The counter was never written.
    #[error("not provisioned")]
    NotProvisioned,
    /// The server could not reach its store.
    #[error("store unavailable")]
    StoreUnavailable,
    /// The server gave up on the call.
    #[error("deadline exceeded")]
    DeadlineExceeded,
    /// Some other error occured.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl GetNumberError {
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
            "GET_NUMBER_NOT_PROVISIONED" => Self::NotProvisioned,
            _ => Self::Unknown(error_code),
        }
    }
}
