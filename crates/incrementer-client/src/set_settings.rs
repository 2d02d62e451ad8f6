//! The set settings call.

use reqwest::StatusCode;
use serde::Serialize;

use crate::{
    error_response::{Common, ErrorResponse},
    Client, Error,
};

impl Client {
    /// Replace the counter settings.
    pub async fn set_settings(
        &self,
        req: SetSettingsRequest,
    ) -> Result<(), Error<SetSettingsError>> {
        let url = format!("{}/settings", self.base_url);
        let res = self
            .with_deadline(self.reqwest.post(url).json(&req))
            .send()
            .await?;
        match res.status() {
            StatusCode::OK => Ok(()),
            _ => Err(Error::Call(SetSettingsError::from_response(
                res.text().await?,
            ))),
        }
    }
}

/// Input data for the set settings request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SetSettingsRequest {
    /// The largest value the counter can take.
    pub maximum: i64,
    /// The amount added to the counter on every increment.
    pub step: i64,
}

/// The set-settings-specific error condition.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SetSettingsError {
    /// The maximum is not positive.
    #[error("invalid maximum")]
    InvalidMaximum,
    /// The step is not positive.
    #[error("invalid step")]
    InvalidStep,
    /// The server could not reach its store.
    #[error("store unavailable")]
    StoreUnavailable,
    /// The server gave up on the call, the settings may or may not have
    /// been replaced.
    #[error("deadline exceeded")]
    DeadlineExceeded,
    /// Some other error occured.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl SetSettingsError {
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
            "SET_SETTINGS_INVALID_MAXIMUM" => Self::InvalidMaximum,
            "SET_SETTINGS_INVALID_STEP" => Self::InvalidStep,
            _ => Self::Unknown(error_code),
        }
    }
}
