//! Set settings operation.

use incrementer_store::{Error as StoreError, Settings, SettingsStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::{common::log_error, Logic, LogicOp};

/// The operation name for the logs.
const OP: &str = "set_settings";

/// The request of the set settings operation.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The new inclusive upper bound of the counter.
    pub maximum: i64,
    /// The new increment step.
    pub step: i64,
}

/// The response for the set settings operation.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {}

/// Errors for the set settings operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The maximum is zero or negative.
    #[error("maximum can't be less or equal zero")]
    InvalidMaximum,
    /// The step is zero or negative.
    #[error("step can't be less or equal zero")]
    InvalidStep,
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl Request {
    /// Check the requested settings, without consulting the store.
    pub fn validate(self) -> Result<Settings, Error> {
        if self.maximum <= 0 {
            return Err(Error::InvalidMaximum);
        }
        if self.step <= 0 {
            return Err(Error::InvalidStep);
        }
        Ok(Settings {
            maximum: self.maximum,
            step: self.step,
        })
    }
}

#[async_trait::async_trait]
impl<S> LogicOp<Request> for Logic<S>
where
    S: SettingsStore,
{
    type Response = Response;
    type Error = Error;

    async fn call(&self, req: Request) -> Result<Self::Response, Self::Error> {
        let settings = req.validate().map_err(|err| log_error(OP, err))?;

        self.ensure_provisioned().await;

        self.store
            .set_settings(settings)
            .await
            .map_err(|err| log_error(OP, Error::StoreUnavailable(err)))?;

        info!(
            message = "Counter settings updated",
            maximum = settings.maximum,
            step = settings.step
        );

        Ok(Response {})
    }
}
