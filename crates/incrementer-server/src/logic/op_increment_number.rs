//! Increment number operation.

use incrementer_store::{Error as StoreError, SettingsStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use super::{common::log_error, Logic, LogicOp};

/// The operation name for the logs.
const OP: &str = "increment_number";

/// The request of the increment number operation.
#[derive(Debug, Deserialize, Serialize)]
pub struct Request;

/// The response for the increment number operation.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The counter value after the increment.
    pub number: i64,
}

/// Errors for the increment number operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The store has no step and maximum set.
    #[error("the counter settings are not configured")]
    NotConfigured,
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured => Self::NotConfigured,
            err => Self::StoreUnavailable(err),
        }
    }
}

#[async_trait::async_trait]
impl<S> LogicOp<Request> for Logic<S>
where
    S: SettingsStore,
{
    type Response = Response;
    type Error = Error;

    async fn call(&self, _req: Request) -> Result<Self::Response, Self::Error> {
        self.ensure_provisioned().await;

        let number = self
            .store
            .increment()
            .await
            .map_err(|err| log_error(OP, Error::from(err)))?;

        trace!(message = "Counter incremented", number);

        Ok(Response { number })
    }
}
