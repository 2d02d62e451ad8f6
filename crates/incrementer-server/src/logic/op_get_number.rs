//! Get number operation.

use incrementer_store::{Error as StoreError, SettingsStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{common::log_error, Logic, LogicOp};

/// The operation name for the logs.
const OP: &str = "get_number";

/// The request of the get number operation.
#[derive(Debug, Deserialize, Serialize)]
pub struct Request;

/// The response for the get number operation.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The current counter value.
    pub number: i64,
}

/// Errors for the get number operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The counter value was never written to the store.
    #[error("the counter is not provisioned")]
    NotProvisioned,
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
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
            .number()
            .await
            .map_err(|err| log_error(OP, Error::StoreUnavailable(err)))?
            .ok_or_else(|| log_error(OP, Error::NotProvisioned))?;

        Ok(Response { number })
    }
}
