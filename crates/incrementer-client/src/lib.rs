//! Client API for the shared counter server.

#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::clone_on_ref_ptr
)]

use std::time::Duration;

use thiserror::Error;

mod error_response;
mod get_number;
mod increment_number;
mod set_settings;
#[cfg(test)]
mod test_utils;

pub use get_number::*;
pub use increment_number::*;
pub use set_settings::*;

/// The request header carrying the caller deadline, in milliseconds.
const DEADLINE_HEADER: &str = "x-deadline-ms";

/// The generic error type for the client calls.
#[derive(Error, Debug)]
pub enum Error<T: std::error::Error + 'static> {
    /// A call-specific error.
    #[error("server error: {0}")]
    Call(T),
    /// An error coming from the underlying reqwest layer.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// The counter client.
#[derive(Debug)]
pub struct Client {
    /// Underlying HTTP client used to execute network calls.
    pub reqwest: reqwest::Client,
    /// The base URL to use for the routes.
    pub base_url: String,
    /// The deadline to ask the server to respect, if any.
    pub deadline: Option<Duration>,
}

impl Client {
    /// Attach the deadline header to the request if the deadline is set.
    fn with_deadline(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.deadline {
            Some(deadline) => req.header(DEADLINE_HEADER, deadline.as_millis().to_string()),
            None => req,
        }
    }
}
