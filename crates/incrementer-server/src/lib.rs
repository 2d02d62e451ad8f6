//! The shared counter server.

#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::clone_on_ref_ptr
)]

use std::{sync::Arc, time::Duration};

use incrementer_store::SettingsStore;
use warp::Filter;

pub mod config;
mod http;
pub mod logic;

pub use logic::Logic;

/// Initialize the [`warp::Filter`] implementing the HTTP transport for
/// the counter.
pub fn init<S>(
    logic: Logic<S>,
    request_timeout: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone
where
    S: SettingsStore + 'static,
{
    let log = warp::log("incrementer::api");
    http::root(Arc::new(logic), request_timeout)
        .recover(http::rejection::handle)
        .with(log)
}
