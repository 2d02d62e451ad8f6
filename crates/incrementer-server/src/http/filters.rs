//! Filters, essentially how [`warp`] implements routes and middlewares.

use std::{sync::Arc, time::Duration};

use warp::Filter;

use crate::{
    http::handlers,
    logic::{op_get_number, op_increment_number, op_set_settings, LogicOp},
};

/// The request header carrying the caller deadline, in milliseconds.
pub const DEADLINE_HEADER: &str = "x-deadline-ms";

/// Pass the [`Arc`] to the handler.
fn with_arc<T>(
    val: Arc<T>,
) -> impl Filter<Extract = (Arc<T>,), Error = std::convert::Infallible> + Clone
where
    Arc<T>: Send,
{
    warp::any().map(move || Arc::clone(&val))
}

/// Extract the caller deadline, falling back to the default one.
fn with_deadline(
    default: Duration,
) -> impl Filter<Extract = (Duration,), Error = warp::Rejection> + Clone {
    warp::header::optional::<u64>(DEADLINE_HEADER)
        .map(move |millis: Option<u64>| millis.map(Duration::from_millis).unwrap_or(default))
}

/// Extract the JSON body from the request, rejecting the excessive inputs size.
fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: Send + for<'de> serde::de::Deserialize<'de>,
{
    // When accepting a body, we want a JSON body
    // (and to reject huge payloads)...
    warp::body::content_length_limit(1024 * 16).and(warp::body::json::<T>())
}

/// The root mount point with all the routes.
pub fn root<L>(
    logic: Arc<L>,
    default_deadline: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
where
    L: LogicOp<
            op_get_number::Request,
            Response = op_get_number::Response,
            Error = op_get_number::Error,
        > + LogicOp<
            op_increment_number::Request,
            Response = op_increment_number::Response,
            Error = op_increment_number::Error,
        > + LogicOp<
            op_set_settings::Request,
            Response = op_set_settings::Response,
            Error = op_set_settings::Error,
        > + Send
        + Sync
        + 'static,
{
    get_number(Arc::clone(&logic), default_deadline)
        .or(increment_number(Arc::clone(&logic), default_deadline))
        .or(set_settings(logic, default_deadline))
}

/// GET /number.
fn get_number<L>(
    logic: Arc<L>,
    default_deadline: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
where
    L: LogicOp<
            op_get_number::Request,
            Response = op_get_number::Response,
            Error = op_get_number::Error,
        > + Send
        + Sync
        + 'static,
{
    warp::path!("number")
        .and(warp::get())
        .and(with_arc(logic))
        .and(with_deadline(default_deadline))
        .and_then(|logic, deadline| handlers::call(logic, deadline, op_get_number::Request))
}

/// POST /number/increment.
fn increment_number<L>(
    logic: Arc<L>,
    default_deadline: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
where
    L: LogicOp<
            op_increment_number::Request,
            Response = op_increment_number::Response,
            Error = op_increment_number::Error,
        > + Send
        + Sync
        + 'static,
{
    warp::path!("number" / "increment")
        .and(warp::post())
        .and(with_arc(logic))
        .and(with_deadline(default_deadline))
        .and_then(|logic, deadline| {
            handlers::call(logic, deadline, op_increment_number::Request)
        })
}

/// POST /settings with JSON body.
fn set_settings<L>(
    logic: Arc<L>,
    default_deadline: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
where
    L: LogicOp<
            op_set_settings::Request,
            Response = op_set_settings::Response,
            Error = op_set_settings::Error,
        > + Send
        + Sync
        + 'static,
{
    warp::path!("settings")
        .and(warp::post())
        .and(with_arc(logic))
        .and(with_deadline(default_deadline))
        .and(json_body::<op_set_settings::Request>())
        .and_then(handlers::call)
}
