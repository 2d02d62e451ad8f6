//! Handlers, the HTTP transport coupling for the internal logic.

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use warp::{hyper::StatusCode, Reply};

use super::error;
use crate::logic::LogicOp;

/// Call the logic operation within the deadline and render the JSON response.
pub async fn call<L, R>(
    logic: Arc<L>,
    deadline: Duration,
    req: R,
) -> Result<impl warp::Reply, warp::Rejection>
where
    L: LogicOp<R> + Send + Sync + 'static,
    R: Send + 'static,
    L::Response: Serialize,
    L::Error: Into<error::Logic>,
{
    // Dropping the in-flight call on timeout is fine: every store operation is
    // atomic, so it either committed fully or not at all.
    match tokio::time::timeout(deadline, logic.call(req)).await {
        Ok(Ok(res)) => {
            Ok(warp::reply::with_status(warp::reply::json(&res), StatusCode::OK).into_response())
        }
        Ok(Err(err)) => {
            let err: error::Logic = err.into();
            Err(warp::reject::custom(err))
        }
        Err(_elapsed) => Err(warp::reject::custom(error::Logic::deadline_exceeded())),
    }
}
