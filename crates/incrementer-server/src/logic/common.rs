//! Common logic utilities.

use tracing::error;

/// Log the failure of the operation `op` and pass the error through.
pub fn log_error<E: std::fmt::Display>(op: &'static str, err: E) -> E {
    error!(message = "Logic operation failed", op, error = %err);
    err
}
