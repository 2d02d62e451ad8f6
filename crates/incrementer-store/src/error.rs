//! Store errors.

use thiserror::Error;

/// A store operation error.
#[derive(Error, Debug)]
pub enum Error {
    /// The step and maximum are not set, so the counter can't be advanced.
    #[error("no step and maximum configured")]
    NotConfigured,
    /// The store could not be reached, or it replied with something we could
    /// not make sense of.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary underlying failure into [`Error::Unavailable`].
    pub fn unavailable<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unavailable(Box::new(err))
    }
}
