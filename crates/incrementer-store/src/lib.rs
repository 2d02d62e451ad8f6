//! The shared counter settings store and the atomic transitions over it.

#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::clone_on_ref_ptr
)]

mod error;
pub mod memory;
pub mod redis_store;
mod transition;
mod types;

#[cfg(test)]
mod conformance;

pub use error::Error;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use transition::next_value;
pub use types::*;

/// The durable storage of the counter value and its settings.
///
/// Every method is a single atomic operation against the underlying store:
/// concurrent callers, possibly from different processes, observe the results
/// as if the calls were executed in some serial order.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the current counter value, or `None` if it was never written.
    async fn number(&self) -> Result<Option<i64>, Error>;

    /// Read the currently configured settings pair, or `None` if the store is
    /// not configured.
    async fn settings(&self) -> Result<Option<Settings>, Error>;

    /// Advance the counter by the configured step, wrapping around to zero
    /// when the result would exceed the configured maximum.
    ///
    /// Returns the value after the transition. Fails with
    /// [`Error::NotConfigured`] without writing anything if the settings are
    /// absent.
    async fn increment(&self) -> Result<i64, Error>;

    /// Replace both the maximum and the step at once.
    async fn set_settings(&self, settings: Settings) -> Result<(), Error>;

    /// Seed the settings and the initial value, unless the store is already
    /// configured, in which case nothing is touched.
    async fn provision(&self, provision: Provision) -> Result<ProvisionOutcome, Error>;
}

#[async_trait::async_trait]
impl<T> SettingsStore for std::sync::Arc<T>
where
    T: SettingsStore + ?Sized,
{
    async fn number(&self) -> Result<Option<i64>, Error> {
        (**self).number().await
    }

    async fn settings(&self) -> Result<Option<Settings>, Error> {
        (**self).settings().await
    }

    async fn increment(&self) -> Result<i64, Error> {
        (**self).increment().await
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), Error> {
        (**self).set_settings(settings).await
    }

    async fn provision(&self, provision: Provision) -> Result<ProvisionOutcome, Error> {
        (**self).provision(provision).await
    }
}
