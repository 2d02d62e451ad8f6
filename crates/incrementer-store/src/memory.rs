//! In-process store.
//!
//! Holds the state for a single serving process only, so it does not survive
//! restarts and is not shared between replicas. Useful for local runs and
//! tests.

use tokio::sync::Mutex;
use tracing::trace;

use crate::{next_value, Error, Provision, ProvisionOutcome, Settings, SettingsStore};

/// The raw stored entries, each independently present or absent.
#[derive(Debug, Default, Clone, Copy)]
struct Entries {
    /// The counter value.
    value: Option<i64>,
    /// The wraparound boundary.
    maximum: Option<i64>,
    /// The increment step, also the "configured" sentinel.
    step: Option<i64>,
}

/// A store keeping the entries in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// The mutex over the entries.
    /// Every operation runs as one critical section, which is what makes it
    /// atomic.
    entries: Mutex<Entries>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all the entries, as if the store was wiped externally.
    pub async fn wipe(&self) {
        *self.entries.lock().await = Entries::default();
    }
}

#[async_trait::async_trait]
impl SettingsStore for MemoryStore {
    async fn number(&self) -> Result<Option<i64>, Error> {
        Ok(self.entries.lock().await.value)
    }

    async fn settings(&self) -> Result<Option<Settings>, Error> {
        let entries = self.entries.lock().await;
        Ok(Settings::from_parts(entries.maximum, entries.step))
    }

    async fn increment(&self) -> Result<i64, Error> {
        let mut entries = self.entries.lock().await;
        let settings =
            Settings::from_parts(entries.maximum, entries.step).ok_or(Error::NotConfigured)?;
        let value = next_value(entries.value.unwrap_or_default(), settings);
        entries.value = Some(value);
        trace!(message = "Counter advanced", value);
        Ok(value)
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;
        entries.maximum = Some(settings.maximum);
        entries.step = Some(settings.step);
        Ok(())
    }

    async fn provision(&self, provision: Provision) -> Result<ProvisionOutcome, Error> {
        let mut entries = self.entries.lock().await;
        if entries.step.is_some() {
            return Ok(ProvisionOutcome::AlreadyProvisioned);
        }
        *entries = Entries {
            value: Some(provision.value),
            maximum: Some(provision.settings.maximum),
            step: Some(provision.settings.step),
        };
        Ok(ProvisionOutcome::Provisioned)
    }
}
