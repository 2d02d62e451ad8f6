//! The provisioning guard.
//!
//! Seeds an empty store with the configured settings and initial value. The
//! store does the "is it empty" check and the writes as one atomic operation,
//! so running the guard on an already configured store, even concurrently from
//! many replicas, never resets the counter.
//!
//! The guard is first run at startup. If the store can't be reached at that
//! moment, the guard stays pending and is retried before every operation
//! until it succeeds once. After that it is never run again.

use std::sync::atomic::{AtomicBool, Ordering};

use incrementer_store::{Error as StoreError, Provision, ProvisionOutcome, SettingsStore};
use tracing::{info, warn};

use super::Logic;

/// The provisioning guard state.
#[derive(Debug)]
pub struct Provisioning {
    /// The state to seed the empty store with.
    params: Provision,
    /// Whether the provisioning has yet to succeed.
    pending: AtomicBool,
}

impl Provisioning {
    /// Create a pending provisioning guard.
    pub fn new(params: Provision) -> Self {
        Self {
            params,
            pending: AtomicBool::new(true),
        }
    }

    /// Whether the provisioning has yet to succeed.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl<S: SettingsStore> Logic<S> {
    /// Run the provisioning guard if it is pending.
    ///
    /// Returns `None` if there was nothing to do.
    pub async fn provision(&self) -> Result<Option<ProvisionOutcome>, StoreError> {
        let provisioning = match &self.provisioning {
            Some(provisioning) if provisioning.is_pending() => provisioning,
            _ => return Ok(None),
        };

        let outcome = self.store.provision(provisioning.params).await?;
        provisioning.pending.store(false, Ordering::Release);

        info!(message = "Store provisioning complete", ?outcome);
        Ok(Some(outcome))
    }

    /// Retry the pending provisioning before serving an operation.
    ///
    /// A failure here is only logged, the operation itself will report the
    /// store state.
    pub(crate) async fn ensure_provisioned(&self) {
        if let Err(err) = self.provision().await {
            warn!(message = "Store provisioning failed", error = %err);
        }
    }
}
