//! Core logic of the system.

use incrementer_store::Provision;

mod common;
pub mod op_get_number;
pub mod op_increment_number;
pub mod op_set_settings;
mod provisioning;
pub mod traits;

pub use provisioning::Provisioning;
pub use traits::*;

/// The overall generic logic.
///
/// Holds no counter state of its own: every operation goes to the store, which
/// is the only source of truth and the only thing guaranteeing atomicity.
pub struct Logic<S> {
    /// The store with the counter value and settings.
    pub store: S,
    /// The provisioning guard, if the store is to be seeded.
    pub provisioning: Option<Provisioning>,
}

impl<S> Logic<S> {
    /// Create the logic that never provisions the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            provisioning: None,
        }
    }

    /// Create the logic that seeds an empty store with the given state.
    pub fn with_provisioning(store: S, params: Provision) -> Self {
        Self {
            store,
            provisioning: Some(Provisioning::new(params)),
        }
    }
}
