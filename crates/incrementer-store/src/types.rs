//! Plain data kept in the store.

/// The wraparound boundary and the increment step, always stored as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// The inclusive upper bound of the counter value.
    pub maximum: i64,
    /// The amount added per increment.
    pub step: i64,
}

impl Settings {
    /// Assemble the settings from the raw stored parts.
    ///
    /// An absent or zero step, as well as an absent maximum, mean the store is
    /// not configured.
    pub fn from_parts(maximum: Option<i64>, step: Option<i64>) -> Option<Self> {
        match (maximum, step) {
            (Some(maximum), Some(step)) if step != 0 => Some(Self { maximum, step }),
            _ => None,
        }
    }
}

/// The initial state to seed into an empty store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provision {
    /// The settings to provision.
    pub settings: Settings,
    /// The starting counter value.
    pub value: i64,
}

/// The result of the provisioning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The store was empty and got seeded.
    Provisioned,
    /// The store already had the settings, nothing was changed.
    AlreadyProvisioned,
}
