//! Process configuration, read from the environment variables.

use std::{ffi::OsString, net::SocketAddr, time::Duration};

use incrementer_store::{redis_store::DEFAULT_KEY_PREFIX, Provision, Settings};
use thiserror::Error;

/// The value of the `STORE` variable selecting the in-process store.
const MEMORY_STORE: &str = "memory";

/// The store to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Store {
    /// The in-process store, not shared and not persisted.
    Memory,
    /// The Redis store.
    Redis {
        /// The Redis URL.
        url: String,
        /// The prefix for the keys.
        key_prefix: String,
    },
}

/// The server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The address to listen on.
    pub addr: SocketAddr,
    /// The store to use.
    pub store: Store,
    /// The state to seed an empty store with.
    pub provision: Provision,
    /// The deadline to apply to requests that don't carry their own.
    pub request_timeout: Duration,
}

/// A configuration error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The variable value is not a valid unicode string.
    #[error("{0} env var is not a valid unicode string")]
    NotUnicode(&'static str),
    /// The variable value could not be parsed.
    #[error("{key} env var is not valid: {message}")]
    Invalid {
        /// The variable name.
        key: &'static str,
        /// The parsing error.
        message: String,
    },
    /// The provisioning parameters are inconsistent.
    #[error("invalid provisioning parameters: {0}")]
    InvalidProvision(&'static str),
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read the configuration using the provided variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&'static str) -> Option<OsString>,
    {
        let addr = parse_var(&lookup, "ADDR", || ([0, 0, 0, 0], 8080).into())?;

        let store: String = parse_var(&lookup, "STORE", || "redis://127.0.0.1:6379".to_owned())?;
        let store = if store == MEMORY_STORE {
            Store::Memory
        } else {
            Store::Redis {
                url: store,
                key_prefix: parse_var(&lookup, "STORE_KEY_PREFIX", || {
                    DEFAULT_KEY_PREFIX.to_owned()
                })?,
            }
        };

        let provision = Provision {
            settings: Settings {
                maximum: parse_var(&lookup, "PROVISION_MAXIMUM", || 1000)?,
                step: parse_var(&lookup, "PROVISION_STEP", || 1)?,
            },
            value: parse_var(&lookup, "PROVISION_VALUE", || 0)?,
        };
        validate_provision(&provision)?;

        let request_timeout =
            Duration::from_millis(parse_var(&lookup, "REQUEST_TIMEOUT_MS", || 5000)?);

        Ok(Self {
            addr,
            store,
            provision,
            request_timeout,
        })
    }
}

/// Check the provisioning parameters describe a valid counter state.
fn validate_provision(provision: &Provision) -> Result<(), Error> {
    if provision.settings.maximum <= 0 {
        return Err(Error::InvalidProvision("maximum must be positive"));
    }
    if provision.settings.step <= 0 {
        return Err(Error::InvalidProvision("step must be positive"));
    }
    if !(0..=provision.settings.maximum).contains(&provision.value) {
        return Err(Error::InvalidProvision(
            "value must be between zero and maximum",
        ));
    }
    Ok(())
}

/// Get the value of variable `key` and parse it into the type `T`, or use the
/// default if the variable is not set.
///
/// Returns an error if the value is an invalid unicode, or if the value could
/// not be parsed.
fn parse_var<T, F, D>(lookup: &F, key: &'static str, default: D) -> Result<T, Error>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::fmt::Display,
    F: Fn(&'static str) -> Option<OsString>,
    D: FnOnce() -> T,
{
    let raw = match lookup(key) {
        Some(raw) => raw,
        None => return Ok(default()),
    };
    let string = raw.into_string().map_err(|_| Error::NotUnicode(key))?;
    string.parse().map_err(|err: T::Err| Error::Invalid {
        key,
        message: err.to_string(),
    })
}
