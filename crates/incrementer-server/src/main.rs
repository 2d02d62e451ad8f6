//! Main entrypoint for the shared counter server.

#![warn(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::clone_on_ref_ptr
)]

use incrementer_server::{
    config::{Config, Store},
    Logic,
};
use incrementer_store::{MemoryStore, RedisStore, SettingsStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    match &config.store {
        Store::Memory => {
            warn!(message = "Using the in-process store, the counter is not shared");
            serve(MemoryStore::new(), config).await
        }
        Store::Redis { url, key_prefix } => {
            let store = RedisStore::open(url, key_prefix)?;
            serve(store, config).await
        }
    }
}

/// Provision the store and serve the API until the shutdown signal.
async fn serve<S>(store: S, config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    S: SettingsStore + 'static,
{
    let logic = Logic::with_provisioning(store, config.provision);

    // The counter is still served if the store is not reachable yet, the
    // provisioning is then retried lazily.
    if let Err(err) = logic.provision().await {
        warn!(message = "Startup provisioning failed, will retry", error = %err);
    }

    let root_filter = incrementer_server::init(logic, config.request_timeout);
    let (addr, server) = warp::serve(root_filter)
        .try_bind_with_graceful_shutdown(config.addr, shutdown_signal())?;
    info!(message = "Listening", %addr);
    server.await;
    info!(message = "Shut down");
    Ok(())
}

/// A future that resolves when the interrupt signal is received, and panics
/// if the interrupt handler failed to set up.
async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
