//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the database pool and wait, bounded, for it to become reachable
//! - Create the votes table if missing
//! - Bind the listener last, so traffic only arrives once the store is ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The readiness wait is the only retry in the process

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{DatabaseConfig, VoteConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::resilience::wait_until_ready;
use crate::store::{PgVoteStore, StoreError, VoteStore};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("database not reachable within {deadline:?}: {source}")]
    StoreUnreachable {
        deadline: Duration,
        #[source]
        source: StoreError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Connect to PostgreSQL, wait for it per the readiness policy, ensure the schema.
pub async fn prepare_store(config: &DatabaseConfig) -> Result<PgVoteStore, StartupError> {
    let store = PgVoteStore::connect_lazy(config)?;

    let attempts = wait_until_ready(&config.readiness, || store.ping())
        .await
        .map_err(|source| StartupError::StoreUnreachable {
            deadline: config.readiness.deadline(),
            source,
        })?;
    tracing::info!(attempts, "Database reachable");

    store.ensure_schema().await?;
    Ok(store)
}

/// Run the service until `shutdown` fires.
pub async fn run(config: VoteConfig, shutdown: Arc<Shutdown>) -> Result<(), StartupError> {
    let store = Arc::new(prepare_store(&config.database).await?);

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let server = HttpServer::new(config, store.clone());
    server
        .run(listener, shutdown.signal())
        .await
        .map_err(StartupError::Serve)?;

    store.close().await;
    Ok(())
}
