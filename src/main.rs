//! Ashes vote service.
//!
//! Records votes for one of a fixed set of teams and reports live counts.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────────────┐
//!                 │                     ASHES VOTE                         │
//!                 │                                                        │
//!  Client ────────┼─▶ cors ─▶ request id ─▶ trace ─▶ timeout ─▶ router     │
//!                 │                                            │           │
//!                 │                       ┌────────────────────┼────────┐  │
//!                 │                       ▼                    ▼        ▼  │
//!                 │                   /health            /vote    /counts  │
//!                 │                                        │        │      │
//!                 │                                   votes::ingest tally  │
//!                 │                                        │        │      │
//!                 │                                        ▼        ▼      │
//!                 │                                   store (PgPool) ──────┼──▶ PostgreSQL
//!                 │                                                        │
//!                 │  observability: logs (stdout), spans (OTLP), metrics   │
//!                 └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Environment
//! - `DATABASE_URL`, `PORT`, `OTEL_EXPORTER_OTLP_ENDPOINT`, `VOTE_OPTIONS`
//! - `DB_RETRY_INTERVAL_MS`, `DB_RETRY_DEADLINE_SECS`, `DB_MAX_CONNECTIONS`
//! - `OTEL_SERVICE_NAME`, `OTEL_SDK_DISABLED`, `METRICS_ADDRESS`, `RUST_LOG`
//! - `VOTE_CONFIG` names an optional TOML file applied beneath the variables above

use std::net::SocketAddr;
use std::sync::Arc;

use ashes_vote::config::load_from_env;
use ashes_vote::lifecycle::{signals, startup, Shutdown};
use ashes_vote::observability::{self, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    let mut telemetry = observability::init(&config)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        options = ?config.options,
        exporting_spans = telemetry.is_exporting(),
        "ashes-vote starting"
    );

    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr.parse()?;
        metrics::init_metrics(addr)?;
    }

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(&shutdown);

    let result = startup::run(config, shutdown).await;
    match &result {
        Ok(()) => tracing::info!("Shutdown complete"),
        Err(e) => tracing::error!(error = %e, "Exiting with error"),
    }

    telemetry.shutdown();
    result.map_err(Into::into)
}
