//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → tracing.rs (spans exported to the OTLP collector)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape (when METRICS_ADDRESS is set)
//!     → OpenTelemetry collector (unless OTEL_SDK_DISABLED)
//! ```
//!
//! # Design Decisions
//! - One `tracing` subscriber feeds both logs and exported spans, each with its own filter
//! - Request ID flows through every request span
//! - Metrics are cheap and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
pub mod tracing;

use opentelemetry_sdk::trace::TracerProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::VoteConfig;

pub use self::tracing::TelemetryGuard;

/// Install the global subscriber: env-filtered fmt logs, plus the
/// OpenTelemetry bridge when telemetry is enabled.
pub fn init(config: &VoteConfig) -> Result<TelemetryGuard, opentelemetry::trace::TraceError> {
    let provider = if config.telemetry.enabled {
        Some(self::tracing::init_provider(&config.telemetry)?)
    } else {
        None
    };

    subscriber(
        logging::env_filter(&config.observability.log_filter),
        provider.as_ref(),
    )
    .init();

    Ok(TelemetryGuard::new(provider))
}

/// Compose the subscriber.
///
/// `log_filter` applies to the fmt layer alone. Exported spans pass through
/// [`tracing::export_filter`], so a quiet `RUST_LOG` never drops vote spans.
pub fn subscriber(
    log_filter: EnvFilter,
    provider: Option<&TracerProvider>,
) -> impl ::tracing::Subscriber + Send + Sync + 'static {
    let otel = provider
        .map(|provider| self::tracing::otel_layer(provider).with_filter(self::tracing::export_filter()));

    tracing_subscriber::registry()
        .with(logging::fmt_layer().with_filter(log_filter))
        .with(otel)
}
