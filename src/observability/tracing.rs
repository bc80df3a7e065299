//! Distributed tracing support.
//!
//! # Responsibilities
//! - Build the OTLP/gRPC span exporter and batch tracer provider
//! - Bridge `tracing` spans into OpenTelemetry
//! - Flush and shut the provider down on exit
//! - Choose which spans are exported, independent of the log filter
//!
//! # Design Decisions
//! - The collector connection is lazy; an absent collector only costs dropped spans
//! - `service.name` comes from configuration

use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::Level;
use tracing_subscriber::filter::Targets;

use crate::config::TelemetryConfig;

const INSTRUMENTATION_NAME: &str = "ashes-vote";

/// Build and globally register a tracer provider exporting to the collector.
pub fn init_provider(config: &TelemetryConfig) -> Result<TracerProvider, TraceError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.endpoint_url())
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new([KeyValue::new(
            "service.name",
            config.service_name.clone(),
        )]))
        .build();

    opentelemetry::global::set_tracer_provider(provider.clone());
    Ok(provider)
}

pub fn otel_layer<S>(
    provider: &TracerProvider,
) -> tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    tracing_opentelemetry::layer().with_tracer(provider.tracer(INSTRUMENTATION_NAME))
}

/// Spans that reach the collector: this crate's, at info and above.
pub fn export_filter() -> Targets {
    Targets::new().with_target("ashes_vote", Level::INFO)
}

/// Owns the tracer provider for the life of the process.
///
/// Dropping the guard flushes buffered spans.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl TelemetryGuard {
    pub fn new(provider: Option<TracerProvider>) -> Self {
        Self { provider }
    }

    pub fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }

    /// Flush buffered spans and shut the provider down.
    ///
    /// The batch exporter runs as a task on the tokio runtime and the flush
    /// blocks until that task answers. On a current-thread runtime the flush
    /// is handed to a helper thread and not awaited, so buffered spans may be
    /// lost there. Returns whether the flush completed.
    pub fn shutdown(&mut self) -> bool {
        let Some(provider) = self.provider.take() else {
            return false;
        };

        let current_thread = Handle::try_current()
            .map(|handle| matches!(handle.runtime_flavor(), RuntimeFlavor::CurrentThread))
            .unwrap_or(false);
        if current_thread {
            tracing::warn!("Current-thread runtime; trace flush will not be awaited");
            std::thread::spawn(move || flush(provider));
            return false;
        }

        flush(provider)
    }
}

fn flush(provider: TracerProvider) -> bool {
    match provider.shutdown() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to flush trace exporter");
            false
        }
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}
