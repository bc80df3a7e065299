//! Structured logging.
//!
//! `RUST_LOG` wins when set; otherwise the configured default filter applies.
//! The filter is attached to the fmt layer only and never hides exported spans.

use tracing::Subscriber;
use tracing_subscriber::{fmt, registry::LookupSpan, EnvFilter, Layer};

pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}

pub fn fmt_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer().with_target(true)
}
