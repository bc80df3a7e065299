//! Configuration schema definitions.
//!
//! Every section has defaults, so an empty TOML file and an empty
//! environment both produce a runnable configuration.

use serde::{Deserialize, Serialize};

use crate::resilience::RetryPolicy;
use crate::votes::VoteOptions;

/// Root configuration for the vote service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct VoteConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Relational store settings.
    pub database: DatabaseConfig,

    /// Options a vote may select, in reporting order.
    pub options: VoteOptions,

    /// Trace export settings.
    pub telemetry: TelemetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string.
    pub url: String,

    /// Pool size.
    pub max_connections: u32,

    /// How long a request waits for a pooled connection.
    pub acquire_timeout_secs: u64,

    /// Startup wait for the database to become reachable.
    pub readiness: RetryPolicy,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://postgres:postgres@db:5432/votes?sslmode=disable".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
            readiness: RetryPolicy::default(),
        }
    }
}

/// OpenTelemetry trace export.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Export spans at all.
    pub enabled: bool,

    /// OTLP/gRPC collector endpoint. A bare `host:port` is treated as `http://host:port`.
    pub otlp_endpoint: String,

    /// `service.name` resource attribute.
    pub service_name: String,
}

impl TelemetryConfig {
    /// Endpoint with a scheme, as the gRPC exporter expects.
    pub fn endpoint_url(&self) -> String {
        if self.otlp_endpoint.contains("://") {
            self.otlp_endpoint.clone()
        } else {
            format!("http://{}", self.otlp_endpoint)
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            otlp_endpoint: "otel-collector:4317".to_string(),
            service_name: "ashes-vote-backend".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Prometheus endpoint bind address. Metrics export is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "ashes_vote=debug,tower_http=debug".to_string(),
            metrics_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: VoteConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.options, VoteOptions::default());
        assert_eq!(config.database.readiness, RetryPolicy::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: VoteConfig = toml::from_str(
            r#"
            options = ["red", "blue"]

            [database.readiness]
            interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.options, VoteOptions::new(["red", "blue"]));
        assert_eq!(config.database.readiness.interval_ms, 250);
        assert_eq!(config.database.readiness.deadline_secs, 30);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn bare_collector_endpoint_gets_http_scheme() {
        let mut telemetry = TelemetryConfig::default();
        assert_eq!(telemetry.endpoint_url(), "http://otel-collector:4317");

        telemetry.otlp_endpoint = "https://collector.internal:4317".into();
        assert_eq!(telemetry.endpoint_url(), "https://collector.internal:4317");
    }
}
