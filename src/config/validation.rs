//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port, pool size, timeouts)
//! - Check the option set is usable (non-empty, no blanks or duplicates)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: VoteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::VoteConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("at least one vote option is required")]
    NoOptions,

    #[error("vote option #{0} is blank")]
    BlankOption(usize),

    #[error("vote option `{0}` is listed more than once")]
    DuplicateOption(String),

    #[error("database.max_connections must be non-zero")]
    ZeroPoolSize,

    #[error("database.readiness.interval_ms must be non-zero")]
    ZeroRetryInterval,

    #[error("database.readiness deadline is shorter than one retry interval")]
    DeadlineShorterThanInterval,

    #[error("timeouts.request_secs must be non-zero")]
    ZeroRequestTimeout,

    #[error("telemetry.otlp_endpoint `{0}` is not a valid URL")]
    InvalidOtlpEndpoint(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &VoteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.options.is_empty() {
        errors.push(ValidationError::NoOptions);
    }
    let mut seen = HashSet::new();
    for (i, option) in config.options.iter().enumerate() {
        if option.trim().is_empty() {
            errors.push(ValidationError::BlankOption(i + 1));
        } else if !seen.insert(option) {
            errors.push(ValidationError::DuplicateOption(option.to_string()));
        }
    }

    if config.database.max_connections == 0 {
        errors.push(ValidationError::ZeroPoolSize);
    }

    let readiness = &config.database.readiness;
    if readiness.interval_ms == 0 {
        errors.push(ValidationError::ZeroRetryInterval);
    } else if readiness.deadline() < readiness.interval() {
        errors.push(ValidationError::DeadlineShorterThanInterval);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.telemetry.enabled && Url::parse(&config.telemetry.endpoint_url()).is_err() {
        errors.push(ValidationError::InvalidOtlpEndpoint(
            config.telemetry.otlp_endpoint.clone(),
        ));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
