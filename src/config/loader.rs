//! Configuration loading from disk and the environment.
//!
//! Precedence, lowest first: built-in defaults, the TOML file named by
//! `VOTE_CONFIG`, then individual environment variables.

use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::VoteConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::votes::VoteOptions;

pub const CONFIG_PATH_VAR: &str = "VOTE_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {key} value `{value}`: {reason}")]
    InvalidVar {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<VoteConfig, ConfigError> {
    let config = read_toml(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load configuration the way the service binary does.
///
/// A `.env` file in the working directory is honoured if present.
pub fn load_from_env() -> Result<VoteConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let base = match env::var(CONFIG_PATH_VAR) {
        Ok(path) => read_toml(Path::new(&path))?,
        Err(_) => VoteConfig::default(),
    };

    let config = apply_env(base, |key| env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so the mapping can be tested
/// without mutating process state. Empty values count as unset.
pub fn apply_env<F>(mut config: VoteConfig, lookup: F) -> Result<VoteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = var("DATABASE_URL") {
        config.database.url = url;
    }
    if let Some(raw) = var("PORT") {
        config.listener.port = parse_var("PORT", raw)?;
    }
    if let Some(raw) = var("DB_MAX_CONNECTIONS") {
        config.database.max_connections = parse_var("DB_MAX_CONNECTIONS", raw)?;
    }
    if let Some(raw) = var("DB_RETRY_INTERVAL_MS") {
        config.database.readiness.interval_ms = parse_var("DB_RETRY_INTERVAL_MS", raw)?;
    }
    if let Some(raw) = var("DB_RETRY_DEADLINE_SECS") {
        config.database.readiness.deadline_secs = parse_var("DB_RETRY_DEADLINE_SECS", raw)?;
    }
    if let Some(raw) = var("VOTE_OPTIONS") {
        config.options = VoteOptions::parse_list(&raw);
    }
    if let Some(endpoint) = var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.telemetry.otlp_endpoint = endpoint;
    }
    if let Some(name) = var("OTEL_SERVICE_NAME") {
        config.telemetry.service_name = name;
    }
    if let Some(raw) = var("OTEL_SDK_DISABLED") {
        let disabled: bool = parse_var("OTEL_SDK_DISABLED", raw.to_ascii_lowercase())?;
        config.telemetry.enabled = !disabled;
    }
    if let Some(addr) = var("METRICS_ADDRESS") {
        config.observability.metrics_address = Some(addr);
    }

    Ok(config)
}

fn read_toml(path: &Path) -> Result<VoteConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

fn parse_var<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidVar {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
