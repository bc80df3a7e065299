//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file ($VOTE_CONFIG, loader.rs)
//!     → environment overrides (loader.rs, .env honoured)
//!     → validation.rs (semantic checks)
//!     → VoteConfig (validated, immutable)
//!     → handed to startup, pieces shared with subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the option set never changes at runtime
//! - All fields have defaults to allow an empty environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    DatabaseConfig, ListenerConfig, ObservabilityConfig, SecurityConfig, TelemetryConfig,
    TimeoutConfig, VoteConfig,
};
pub use validation::ValidationError;
