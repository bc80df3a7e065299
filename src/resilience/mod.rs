//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     → retries.rs (probe the store every `interval` until `deadline`)
//!     → give up with the last probe error once the deadline passes
//! ```
//!
//! # Design Decisions
//! - The readiness wait is the only retry loop in the service
//! - Request handling never retries; clients may retry a failed vote
//! - Interval and deadline come from configuration, not constants

pub mod retries;

pub use retries::{wait_until_ready, RetryPolicy};
