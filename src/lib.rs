//! Ashes vote service library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod store;
pub mod votes;

pub use config::schema::VoteConfig;
pub use error::AppError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::VoteStore;
