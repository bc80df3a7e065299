//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware stack)
//!     → middleware/cors.rs (OPTIONS short-circuit, CORS headers)
//!     → request.rs (request ID)
//!     → handlers.rs (/health, /vote, /counts)
//!     → votes::{ingest, tally} → store
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
