//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the axum Router with every route and middleware layer
//! - Bind the router to a listener and serve until shutdown
//!
//! The router is an ordinary value: tests build one with [`build_router`]
//! over any [`VoteStore`] and drive it without a socket.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::VoteConfig;
use crate::http::handlers;
use crate::http::middleware::cors;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::observability::metrics;
use crate::store::VoteStore;
use crate::votes::VoteOptions;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub options: Arc<VoteOptions>,
    pub store: Arc<dyn VoteStore>,
}

impl AppState {
    pub fn new(options: VoteOptions, store: Arc<dyn VoteStore>) -> Self {
        Self {
            options: Arc::new(options),
            store,
        }
    }
}

/// Build the axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, config: &VoteConfig) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/vote",
            post(handlers::cast_vote).fallback(handlers::method_not_allowed),
        )
        .route(
            "/counts",
            get(handlers::counts).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request.request_id(),
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4));

    cors::apply(router)
}

/// HTTP server for the vote service.
pub struct HttpServer {
    router: Router,
    config: VoteConfig,
}

impl HttpServer {
    /// Create a new HTTP server over `store` with the given configuration.
    pub fn new(config: VoteConfig, store: Arc<dyn VoteStore>) -> Self {
        let state = AppState::new(config.options.clone(), store);
        let router = build_router(state, &config);
        Self { router, config }
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            options = ?self.config.options,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// A copy of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
