//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ashes_vote::config::VoteConfig;
use ashes_vote::http::HttpServer;
use ashes_vote::lifecycle::Shutdown;
use ashes_vote::store::MemoryStore;
use ashes_vote::votes::VoteOptions;
use tokio::net::TcpListener;
use vote_sdk::VoteClient;

/// A running server on an ephemeral port over an in-memory store.
///
/// Dropping it stops the server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn client(&self) -> VoteClient {
        VoteClient::with_client(http_client(), &self.url(""))
    }

    #[allow(dead_code)]
    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(VoteOptions::default()).await
}

#[allow(dead_code)]
pub async fn spawn_app_with(options: VoteOptions) -> TestApp {
    let mut config = VoteConfig::default();
    config.options = options;
    config.telemetry.enabled = false;

    let store = Arc::new(MemoryStore::new());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store.clone());
    let signal = shutdown.signal();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    TestApp {
        addr,
        store,
        shutdown,
    }
}

/// Client that never goes through an environment proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
