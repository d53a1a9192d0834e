//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::sync::Arc;

use product_catalog::config::ServiceConfig;
use product_catalog::http::HttpServer;
use product_catalog::lifecycle::Shutdown;
use product_catalog::store::MemoryStore;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running service backed by an in-memory store.
pub struct TestService {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    handle: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(mut self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        let handle = self.handle.take().expect("server already stopped");
        handle.await.expect("server task panicked")
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service on an ephemeral localhost port.
pub async fn start_service() -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = addr.to_string();

    let store = Arc::new(MemoryStore::new());
    let server = HttpServer::new(&config, store.clone());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestService {
        addr,
        store,
        client,
        shutdown,
        handle: Some(handle),
    }
}
