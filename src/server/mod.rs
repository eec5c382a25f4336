//! Server Module
//!
//! Startup wiring: port resolution, store connection, router and listener.
//!
//! # Startup Sequence
//! 1. Resolve a free port starting at the configured one
//! 2. Connect to the configured store (fails fast if unreachable)
//! 3. Build the router with its middleware stack
//! 4. Bind the listener on the resolved port

pub mod port;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::{Config, StorageBackend};
use crate::store::{MemoryStore, MongoStore, StoreResult, StudentStore};

pub use port::{find_available_port, PortError};

/// Opens the store selected by the configuration.
pub async fn connect_store(config: &Config) -> StoreResult<Arc<dyn StudentStore>> {
    match config.storage {
        StorageBackend::Mongo => {
            let store = MongoStore::connect(&config.mongodb_uri, &config.mongodb_database).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; records are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

// == Server ==
/// A bound, ready-to-run HTTP server.
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    /// Runs the startup sequence up to and including binding the listener.
    ///
    /// No request is accepted until [`Server::run_until`] is called, and a
    /// store connection failure returns before anything is bound.
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let port = find_available_port(config.bind_host, config.start_port, config.max_port_attempts)
            .await
            .context("failed to find an available port")?;
        info!("Found available port: {}", port);

        let store = connect_store(config)
            .await
            .context("failed to connect to the store")?;

        let app = create_router(AppState::from_store(store));

        let addr = SocketAddr::new(config.bind_host, port);
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        Ok(Self { listener, app })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until `shutdown` resolves, then drains connections.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = self.listener.local_addr() {
            info!("Server running on http://{}", addr);
            info!("API documentation at http://{}/api-docs", addr);
        }

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Starts the server and serves until Ctrl+C or SIGTERM.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let server = Server::bind(&config).await?;
    server
        .run_until(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn memory_config() -> Config {
        Config {
            start_port: 0,
            storage: StorageBackend::Memory,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_connect_memory_store() {
        let store = connect_store(&memory_config()).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bind_uses_loopback() {
        let server = Server::bind(&memory_config()).await.unwrap();
        let addr = server.local_addr().unwrap();
        assert_eq!(addr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_fails_when_store_unreachable() {
        let config = Config {
            start_port: 0,
            storage: StorageBackend::Mongo,
            mongodb_uri: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200".to_string(),
            ..Config::default()
        };

        assert!(Server::bind(&config).await.is_err());
    }
}
