//! Students API - A small CRUD HTTP service for student records

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use students_api::{server, Config};

/// Main entry point for the students API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Resolve a free port, connect to the store, build the router, bind
/// 4. Serve until SIGINT/SIGTERM, then shut down gracefully
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "students_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Students API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: host={}, start_port={}, storage={:?}, database={}",
        config.bind_host, config.start_port, config.storage, config.mongodb_database
    );

    if let Err(err) = server::run(config).await {
        error!("Startup failed: {:#}", err);
        return Err(err);
    }

    Ok(())
}
