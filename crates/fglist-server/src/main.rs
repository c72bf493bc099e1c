//! FortiGate List Manager HTTP Server
//!
//! Serves the list editor UI, the JSON API and the raw export endpoint used
//! by firewall external connectors.

use anyhow::Result;
use fglist_repository::FileSystemListRepository;
use fglist_server::{
    api,
    config::{LoadedConfig, ServerConfig},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let LoadedConfig {
        config,
        fallback_reason,
    } = ServerConfig::load()?;

    // Initialize tracing
    telemetry::init_tracing(&config)?;
    if let Some(reason) = fallback_reason {
        warn!("No usable config source ({}), using default configuration", reason);
    }
    info!("Loaded configuration: {:?}", config);

    telemetry::ensure_not_root()?;

    // Open repository (creates the base directory if needed)
    let repository = FileSystemListRepository::new(config.repository_config()).await?;
    info!("Managing files in: {}", repository.base_dir().display());
    info!("Change log: {}", repository.change_log_path().display());

    let app = api::create_router(Arc::new(repository));

    // Start server
    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Web UI: http://{}/", addr);
    info!("  Export endpoint: http://{}/export/{{filename}}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
