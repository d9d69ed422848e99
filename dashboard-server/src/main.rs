use std::sync::Arc;

use dashboard_server::{DashboardConfig, DashboardServer};
use tracing::info;
use vmix_integration::{logging, IntegrationService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging_from_env()?;

    let config = DashboardConfig::from_env()?;
    info!(
        endpoint = %config.integration.endpoint,
        mode = %config.integration.initial_mode,
        "Starting vMix dashboard"
    );

    let service = Arc::new(IntegrationService::new(config.integration.clone())?);
    let server = DashboardServer::start(&config, service).await?;
    info!(url = %server.base_url(), "Server running");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.shutdown().await;

    Ok(())
}
