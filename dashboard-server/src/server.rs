//! HTTP server lifecycle for the dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use vmix_integration::IntegrationService;

use crate::config::DashboardConfig;
use crate::router::routes;

/// Failures while starting the dashboard server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Every port in the configured range was taken
    #[error("No available port found in range {start}-{end}")]
    NoAvailablePort { start: u16, end: u16 },
}

/// Running dashboard HTTP server.
///
/// The server binds the first free port starting at the configured one,
/// serves the routes from [`crate::router`] on a background task and stops
/// gracefully on [`shutdown`](Self::shutdown).
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use dashboard_server::{DashboardConfig, DashboardServer};
/// # use vmix_integration::IntegrationService;
/// # #[tokio::main]
/// # async fn main() {
/// let config = DashboardConfig::default();
/// let service = Arc::new(IntegrationService::new(config.integration.clone()).unwrap());
///
/// let server = DashboardServer::start(&config, service).await.unwrap();
/// println!("Dashboard at {}", server.base_url());
///
/// server.shutdown().await;
/// # }
/// ```
pub struct DashboardServer {
    addr: SocketAddr,
    base_url: String,
    shutdown_tx: Option<watch::Sender<bool>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
}

impl DashboardServer {
    /// Bind and start serving.
    ///
    /// Ports `config.port ..= config.port + config.port_attempts - 1` are tried
    /// in order; a busy port moves on to the next one.
    pub async fn start(
        config: &DashboardConfig,
        service: Arc<IntegrationService>,
    ) -> Result<Self, ServerError> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let routes = routes(service);

        let start = config.port;
        let end = start.saturating_add(config.port_attempts.saturating_sub(1));

        for port in start..=end {
            let mut signal = shutdown_rx.clone();
            let shutdown = async move {
                // A dropped sender also means shut down
                let _ = signal.changed().await;
            };

            let bind_addr = SocketAddr::new(config.bind_host, port);
            match warp::serve(routes.clone()).try_bind_with_graceful_shutdown(bind_addr, shutdown) {
                Ok((addr, server)) => {
                    let server_handle = tokio::spawn(server);
                    let base_url = format!("http://{}", addr);
                    info!(%addr, "Dashboard listening");

                    return Ok(Self {
                        addr,
                        base_url,
                        shutdown_tx: Some(shutdown_tx),
                        server_handle: Some(server_handle),
                    });
                }
                Err(e) => {
                    warn!(port, error = %e, "Port is busy, trying next");
                }
            }
        }

        Err(ServerError::NoAvailablePort { start, end })
    }

    /// Address the server is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// `http://<bind address>:<port>`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(true);
        }

        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
        debug!(addr = %self.addr, "Dashboard stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr, TcpListener};
    use vmix_integration::IntegrationConfig;

    fn local_config(port: u16, port_attempts: u16) -> DashboardConfig {
        DashboardConfig {
            bind_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            port_attempts,
            integration: IntegrationConfig::default(),
        }
    }

    fn service() -> Arc<IntegrationService> {
        Arc::new(IntegrationService::new(IntegrationConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_start_on_ephemeral_port() {
        let server = DashboardServer::start(&local_config(0, 1), service())
            .await
            .unwrap();

        assert_ne!(server.port(), 0);
        assert!(server.base_url().ends_with(&server.port().to_string()));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_busy_port_moves_to_next() {
        let blocker = TcpListener::bind("127.0.0.1:0").unwrap();
        let busy = blocker.local_addr().unwrap().port();

        match DashboardServer::start(&local_config(busy, 20), service()).await {
            Ok(server) => {
                assert!(server.port() > busy);
                server.shutdown().await;
            }
            // Everything after the busy port may be taken on a crowded machine
            Err(ServerError::NoAvailablePort { start, .. }) => assert_eq!(start, busy),
        }
    }

    #[tokio::test]
    async fn test_single_busy_port_fails() {
        let blocker = TcpListener::bind("127.0.0.1:0").unwrap();
        let busy = blocker.local_addr().unwrap().port();

        let result = DashboardServer::start(&local_config(busy, 1), service()).await;
        assert!(matches!(
            result,
            Err(ServerError::NoAvailablePort { start, end }) if start == busy && end == busy
        ));
    }
}
