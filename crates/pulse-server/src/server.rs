use crate::config::ServerConfig;
use crate::routes::router;
use crate::service::PulseService;
use crate::{Error, Result};
use tokio::net::TcpListener;

/// HTTP server for the Pulse API
pub struct PulseServer {
    config: ServerConfig,
    service: PulseService,
}

impl PulseServer {
    pub fn new(config: ServerConfig, service: PulseService) -> Self {
        Self { config, service }
    }

    /// Serve until Ctrl+C
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;

        tracing::info!("Starting Pulse API on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;

        println!("✓ Pulse API listening on http://{}", addr);
        println!();
        println!("Press Ctrl+C to stop the server...");
        println!();

        axum::serve(listener, router(self.service))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Server(format!("Server failed: {}", e)))?;

        println!("✅ Server stopped gracefully");

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down...");
    println!();
    println!("🛑 Shutting down server...");
}
