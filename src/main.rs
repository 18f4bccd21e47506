//! # Order Intake
//!
//! Starts the HTTP service:
//! 1. Set up tracing.
//! 2. Read [`Config`] from the environment.
//! 3. Build the [`OrderSystem`] with real Gemini and Sheets clients.
//! 4. Serve the router until Ctrl-C.

use order_intake::api::build_app;
use order_intake::config::Config;
use order_intake::lifecycle::{setup_tracing, OrderSystem};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::from_env()?;
    let system = OrderSystem::from_config(&config).await?;
    let app = build_app(system);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
