//! banter-server - REST intake server binary.

use std::net::SocketAddr;

use banter_core::config::BotConfig;
use banter_server::{create_server, factory};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("banter_server=debug".parse().unwrap()),
        )
        .init();

    // Resolve configuration: a config file when given, environment otherwise
    let config = match std::env::var("BANTER_CONFIG") {
        Ok(path) => BotConfig::from_file(&path)?,
        Err(_) => BotConfig::from_env(),
    };

    let host = std::env::var("BANTER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("BANTER_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("BANTER_PORT must be a valid port number");

    // Wire store, responder, and idle monitor
    let (state, mut monitor) = factory::build_bot(config).await?;

    // Start the idle monitor
    monitor.start().await?;

    let app = create_server(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting banter-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received, stopping idle monitor...");
        })
        .await?;

    // Explicit shutdown of the idle monitor
    monitor.shutdown().await?;

    info!("Server stopped cleanly");
    Ok(())
}
