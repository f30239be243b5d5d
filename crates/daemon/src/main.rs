//! Triage Queue - Main Entry Point
//! Serves one in-memory triage queue over JSON-RPC

mod config;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat};
use triage_api_rpc::RpcServer;
use triage_core::port::SystemTimeProvider;
use triage_core::TriageQueue;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env().context("Invalid configuration")?;

    // 2. Initialize logging
    init_logging(config.log_format)?;

    info!("Triage Queue v{} starting...", VERSION);

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let queue = Arc::new(TriageQueue::new(time_provider));

    // 4. Start JSON-RPC server
    let rpc_server = RpcServer::new(config.rpc.clone(), queue.clone());
    let (rpc_handle, local_addr) = rpc_server
        .start()
        .await
        .context("RPC server start failed")?;

    info!(addr = %local_addr, "✅ System ready. Waiting for patients...");
    info!("Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    if tokio::time::timeout(config.shutdown_grace, rpc_handle.stopped())
        .await
        .is_err()
    {
        warn!(
            grace_secs = config.shutdown_grace.as_secs(),
            "RPC server did not stop within grace period"
        );
    }

    let stats = queue.stats();
    info!(
        waiting = stats.waiting,
        served = stats.served,
        admitted = stats.admitted,
        "Shutdown complete. Waiting entries are not persisted."
    );

    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("triage=info"))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}
