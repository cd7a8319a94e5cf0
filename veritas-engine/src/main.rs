//! veritas-engine - Autonomous content trust-scoring service
//!
//! Runs the scheduling agent against the synthetic feed, scoring content
//! continuously until a shutdown signal arrives. ML collaborators are not
//! wired in this binary, so analysis runs on the deterministic keyword
//! fallback; a deployment embeds the engine as a library and supplies its
//! own classifier, matcher, and transcriber implementations.

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use veritas_common::config::{self, EngineConfig};
use veritas_engine::services::SampleFeed;
use veritas_engine::{Collaborators, Engine};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting veritas-engine");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let engine_config = EngineConfig::load(None)?;
    config::log_overrides(&engine_config);

    let feed = Arc::new(SampleFeed::from_entropy());
    let engine = Engine::new(&engine_config, Collaborators::default(), feed);
    info!("No ML collaborators configured; keyword fallback analysis active");

    engine.start_agent();

    shutdown_signal().await;

    engine.stop_agent().await;

    let summary = engine.summary();
    let status = engine.status();
    info!(
        items_processed = status.items_processed,
        logged = summary.count,
        average_trust_score = summary.average_trust_score,
        "veritas-engine shutdown complete"
    );
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
