//! edge-proxy
//!
//! A path-routed reverse proxy with a plaintext and a TLS listener.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                     EDGE PROXY                       │
//!                  │                                                      │
//!   HTTP  ─────────┼─▶ listener "http"  ─┐                                │
//!                  │                     ├─▶ RouteTable ─┬─▶ ProxyRoute ──┼──▶ Upstream
//!   HTTPS ─────────┼─▶ listener "https" ─┘   (per        │   (gunzip if   │
//!                  │                          listener)  │    needed)     │
//!                  │                                     └─▶ StaticRoute  │
//!                  │                                         (ServeDir)   │
//!                  │                                                      │
//!                  │  ListenerManager: concurrent start, 60s drain        │
//!                  └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use edge_proxy::config::loader::read_config;
use edge_proxy::config::validation::validate_config;
use edge_proxy::lifecycle::{build_manager, shutdown_signal};
use edge_proxy::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "edge-proxy", version, about = "Path-routed reverse proxy", long_about = None)]
struct Cli {
    /// Configuration file (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = "edge-proxy.conf")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = read_config(&cli.config)?;
    let _log_guard = logging::init(&config.log)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "edge-proxy starting"
    );

    if let Err(e) = validate_config(&config) {
        tracing::error!(error = %e, config = %cli.config.display(), "Invalid configuration");
        return Err(e.into());
    }

    let manager = match build_manager(&config) {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let start = manager.start();
    tokio::pin!(start);

    let finished = tokio::select! {
        result = &mut start => Some(result),
        _ = shutdown_signal() => None,
    };

    let result = match finished {
        Some(result) => result,
        None => {
            manager.shutdown().await;
            start.await
        }
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Proxy stopped with an error");
            Err(e.into())
        }
    }
}
