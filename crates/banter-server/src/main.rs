//! Relay server binary — wires configuration, metrics, and the HTTP /
//! WebSocket server together.

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use banter_server::config::ServerConfig;
use banter_server::metrics;
use banter_server::server::RelayServer;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Banter chat relay server.
#[derive(Parser, Debug)]
#[command(name = "banter-server", about = "Realtime chat relay")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        ..ServerConfig::default()
    };

    let recorder = metrics::install_recorder();
    let server = RelayServer::new(config).with_metrics(recorder);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;

    tracing::info!("banter relay listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["banter-server"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 5000);
    }

    #[test]
    fn cli_custom_bind() {
        let cli = Cli::parse_from(["banter-server", "--host", "0.0.0.0", "--port", "8080"]);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8080);
    }
}
