//! Server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the relay server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `5000`; `0` for auto-assign).
    pub port: u16,
    /// Maximum concurrent WebSocket connections; upgrades beyond this
    /// are refused.
    pub max_connections: usize,
    /// Per-connection outbound queue capacity.
    pub send_queue_capacity: usize,
    /// Heartbeat ping interval in seconds.
    pub heartbeat_interval_secs: u64,
    /// Close the connection after this long without a pong.
    pub heartbeat_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            max_connections: 256,
            send_queue_capacity: 256,
            heartbeat_interval_secs: 30,
            heartbeat_timeout_secs: 90,
        }
    }
}
