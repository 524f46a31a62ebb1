//! Prometheus metrics recorder and `/metrics` endpoint handler.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics`
/// endpoint. Must be called once at server startup before any metrics
/// are recorded.
pub fn install_recorder() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install metrics recorder");
    info!("prometheus metrics recorder installed");
    handle
}

/// Render Prometheus text format from the installed recorder.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

// Metric name constants to avoid typos across modules.

/// WebSocket connections opened total (counter).
pub const WS_CONNECTIONS_TOTAL: &str = "ws_connections_total";
/// WebSocket disconnections total (counter).
pub const WS_DISCONNECTIONS_TOTAL: &str = "ws_disconnections_total";
/// Active WebSocket connections (gauge).
pub const WS_CONNECTIONS_ACTIVE: &str = "ws_connections_active";
/// Outbound events dropped on a full or closed queue (counter).
pub const WS_BROADCAST_DROPS_TOTAL: &str = "ws_broadcast_drops_total";
/// Chat messages relayed total (counter).
pub const CHAT_MESSAGES_TOTAL: &str = "chat_messages_total";
/// Username changes total (counter).
pub const RENAMES_TOTAL: &str = "renames_total";
