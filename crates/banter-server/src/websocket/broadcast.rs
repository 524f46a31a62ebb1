//! Event fan-out to connected WebSocket clients.

use std::collections::HashMap;
use std::sync::Arc;

use banter_core::{ConnectionId, EventSink, ServerEvent};
use metrics::counter;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::connection::ClientConnection;
use crate::metrics::WS_BROADCAST_DROPS_TOTAL;

/// Registry of live connections; the [`EventSink`] the room emits
/// through.
///
/// Each event is serialized once and fanned out as `Arc<String>`
/// clones onto the per-connection send queues. Enqueueing never
/// blocks; a full or closed queue drops that copy.
pub struct Broadcaster {
    /// Connected clients indexed by connection ID.
    connections: RwLock<HashMap<ConnectionId, Arc<ClientConnection>>>,
}

impl Broadcaster {
    /// Create an empty broadcaster.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Add a connection.
    pub fn add(&self, connection: Arc<ClientConnection>) {
        let _ = self
            .connections
            .write()
            .insert(connection.id.clone(), connection);
    }

    /// Remove a connection by ID. Removing an unknown ID is a no-op.
    pub fn remove(&self, id: &ConnectionId) {
        let _ = self.connections.write().remove(id);
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.read().len()
    }

    fn encode(event: &ServerEvent) -> Option<Arc<String>> {
        match serde_json::to_string(event) {
            Ok(json) => Some(Arc::new(json)),
            Err(e) => {
                warn!(error = %e, "failed to serialize event");
                None
            }
        }
    }
}

impl EventSink for Broadcaster {
    fn send_to(&self, id: &ConnectionId, event: &ServerEvent) {
        let Some(json) = Self::encode(event) else {
            return;
        };
        let conns = self.connections.read();
        match conns.get(id) {
            Some(conn) => {
                if !conn.send(json) {
                    counter!(WS_BROADCAST_DROPS_TOTAL).increment(1);
                    warn!(connection = %id, "failed to enqueue event for client");
                }
            }
            None => debug!(connection = %id, "send_to for unregistered connection"),
        }
    }

    fn send_to_all(&self, event: &ServerEvent) {
        let Some(json) = Self::encode(event) else {
            return;
        };
        let conns = self.connections.read();
        debug!(recipients = conns.len(), "broadcast event");
        for conn in conns.values() {
            if !conn.send(json.clone()) {
                counter!(WS_BROADCAST_DROPS_TOTAL).increment(1);
                warn!(connection = %conn.id, "failed to enqueue event for client");
            }
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
