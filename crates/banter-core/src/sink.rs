//! The seam between the chat room and the transport layer.

use crate::events::ServerEvent;
use crate::ids::ConnectionId;

/// Outbound event delivery, owned by the transport layer.
///
/// Emission is fire-and-forget: implementations enqueue onto each
/// connection's send queue and must never block. Delivery failures are
/// a transport concern and do not surface back into room state.
pub trait EventSink: Send + Sync {
    /// Send an event to a single connection. Unknown or dead
    /// connections are ignored.
    fn send_to(&self, id: &ConnectionId, event: &ServerEvent);

    /// Send an event to every live connection.
    fn send_to_all(&self, event: &ServerEvent);
}
