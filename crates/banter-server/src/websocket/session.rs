//! WebSocket session lifecycle — one connected client from upgrade
//! through disconnect.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use banter_core::{ChatRoom, ClientEvent, ConnectionId};
use futures::{SinkExt, StreamExt};
use metrics::{counter, gauge};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::broadcast::Broadcaster;
use super::connection::ClientConnection;
use crate::config::ServerConfig;
use crate::metrics::{
    CHAT_MESSAGES_TOTAL, RENAMES_TOTAL, WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL,
    WS_DISCONNECTIONS_TOTAL,
};

/// Run a WebSocket session for a connected client.
///
/// 1. Registers the connection with the broadcaster
/// 2. Joins the room (assigns identity, announces the join)
/// 3. Forwards outbound events and periodic Ping frames
/// 4. Dispatches inbound text frames as chat events
/// 5. Leaves the room and unregisters on disconnect
#[instrument(skip_all, fields(connection = %id))]
pub async fn run_ws_session(
    ws: WebSocket,
    id: ConnectionId,
    room: Arc<ChatRoom>,
    broadcaster: Arc<Broadcaster>,
    config: Arc<ServerConfig>,
) {
    let (mut ws_tx, mut ws_rx) = ws.split();

    let (send_tx, mut send_rx) = mpsc::channel::<Arc<String>>(config.send_queue_capacity);
    let connection = Arc::new(ClientConnection::new(id.clone(), send_tx));

    info!("client connected");
    counter!(WS_CONNECTIONS_TOTAL).increment(1);
    gauge!(WS_CONNECTIONS_ACTIVE).increment(1.0);

    // Register before joining so the new client receives its own
    // user_joined broadcast.
    broadcaster.add(connection.clone());
    let record = room.connect(&id, broadcaster.as_ref());
    debug!(username = %record.username, "identity assigned");

    let ping_interval = Duration::from_secs(config.heartbeat_interval_secs);
    let pong_timeout = Duration::from_secs(config.heartbeat_timeout_secs);

    // Outbound forwarder with periodic Ping frames. Exits on send
    // failure, channel close, or pong timeout; the inbound loop below
    // follows it down so cleanup always runs.
    let outbound_conn = connection.clone();
    let mut outbound = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ping_interval);
        // Skip the immediate first tick
        let _ = ticker.tick().await;

        loop {
            tokio::select! {
                msg = send_rx.recv() => {
                    match msg {
                        Some(text) => {
                            if ws_tx.send(Message::Text(text.as_str().into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    if !outbound_conn.check_alive()
                        && outbound_conn.last_pong_elapsed() > pong_timeout
                    {
                        warn!("client unresponsive for {pong_timeout:?}, disconnecting");
                        break;
                    }
                    if ws_tx.send(Message::Ping(vec![].into())).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Inbound loop: each frame is handled to completion before the
    // next is read. Also watches the outbound task so a pong-timeout
    // disconnect tears the session down even if the peer stays open.
    loop {
        tokio::select! {
            _ = &mut outbound => break,
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        dispatch(text.as_str(), &id, &room, &broadcaster);
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("client sent close frame");
                        break;
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => connection.mark_alive(),
                    Some(Ok(Message::Binary(_))) => debug!("ignoring binary frame"),
                    Some(Err(_)) | None => break,
                }
            }
        }
    }

    info!(dropped = connection.drop_count(), "client disconnected");
    counter!(WS_DISCONNECTIONS_TOTAL).increment(1);
    gauge!(WS_CONNECTIONS_ACTIVE).decrement(1.0);
    outbound.abort();

    // Unregister first so user_left reaches only the remaining clients.
    broadcaster.remove(&id);
    let _ = room.disconnect(&id, broadcaster.as_ref());
}

/// Decode one text frame and apply it to the room.
///
/// A frame that fails to decode, or a rename without a registered
/// record, abandons that single event: it is logged at `warn` and the
/// session keeps running. Other connections are never affected.
fn dispatch(text: &str, id: &ConnectionId, room: &ChatRoom, broadcaster: &Arc<Broadcaster>) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "malformed client event dropped");
            return;
        }
    };

    match event {
        ClientEvent::SendMessage { message } => {
            if room.message(id, &message, broadcaster.as_ref()) {
                counter!(CHAT_MESSAGES_TOTAL).increment(1);
            }
        }
        ClientEvent::UpdateUsername { username } => {
            match room.rename(id, &username, broadcaster.as_ref()) {
                Ok(()) => counter!(RENAMES_TOTAL).increment(1),
                Err(e) => warn!(error = %e, "rename rejected"),
            }
        }
    }
}
