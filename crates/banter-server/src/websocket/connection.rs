//! WebSocket client connection state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use banter_core::ConnectionId;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Allocate a fresh transport-issued connection token.
pub fn next_connection_id() -> ConnectionId {
    ConnectionId::new(format!("conn_{}", Uuid::now_v7()))
}

/// A connected WebSocket client's send side and liveness state.
pub struct ClientConnection {
    /// Transport-issued connection ID.
    pub id: ConnectionId,
    /// Send channel to the connection's WebSocket write task.
    tx: mpsc::Sender<Arc<String>>,
    /// Whether the client responded since the last liveness check.
    is_alive: AtomicBool,
    /// When the last Pong (or any activity) was received.
    last_pong: Mutex<Instant>,
    /// Count of messages dropped due to a full or closed channel.
    dropped: AtomicU64,
}

impl ClientConnection {
    /// Create a new connection.
    pub fn new(id: ConnectionId, tx: mpsc::Sender<Arc<String>>) -> Self {
        Self {
            id,
            tx,
            is_alive: AtomicBool::new(true),
            last_pong: Mutex::new(Instant::now()),
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueue a text message for the client.
    ///
    /// Returns `false` if the channel is full or closed, and increments
    /// the dropped message counter.
    pub fn send(&self, message: Arc<String>) -> bool {
        if self.tx.try_send(message).is_ok() {
            true
        } else {
            let _ = self.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Total messages dropped for this connection.
    pub fn drop_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Mark the connection as alive (pong or any frame received).
    pub fn mark_alive(&self) {
        self.is_alive.store(true, Ordering::Relaxed);
        *self.last_pong.lock() = Instant::now();
    }

    /// Duration since the last pong (or connection establishment).
    pub fn last_pong_elapsed(&self) -> Duration {
        self.last_pong.lock().elapsed()
    }

    /// Check and reset the alive flag for the heartbeat.
    ///
    /// Returns `true` if the connection was alive since the last check.
    pub fn check_alive(&self) -> bool {
        self.is_alive.swap(false, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_connection() -> (ClientConnection, mpsc::Receiver<Arc<String>>) {
        let (tx, rx) = mpsc::channel(32);
        (ClientConnection::new(ConnectionId::from("conn_1"), tx), rx)
    }

    #[test]
    fn id_generation_is_unique() {
        assert_ne!(next_connection_id(), next_connection_id());
        assert!(next_connection_id().as_str().starts_with("conn_"));
    }

    #[tokio::test]
    async fn send_delivers_message() {
        let (conn, mut rx) = make_connection();
        assert!(conn.send(Arc::new("hello".into())));
        let msg = rx.recv().await.unwrap();
        assert_eq!(&*msg, "hello");
    }

    #[tokio::test]
    async fn send_to_closed_channel_returns_false() {
        let (tx, rx) = mpsc::channel(32);
        let conn = ClientConnection::new(ConnectionId::from("conn_2"), tx);
        drop(rx);
        assert!(!conn.send(Arc::new("hello".into())));
        assert_eq!(conn.drop_count(), 1);
    }

    #[tokio::test]
    async fn send_to_full_channel_counts_drop() {
        let (tx, _rx) = mpsc::channel(1);
        let conn = ClientConnection::new(ConnectionId::from("conn_3"), tx);
        assert!(conn.send(Arc::new("msg1".into())));
        // Channel is now full
        assert!(!conn.send(Arc::new("msg2".into())));
        assert_eq!(conn.drop_count(), 1);
    }

    #[test]
    fn mark_alive_and_check() {
        let (conn, _rx) = make_connection();
        // Initially alive
        assert!(conn.check_alive());
        // After check, no longer alive until the next pong
        assert!(!conn.check_alive());
        conn.mark_alive();
        assert!(conn.check_alive());
    }

    #[test]
    fn last_pong_elapsed_resets_on_mark_alive() {
        let (conn, _rx) = make_connection();
        std::thread::sleep(Duration::from_millis(10));
        let before = conn.last_pong_elapsed();
        conn.mark_alive();
        assert!(conn.last_pong_elapsed() < before);
    }
}
