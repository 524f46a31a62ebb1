//! WebSocket transport: connection registry, event fan-out, and the
//! per-client session lifecycle.

pub mod broadcast;
pub mod connection;
pub mod session;
