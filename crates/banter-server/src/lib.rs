//! # banter-server
//!
//! Axum HTTP + `WebSocket` relay server for the banter chat room.
//!
//! - HTTP endpoints: chat page, health check, Prometheus metrics
//! - `WebSocket` gateway: connection registry, heartbeat, event dispatch
//! - Event fan-out to every connected client via per-connection queues
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod health;
pub mod metrics;
pub mod server;
pub mod shutdown;
pub mod websocket;
