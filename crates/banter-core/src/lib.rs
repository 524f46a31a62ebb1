//! # banter-core
//!
//! Chat room state and broadcast logic for the banter relay.
//!
//! - [`ConnectionId`]: opaque transport-issued connection token
//! - [`ChatRoom`]: the registry of connected users plus the four event
//!   handlers (connect, disconnect, message, rename)
//! - [`ClientEvent`] / [`ServerEvent`]: the wire vocabulary
//! - [`EventSink`]: the seam the room broadcasts through; the transport
//!   layer owns delivery

#![deny(unsafe_code)]

pub mod error;
pub mod events;
pub mod identity;
pub mod ids;
pub mod room;
pub mod sink;

pub use error::RelayError;
pub use events::{ClientEvent, ServerEvent};
pub use identity::Identity;
pub use ids::ConnectionId;
pub use room::{ChatRoom, UserRecord};
pub use sink::EventSink;
