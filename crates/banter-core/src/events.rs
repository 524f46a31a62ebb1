//! Wire vocabulary: events exchanged with chat clients.
//!
//! Everything on the socket is a JSON envelope of the form
//! `{"event": "<name>", "data": {...}}`, with snake_case event names.

use serde::{Deserialize, Serialize};

/// Events a client may send to the relay.
///
/// Deserialization is strict: an envelope whose `data` lacks a required
/// field is a contract violation and fails to decode. The transport
/// layer abandons that single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Post a chat message to the room.
    SendMessage {
        /// Arbitrary message text; no length or content validation.
        message: String,
    },
    /// Request a new display name.
    UpdateUsername {
        /// The requested new name; no uniqueness or character checks.
        username: String,
    },
}

/// Events the relay emits to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A user completed the connect handshake. Sent to everyone,
    /// the new connection included.
    UserJoined {
        /// Assigned display name.
        username: String,
        /// Assigned avatar URL.
        avatar: String,
    },
    /// Tells a newly connected client its own assigned name.
    /// Sent to that client only.
    SetUsername {
        /// Assigned display name.
        username: String,
    },
    /// A user disconnected. Sent to all remaining connections.
    UserLeft {
        /// The departed user's display name.
        username: String,
    },
    /// A chat message, relayed to everyone including the sender.
    NewMessage {
        /// Sender's display name.
        username: String,
        /// Sender's avatar URL.
        avatar: String,
        /// The message text, passed through verbatim.
        message: String,
    },
    /// A user changed their display name. Sent to everyone.
    UsernameUpdated {
        /// Name before the change.
        old_username: String,
        /// Name after the change.
        new_username: String,
    },
}
