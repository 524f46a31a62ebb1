//! The chat room: connected-user registry plus the four event handlers.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RelayError;
use crate::events::ServerEvent;
use crate::identity::Identity;
use crate::ids::ConnectionId;
use crate::sink::EventSink;

/// One connected user's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name, assigned at connect or set by a rename.
    pub username: String,
    /// Avatar URL assigned at connect; never changes afterwards.
    pub avatar: String,
}

/// The single global room.
///
/// Owns the `ConnectionId` → `UserRecord` registry. Constructed once at
/// server start and shared into every handler invocation; no ambient
/// global state. The mutex is held across both the registry mutation
/// and the broadcast enqueue, so each handler is atomic with respect to
/// the others even when events are dispatched from multiple tasks.
/// Sinks never block, so holding the lock across emission is safe.
pub struct ChatRoom {
    users: Mutex<HashMap<ConnectionId, UserRecord>>,
}

impl ChatRoom {
    /// Create an empty room.
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Handle a completed connect handshake.
    ///
    /// Assigns a random identity, registers the connection, announces
    /// the join to everyone (the new connection included), and tells
    /// the new connection its assigned name. Returns the new record.
    /// Cannot fail.
    pub fn connect(&self, id: &ConnectionId, sink: &dyn EventSink) -> UserRecord {
        self.connect_as(id, Identity::generate(), sink)
    }

    /// Connect with a caller-provided identity.
    ///
    /// Split out from [`connect`](Self::connect) so tests can pin the
    /// assigned username and avatar.
    pub fn connect_as(
        &self,
        id: &ConnectionId,
        identity: Identity,
        sink: &dyn EventSink,
    ) -> UserRecord {
        let record = UserRecord {
            username: identity.username,
            avatar: identity.avatar,
        };

        let mut users = self.users.lock();
        let _ = users.insert(id.clone(), record.clone());
        info!(connection = %id, username = %record.username, "user joined");

        sink.send_to_all(&ServerEvent::UserJoined {
            username: record.username.clone(),
            avatar: record.avatar.clone(),
        });
        sink.send_to(
            id,
            &ServerEvent::SetUsername {
                username: record.username.clone(),
            },
        );
        record
    }

    /// Handle a transport disconnect.
    ///
    /// Removes the connection's record and announces the departure to
    /// everyone still registered. Removing an unknown id is a silent
    /// no-op: duplicate or out-of-order disconnect notifications are
    /// expected and tolerated. Returns the removed record, if any.
    pub fn disconnect(&self, id: &ConnectionId, sink: &dyn EventSink) -> Option<UserRecord> {
        let mut users = self.users.lock();
        let removed = users.remove(id);
        match removed {
            Some(ref record) => {
                info!(connection = %id, username = %record.username, "user left");
                sink.send_to_all(&ServerEvent::UserLeft {
                    username: record.username.clone(),
                });
            }
            None => {
                debug!(connection = %id, "disconnect for unregistered connection ignored");
            }
        }
        removed
    }

    /// Handle an inbound chat message.
    ///
    /// Relays the message to everyone, sender included. A message from
    /// a connection that never completed the connect handshake (or was
    /// already removed) is dropped silently. Returns whether the
    /// message was relayed.
    pub fn message(&self, id: &ConnectionId, message: &str, sink: &dyn EventSink) -> bool {
        let users = self.users.lock();
        let Some(record) = users.get(id) else {
            debug!(connection = %id, "message from unregistered connection dropped");
            return false;
        };
        sink.send_to_all(&ServerEvent::NewMessage {
            username: record.username.clone(),
            avatar: record.avatar.clone(),
            message: message.to_owned(),
        });
        true
    }

    /// Handle a rename request.
    ///
    /// Unlike [`message`](Self::message), a rename from an unregistered
    /// connection is a contract violation: the error propagates to the
    /// boundary, which abandons that single event. The new name is not
    /// validated in any way.
    pub fn rename(
        &self,
        id: &ConnectionId,
        new_username: &str,
        sink: &dyn EventSink,
    ) -> Result<(), RelayError> {
        let mut users = self.users.lock();
        let record = users
            .get_mut(id)
            .ok_or_else(|| RelayError::UnknownConnection(id.clone()))?;

        let old_username = std::mem::replace(&mut record.username, new_username.to_owned());
        info!(connection = %id, old = %old_username, new = %new_username, "username updated");

        sink.send_to_all(&ServerEvent::UsernameUpdated {
            old_username,
            new_username: new_username.to_owned(),
        });
        Ok(())
    }

    /// Look up a connection's record.
    pub fn user(&self, id: &ConnectionId) -> Option<UserRecord> {
        self.users.lock().get(id).cloned()
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.lock().len()
    }
}

impl Default for ChatRoom {
    fn default() -> Self {
        Self::new()
    }
}
