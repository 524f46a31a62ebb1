//! Opaque identifiers issued by the transport layer.

use serde::{Deserialize, Serialize};

/// Unique identifier for one live transport connection.
///
/// Issued by the transport layer when a socket is accepted. The room
/// only ever uses it as a lookup key; it is never displayed to users
/// and never parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Wrap a transport-issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConnectionId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for ConnectionId {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_token_verbatim() {
        let id = ConnectionId::new("conn_abc123");
        assert_eq!(id.as_str(), "conn_abc123");
    }

    #[test]
    fn display_matches_token() {
        let id = ConnectionId::from("conn_1");
        assert_eq!(id.to_string(), "conn_1");
    }

    #[test]
    fn equality_is_by_token() {
        assert_eq!(ConnectionId::from("a"), ConnectionId::new("a"));
        assert_ne!(ConnectionId::from("a"), ConnectionId::from("b"));
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = std::collections::HashMap::new();
        let _ = map.insert(ConnectionId::from("k"), 1);
        assert_eq!(map.get(&ConnectionId::from("k")), Some(&1));
    }
}
