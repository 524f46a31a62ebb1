//! Relay error taxonomy.

use thiserror::Error;

use crate::ids::ConnectionId;

/// Errors surfaced to the transport boundary.
///
/// Tolerated absences are deliberately not represented here: a
/// disconnect for an unknown connection and a message from an unknown
/// connection are silent no-ops by design, not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// The operation requires a registered connection that does not
    /// exist. Raised by rename only; see [`crate::room::ChatRoom`].
    #[error("unknown connection: {0}")]
    UnknownConnection(ConnectionId),
}
