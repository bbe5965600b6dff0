//! Connection manager errors.

use thiserror::Error;

use crate::ConnectionId;

/// Errors returned by [`crate::ConnectionManager`] intents.
///
/// Only `start_session` can fail; sends on a closed connection are reported
/// as [`crate::ConnectionEvent::SendFailed`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// A connection is already open or opening.
    #[error("already connected ({connection})")]
    AlreadyConnected {
        /// The live connection.
        connection: ConnectionId,
    },
}
