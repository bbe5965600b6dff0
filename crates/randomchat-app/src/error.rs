//! Session errors.
//!
//! None of these is fatal. Each is logged and absorbed into a state
//! transition or a dropped intent.

use thiserror::Error;

use crate::Phase;

/// Errors surfaced by the session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Inbound payload was not a structured frame. Recovered as a System
    /// transcript line.
    #[error("unparseable frame: {raw}")]
    ParseFailure {
        /// Payload as received.
        raw: String,
    },

    /// Send attempted outside a paired chat.
    #[error("not connected to a peer (phase: {phase})")]
    NotConnected {
        /// Phase at the time of the send.
        phase: Phase,
    },

    /// The transport closed while the session was active.
    #[error("transport closed")]
    TransportClosed,

    /// Start requested while a session is active.
    #[error("session already active (phase: {phase})")]
    AlreadyConnected {
        /// Phase at the time of the request.
        phase: Phase,
    },
}
