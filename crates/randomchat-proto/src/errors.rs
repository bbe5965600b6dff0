//! Protocol error types.

use thiserror::Error;

/// Convenience alias for protocol results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or validating frames.
///
/// Inbound classification on the client never returns these; they are only
/// raised by encoders and by the server's strict decoding of client frames.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame could not be serialized.
    #[error("JSON encode failed: {0}")]
    JsonEncode(String),

    /// Frame is not valid JSON or lacks required fields.
    #[error("JSON decode failed: {0}")]
    JsonDecode(String),

    /// Frame carried a `kind` the receiver does not accept.
    #[error("unexpected frame kind: {0:?}")]
    UnexpectedKind(String),

    /// Frame carried a sender/receiver pair other than client → server.
    #[error("invalid routing: sender {sender:?}, receiver {receiver:?}")]
    InvalidRouting {
        /// Claimed sender.
        sender: String,
        /// Claimed receiver.
        receiver: String,
    },
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() { Self::JsonEncode(err.to_string()) } else { Self::JsonDecode(err.to_string()) }
    }
}
