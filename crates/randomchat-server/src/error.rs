//! Server error types.

use randomchat_proto::ProtocolError;
use thiserror::Error;

/// Errors that can occur in the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error (invalid bind address).
    ///
    /// Fatal: prevents server startup. Fix configuration and restart.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport/network error (bind failure, I/O error).
    ///
    /// May be transient (network issues) or fatal (bind address in use).
    #[error("transport error: {0}")]
    Transport(String),

    /// A frame could not be encoded or decoded.
    ///
    /// Indicates a bug in the wire types; the affected frame is dropped.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Session already registered.
    ///
    /// Session ids are allocated by the accept loop and must be unique. A
    /// duplicate is a logic bug.
    #[error("session already exists: {0}")]
    SessionAlreadyExists(u64),
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
