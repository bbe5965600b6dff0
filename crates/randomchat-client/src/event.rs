//! Connection events, transport notices and actions.

use std::fmt;

/// Identifies one transport connection.
///
/// Allocated by [`crate::ConnectionManager::start_session`], strictly
/// increasing. Notices tagged with an id other than the live one are stale
/// and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection#{}", self.0)
    }
}

/// Events the connection manager emits upward, in transport delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Transport confirmed the connection.
    Opened,

    /// One inbound text frame, unparsed.
    MessageReceived(String),

    /// Connection closed, by either side or by the network.
    Closed,

    /// A send was attempted while no connection was open.
    SendFailed {
        /// The text that was not sent.
        text: String,
    },
}

/// What the transport observed on a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Handshake completed.
    Opened,

    /// Text frame received.
    Text(String),

    /// Connection ended, or failed to open.
    Closed {
        /// Close reason or error, if any.
        reason: Option<String>,
    },
}

/// A [`TransportEvent`] tagged with the connection it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportNotice {
    /// Connection the event belongs to.
    pub connection: ConnectionId,
    /// What happened.
    pub event: TransportEvent,
}

impl TransportNotice {
    /// Handshake completed on `connection`.
    pub fn opened(connection: ConnectionId) -> Self {
        Self { connection, event: TransportEvent::Opened }
    }

    /// Text frame received on `connection`.
    pub fn text(connection: ConnectionId, text: impl Into<String>) -> Self {
        Self { connection, event: TransportEvent::Text(text.into()) }
    }

    /// `connection` ended.
    pub fn closed(connection: ConnectionId, reason: Option<String>) -> Self {
        Self { connection, event: TransportEvent::Closed { reason } }
    }
}

/// Instructions for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    /// Open a WebSocket to `url`.
    Connect {
        /// Id to tag all notices for this connection with.
        connection: ConnectionId,
        /// Full `ws://` URL.
        url: String,
    },

    /// Send one text frame.
    Transmit {
        /// Target connection.
        connection: ConnectionId,
        /// Encoded frame.
        payload: String,
    },

    /// Drop the connection immediately, discarding in-flight sends.
    Disconnect {
        /// Connection to drop.
        connection: ConnectionId,
    },
}

/// Actions the connection manager produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionAction {
    /// Hand this command to the transport.
    Transport(TransportCommand),

    /// Deliver this event to the session state machine.
    Emit(ConnectionEvent),
}
