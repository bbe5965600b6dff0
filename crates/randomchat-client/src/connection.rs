//! Connection lifecycle state machine.
//!
//! ```text
//! ┌────────┐ start_session ┌─────────┐  Opened   ┌──────┐
//! │ Closed │──────────────>│ Opening │──────────>│ Open │
//! └────────┘               └─────────┘           └──────┘
//!     ^                         │                    │
//!     │   Closed / end_session  │                    │
//!     └─────────────────────────┴────────────────────┘
//! ```
//!
//! Pure state machine: no I/O, no clock. Every method returns the actions
//! the caller must execute, in order.

use randomchat_proto::ClientMessage;

use crate::{
    ConnectionAction, ConnectionError, ConnectionEvent, ConnectionId, Endpoint, TransportCommand,
    TransportEvent, TransportNotice,
};

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection (initial, or after close).
    Closed,
    /// Connect issued, waiting for the transport to confirm.
    Opening {
        /// Pending connection.
        connection: ConnectionId,
    },
    /// Connection established.
    Open {
        /// Live connection.
        connection: ConnectionId,
    },
}

/// Owns zero or one live transport connection.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    state: ConnectionState,
    /// Last allocated connection id.
    last_connection: u64,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    /// Create a manager with no connection.
    pub fn new() -> Self {
        Self { state: ConnectionState::Closed, last_connection: 0 }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Live or pending connection. `None` if closed.
    pub fn current(&self) -> Option<ConnectionId> {
        match self.state {
            ConnectionState::Closed => None,
            ConnectionState::Opening { connection } | ConnectionState::Open { connection } => {
                Some(connection)
            },
        }
    }

    /// Whether the transport has confirmed the connection.
    pub fn is_open(&self) -> bool {
        matches!(self.state, ConnectionState::Open { .. })
    }

    /// Open a connection to `endpoint`.
    ///
    /// # Errors
    ///
    /// - `ConnectionError::AlreadyConnected` if a connection is open or
    ///   opening
    pub fn start_session(
        &mut self,
        endpoint: &Endpoint,
    ) -> Result<Vec<ConnectionAction>, ConnectionError> {
        if let Some(connection) = self.current() {
            return Err(ConnectionError::AlreadyConnected { connection });
        }

        self.last_connection += 1;
        let connection = ConnectionId::new(self.last_connection);
        self.state = ConnectionState::Opening { connection };

        tracing::debug!(%connection, url = %endpoint, "opening connection");

        Ok(vec![ConnectionAction::Transport(TransportCommand::Connect {
            connection,
            url: endpoint.url(),
        })])
    }

    /// Send `raw` as a chat frame.
    ///
    /// Never fails: when the connection is not open, or the frame cannot be
    /// encoded, a [`ConnectionEvent::SendFailed`] carrying the text is emitted
    /// instead.
    pub fn send_text(&mut self, raw: &str) -> Vec<ConnectionAction> {
        let ConnectionState::Open { connection } = self.state else {
            tracing::debug!(state = ?self.state, "send while not connected");
            return vec![Self::send_failed(raw)];
        };

        match ClientMessage::new(raw).encode() {
            Ok(payload) => {
                vec![ConnectionAction::Transport(TransportCommand::Transmit { connection, payload })]
            },
            Err(e) => {
                tracing::warn!(%connection, error = %e, "failed to encode chat frame");
                vec![Self::send_failed(raw)]
            },
        }
    }

    /// Close the connection if one is open or opening.
    ///
    /// Idempotent: returns no actions when already closed.
    pub fn end_session(&mut self) -> Vec<ConnectionAction> {
        let Some(connection) = self.current() else {
            return vec![];
        };

        self.state = ConnectionState::Closed;
        tracing::debug!(%connection, "closing connection");

        vec![
            ConnectionAction::Transport(TransportCommand::Disconnect { connection }),
            ConnectionAction::Emit(ConnectionEvent::Closed),
        ]
    }

    /// Process a notice from the transport.
    ///
    /// Notices for any connection other than the current one are dropped.
    pub fn handle_transport(&mut self, notice: TransportNotice) -> Vec<ConnectionAction> {
        let TransportNotice { connection, event } = notice;

        if self.current() != Some(connection) {
            tracing::trace!(%connection, ?event, "dropping notice for stale connection");
            return vec![];
        }

        match event {
            TransportEvent::Opened => {
                if self.is_open() {
                    tracing::warn!(%connection, "duplicate open notice");
                    return vec![];
                }
                self.state = ConnectionState::Open { connection };
                tracing::debug!(%connection, "connection open");
                vec![ConnectionAction::Emit(ConnectionEvent::Opened)]
            },
            TransportEvent::Text(raw) => {
                if !self.is_open() {
                    tracing::warn!(%connection, "text frame before open notice");
                    return vec![];
                }
                vec![ConnectionAction::Emit(ConnectionEvent::MessageReceived(raw))]
            },
            TransportEvent::Closed { reason } => {
                self.state = ConnectionState::Closed;
                tracing::debug!(%connection, ?reason, "connection closed by transport");
                vec![
                    ConnectionAction::Transport(TransportCommand::Disconnect { connection }),
                    ConnectionAction::Emit(ConnectionEvent::Closed),
                ]
            },
        }
    }

    fn send_failed(raw: &str) -> ConnectionAction {
        ConnectionAction::Emit(ConnectionEvent::SendFailed { text: raw.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened_manager() -> (ConnectionManager, ConnectionId) {
        let mut manager = ConnectionManager::new();
        let _ = manager.start_session(&Endpoint::default()).expect("start");
        let connection = manager.current().expect("pending connection");
        let _ = manager.handle_transport(TransportNotice::opened(connection));
        (manager, connection)
    }

    fn emitted(actions: &[ConnectionAction]) -> Vec<ConnectionEvent> {
        actions
            .iter()
            .filter_map(|action| match action {
                ConnectionAction::Emit(event) => Some(event.clone()),
                ConnectionAction::Transport(_) => None,
            })
            .collect()
    }

    #[test]
    fn start_session_issues_connect() {
        let mut manager = ConnectionManager::new();
        let actions = manager.start_session(&Endpoint::new("chat:9000")).expect("start");

        assert!(matches!(actions.as_slice(), [ConnectionAction::Transport(
            TransportCommand::Connect { url, .. }
        )] if url == "ws://chat:9000/randomchat"));
        assert!(matches!(manager.state(), ConnectionState::Opening { .. }));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut manager = ConnectionManager::new();
        let _ = manager.start_session(&Endpoint::default()).expect("start");
        let connection = manager.current().expect("pending");

        let result = manager.start_session(&Endpoint::default());
        assert_eq!(result, Err(ConnectionError::AlreadyConnected { connection }));

        let (mut manager, connection) = opened_manager();
        let result = manager.start_session(&Endpoint::default());
        assert_eq!(result, Err(ConnectionError::AlreadyConnected { connection }));
    }

    #[test]
    fn opened_notice_emits_opened() {
        let mut manager = ConnectionManager::new();
        let _ = manager.start_session(&Endpoint::default()).expect("start");
        let connection = manager.current().expect("pending");

        let actions = manager.handle_transport(TransportNotice::opened(connection));
        assert_eq!(emitted(&actions), vec![ConnectionEvent::Opened]);
        assert!(manager.is_open());
    }

    #[test]
    fn close_before_open_emits_closed() {
        let mut manager = ConnectionManager::new();
        let _ = manager.start_session(&Endpoint::default()).expect("start");
        let connection = manager.current().expect("pending");

        let actions =
            manager.handle_transport(TransportNotice::closed(connection, Some("refused".into())));
        assert_eq!(emitted(&actions), vec![ConnectionEvent::Closed]);
        assert_eq!(manager.state(), ConnectionState::Closed);
    }

    #[test]
    fn inbound_text_is_forwarded_unchanged() {
        let (mut manager, connection) = opened_manager();

        for raw in ["oops", r#"{"kind":"userCount","userCount":2}"#, ""] {
            let actions = manager.handle_transport(TransportNotice::text(connection, raw));
            assert_eq!(emitted(&actions), vec![ConnectionEvent::MessageReceived(raw.to_string())]);
        }
    }

    #[test]
    fn send_text_encodes_client_message() {
        let (mut manager, connection) = opened_manager();
        let actions = manager.send_text("hello");

        assert_eq!(actions, vec![ConnectionAction::Transport(TransportCommand::Transmit {
            connection,
            payload: r#"{"kind":"clientMessage","messageContent":"hello","receiver":"server","sender":"client"}"#
                .to_string(),
        })]);
    }

    #[test]
    fn send_text_when_not_open_reports_failure() {
        let mut manager = ConnectionManager::new();
        let actions = manager.send_text("hello");
        assert_eq!(emitted(&actions), vec![ConnectionEvent::SendFailed { text: "hello".into() }]);

        let _ = manager.start_session(&Endpoint::default()).expect("start");
        let actions = manager.send_text("still opening");
        assert_eq!(emitted(&actions), vec![ConnectionEvent::SendFailed {
            text: "still opening".into()
        }]);
    }

    #[test]
    fn end_session_is_idempotent() {
        let (mut manager, connection) = opened_manager();

        let actions = manager.end_session();
        assert_eq!(actions, vec![
            ConnectionAction::Transport(TransportCommand::Disconnect { connection }),
            ConnectionAction::Emit(ConnectionEvent::Closed),
        ]);

        assert!(manager.end_session().is_empty());
        assert!(ConnectionManager::new().end_session().is_empty());
    }

    #[test]
    fn stale_notices_are_dropped() {
        let (mut manager, old) = opened_manager();
        let _ = manager.end_session();
        let _ = manager.start_session(&Endpoint::default()).expect("restart");
        let new = manager.current().expect("pending");
        assert!(new > old);

        assert!(manager.handle_transport(TransportNotice::text(old, "late")).is_empty());
        assert!(manager.handle_transport(TransportNotice::closed(old, None)).is_empty());
        assert!(matches!(manager.state(), ConnectionState::Opening { connection } if connection == new));
    }

    #[test]
    fn restart_after_transport_close() {
        let (mut manager, connection) = opened_manager();
        let _ = manager.handle_transport(TransportNotice::closed(connection, None));

        assert!(manager.start_session(&Endpoint::default()).is_ok());
    }
}
