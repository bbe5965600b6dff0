//! Matchmaker.
//!
//! Pairs sessions two at a time and relays chat between partners. Pure
//! state machine: the runtime feeds it [`ServerEvent`]s and executes the
//! returned [`ServerAction`]s in order.
//!
//! Every session is either waiting or paired, never both. After each event
//! at most one session is left waiting.

use std::collections::{BTreeSet, HashMap, VecDeque};

use randomchat_proto::{ClientMessage, RoomStatus, ServerFrame};

use crate::error::ServerError;

/// Matchmaker configuration
#[derive(Debug, Clone)]
pub struct MatchmakerConfig {
    /// Maximum concurrent sessions
    pub max_connections: usize,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self { max_connections: 10_000 }
    }
}

/// Events that the matchmaker processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A WebSocket handshake completed
    ConnectionAccepted {
        /// Unique id assigned by the runtime
        session_id: u64,
    },

    /// A text frame arrived from a session
    MessageReceived {
        /// Sending session
        session_id: u64,
        /// Raw frame text
        text: String,
    },

    /// A session's socket closed (by peer or error)
    ConnectionClosed {
        /// Closed session
        session_id: u64,
    },
}

/// Actions that the matchmaker produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAction {
    /// Send a frame to one session
    SendToSession {
        /// Target session
        session_id: u64,
        /// Frame to send
        frame: ServerFrame,
    },

    /// Close a session's socket
    CloseConnection {
        /// Session to close
        session_id: u64,
        /// Reason for closure
        reason: String,
    },
}

/// Random-pairing matchmaker.
#[derive(Debug, Default)]
pub struct Matchmaker {
    config: MatchmakerConfig,
    /// All live sessions, ordered for deterministic broadcasts
    sessions: BTreeSet<u64>,
    /// Sessions waiting for a partner, oldest first
    waiting: VecDeque<u64>,
    /// Partner of each paired session (both directions stored)
    partners: HashMap<u64, u64>,
}

impl Matchmaker {
    /// Create an empty matchmaker.
    pub fn new(config: MatchmakerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Process one event and return the actions to execute.
    ///
    /// # Errors
    ///
    /// - `ServerError::SessionAlreadyExists` if an accepted session id is
    ///   already live
    pub fn process_event(&mut self, event: ServerEvent) -> Result<Vec<ServerAction>, ServerError> {
        match event {
            ServerEvent::ConnectionAccepted { session_id } => self.handle_accepted(session_id),
            ServerEvent::MessageReceived { session_id, text } => {
                Ok(self.handle_message(session_id, &text))
            },
            ServerEvent::ConnectionClosed { session_id } => Ok(self.handle_closed(session_id)),
        }
    }

    /// Number of live sessions (waiting plus paired).
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Sessions waiting for a partner, oldest first.
    pub fn waiting(&self) -> impl Iterator<Item = u64> + '_ {
        self.waiting.iter().copied()
    }

    /// Partner of `session_id`, if paired.
    pub fn partner_of(&self, session_id: u64) -> Option<u64> {
        self.partners.get(&session_id).copied()
    }

    /// Whether `session_id` is live.
    pub fn contains(&self, session_id: u64) -> bool {
        self.sessions.contains(&session_id)
    }

    fn handle_accepted(&mut self, session_id: u64) -> Result<Vec<ServerAction>, ServerError> {
        if self.sessions.contains(&session_id) {
            return Err(ServerError::SessionAlreadyExists(session_id));
        }

        if self.sessions.len() >= self.config.max_connections {
            tracing::warn!(session_id, limit = self.config.max_connections, "rejecting session");
            return Ok(vec![ServerAction::CloseConnection {
                session_id,
                reason: "max connections exceeded".to_string(),
            }]);
        }

        self.sessions.insert(session_id);
        self.waiting.push_back(session_id);
        tracing::debug!(session_id, "session joined waiting line");

        let mut actions = vec![Self::status(session_id, RoomStatus::ConnectedToServer)];
        self.pair_waiting(&mut actions);
        self.broadcast_user_count(&mut actions);
        Ok(actions)
    }

    fn handle_message(&mut self, session_id: u64, text: &str) -> Vec<ServerAction> {
        let message = match ClientMessage::decode(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(session_id, error = %e, "dropping invalid client message");
                return vec![];
            },
        };

        let Some(partner) = self.partner_of(session_id) else {
            tracing::warn!(session_id, "dropping message from unpaired session");
            return vec![];
        };

        vec![ServerAction::SendToSession {
            session_id: partner,
            frame: ServerFrame::relay(message.into_content()),
        }]
    }

    fn handle_closed(&mut self, session_id: u64) -> Vec<ServerAction> {
        if !self.sessions.remove(&session_id) {
            return vec![];
        }

        self.waiting.retain(|&waiting| waiting != session_id);

        let mut actions = Vec::new();
        if let Some(partner) = self.partners.remove(&session_id) {
            self.partners.remove(&partner);
            tracing::debug!(session_id, partner, "pair dissolved, requeueing partner");

            actions.push(Self::status(partner, RoomStatus::UserLeft));
            self.waiting.push_front(partner);
            self.pair_waiting(&mut actions);
        }

        self.broadcast_user_count(&mut actions);
        actions
    }

    fn pair_waiting(&mut self, actions: &mut Vec<ServerAction>) {
        while self.waiting.len() >= 2 {
            let (Some(first), Some(second)) = (self.waiting.pop_front(), self.waiting.pop_front())
            else {
                break;
            };

            self.partners.insert(first, second);
            self.partners.insert(second, first);
            tracing::info!(first, second, "paired sessions");

            actions.push(Self::status(first, RoomStatus::ConnectedToUser));
            actions.push(Self::status(second, RoomStatus::ConnectedToUser));
        }
    }

    fn broadcast_user_count(&self, actions: &mut Vec<ServerAction>) {
        let count = u32::try_from(self.sessions.len()).unwrap_or(u32::MAX);
        actions.extend(self.sessions.iter().map(|&session_id| ServerAction::SendToSession {
            session_id,
            frame: ServerFrame::user_count(count),
        }));
    }

    fn status(session_id: u64, status: RoomStatus) -> ServerAction {
        ServerAction::SendToSession { session_id, frame: ServerFrame::status(status) }
    }
}
