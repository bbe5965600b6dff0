//! Session state machine.
//!
//! This module defines the [`App`] state machine, which owns the chat
//! [`Session`] completely decoupled from I/O and transport mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Transitions
//!
//! ```text
//! Idle ──start──> Connecting ──Opened──> WaitingForPeer <──userLeft── PairedChatting
//!                                              │                           ^
//!                                              └──────connectedToUser──────┘
//! any ──Closed──> Closed ──start──> Connecting (fresh transcript)
//! ```
//!
//! # Responsibilities
//!
//! - Classifies inbound payloads and applies the resulting transition.
//! - Appends transcript entries, including optimistic entries for own sends.
//! - Edits the input line (length cap, newline stripping, paired-only).

use randomchat_client::Endpoint;
use randomchat_proto::{InboundFrame, RoomStatus};

use crate::{AppAction, AppEvent, KeyInput, Origin, Phase, Session, SessionError, Snapshot};

/// Announcement when the server admits the session.
pub const WELCOME_TEXT: &str = "Welcome! You're now connected to the server.";

/// Announcement when a peer is found.
pub const MATCH_FOUND_TEXT: &str = "Match found! Let's chat. San Franciscan.";

/// Announcement when the peer leaves, also used for unknown statuses.
pub const PEER_LEFT_TEXT: &str = "Anonymous has left the chat room.";

/// Maximum characters in the input line.
pub const MAX_INPUT_CHARS: usize = 500;

/// Session state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable with synthetic events.
#[derive(Debug, Clone)]
pub struct App {
    /// Server endpoint used for every session.
    endpoint: Endpoint,
    /// Current session. Replaced on every start.
    session: Session,
    /// Text being typed.
    input: String,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create an idle App for the given endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, session: Session::new(), input: String::new(), terminal_size: (80, 24) }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Opened => {
                if self.session.phase != Phase::Connecting {
                    tracing::debug!(phase = ?self.session.phase, "ignoring open notice");
                    return vec![];
                }
                self.session.phase = Phase::WaitingForPeer;
                vec![AppAction::Render]
            },
            AppEvent::MessageReceived(raw) => {
                if !self.session.phase.is_active() {
                    tracing::debug!(phase = ?self.session.phase, "ignoring frame outside session");
                    return vec![];
                }
                self.apply_frame(InboundFrame::classify(&raw))
            },
            AppEvent::Closed => {
                if !self.session.phase.is_active() {
                    return vec![];
                }
                let error = SessionError::TransportClosed;
                tracing::warn!(phase = ?self.session.phase, %error, "session ended");
                self.close();
                vec![AppAction::Render]
            },
            AppEvent::SendFailed { text } => {
                let error = SessionError::NotConnected { phase: self.session.phase };
                tracing::warn!(%error, len = text.len(), "send dropped by connection");
                vec![]
            },
        }
    }

    /// Start a new session.
    ///
    /// Resets the transcript and requests a connection.
    ///
    /// # Errors
    ///
    /// - `SessionError::AlreadyConnected` if a session is active
    pub fn start_session(&mut self) -> Result<Vec<AppAction>, SessionError> {
        if self.session.phase.is_active() {
            return Err(SessionError::AlreadyConnected { phase: self.session.phase });
        }

        self.session = Session::new();
        self.session.phase = Phase::Connecting;
        self.input.clear();
        tracing::info!(endpoint = %self.endpoint, "starting session");

        Ok(vec![AppAction::Connect { endpoint: self.endpoint.clone() }, AppAction::Render])
    }

    /// Send chat text to the peer.
    ///
    /// Empty and whitespace-only text is dropped silently. Accepted text is
    /// appended to the transcript immediately, before the server sees it.
    ///
    /// # Errors
    ///
    /// - `SessionError::NotConnected` if not paired with a peer
    pub fn send_text(&mut self, text: &str) -> Result<Vec<AppAction>, SessionError> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        if self.session.phase != Phase::PairedChatting {
            return Err(SessionError::NotConnected { phase: self.session.phase });
        }

        self.session.transcript.push(Origin::SelfSent, text);
        Ok(vec![AppAction::SendText { text: text.to_owned() }, AppAction::Render])
    }

    /// End the current session.
    ///
    /// Idempotent: no actions when no session is active.
    pub fn end_session(&mut self) -> Vec<AppAction> {
        if !self.session.phase.is_active() {
            return vec![];
        }

        tracing::info!(phase = ?self.session.phase, "ending session");
        self.close();
        vec![AppAction::Disconnect, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Read-only view of the current session.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::from(&self.session)
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// Server endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Text being typed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the input line accepts typing.
    pub fn input_enabled(&self) -> bool {
        self.session.phase == Phase::PairedChatting
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => self.quit(),
            KeyInput::Tab => {
                if self.session.phase.is_active() {
                    self.end_session()
                } else {
                    self.start_session().unwrap_or_default()
                }
            },
            KeyInput::Enter => {
                let text = std::mem::take(&mut self.input);
                match self.send_text(&text) {
                    Ok(actions) => actions,
                    Err(error) => {
                        tracing::debug!(%error, "send rejected");
                        self.input = text;
                        vec![]
                    },
                }
            },
            KeyInput::Backspace => {
                if self.input.pop().is_some() { vec![AppAction::Render] } else { vec![] }
            },
            KeyInput::Char(c) => {
                if !self.input_enabled()
                    || matches!(c, '\n' | '\r')
                    || self.input.chars().count() >= MAX_INPUT_CHARS
                {
                    return vec![];
                }
                self.input.push(c);
                vec![AppAction::Render]
            },
        }
    }

    fn apply_frame(&mut self, frame: InboundFrame) -> Vec<AppAction> {
        match frame {
            InboundFrame::Unparseable { raw } => {
                let error = SessionError::ParseFailure { raw: raw.clone() };
                tracing::warn!(%error, "recovered as system line");
                self.session.transcript.push(Origin::System, raw);
            },
            InboundFrame::UserCount(count) => {
                self.session.peer_count = count;
            },
            InboundFrame::Status(status) => self.apply_status(status),
            InboundFrame::Chat { content } => {
                self.session.transcript.push(Origin::Peer, content);
            },
        }
        vec![AppAction::Render]
    }

    fn apply_status(&mut self, status: RoomStatus) {
        let before = self.session.phase;
        let text = match status {
            RoomStatus::ConnectedToServer => {
                self.session.phase = Phase::WaitingForPeer;
                WELCOME_TEXT
            },
            RoomStatus::ConnectedToUser => {
                self.session.phase = Phase::PairedChatting;
                MATCH_FOUND_TEXT
            },
            RoomStatus::UserLeft | RoomStatus::Other(_) => {
                if before == Phase::PairedChatting {
                    self.session.phase = Phase::WaitingForPeer;
                }
                PEER_LEFT_TEXT
            },
        };

        tracing::debug!(%status, from = ?before, to = ?self.session.phase, "status transition");
        self.session.transcript.push(Origin::System, text);
    }

    fn close(&mut self) {
        self.session.phase = Phase::Closed;
        self.session.peer_count = 0;
        self.input.clear();
    }
}
