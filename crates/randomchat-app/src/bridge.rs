//! Connection-to-Application translation layer.
//!
//! The [`Bridge`] wraps the Sans-IO [`ConnectionManager`] and adapts it to the
//! application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts [`crate::AppAction`] intents into connection manager calls.
//! - Accumulates outgoing [`TransportCommand`]s to be executed by the driver
//!   in the next I/O cycle.
//! - Converts connection events and transport notices back into
//!   [`crate::AppEvent`]s for the App.

use randomchat_client::{
    ConnectionAction, ConnectionEvent, ConnectionId, ConnectionManager, TransportCommand,
    TransportNotice,
};

use crate::{AppAction, AppEvent};

/// Bridge between App and the connection manager.
#[derive(Debug, Default)]
pub struct Bridge {
    manager: ConnectionManager,
    outgoing: Vec<TransportCommand>,
}

impl Bridge {
    /// Create a bridge with no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live or pending connection.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.manager.current()
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::Connect { endpoint } => match self.manager.start_session(&endpoint) {
                Ok(actions) => self.process_connection_actions(actions),
                Err(e) => {
                    tracing::warn!(error = %e, "connect rejected");
                    vec![]
                },
            },
            AppAction::SendText { text } => {
                let actions = self.manager.send_text(&text);
                self.process_connection_actions(actions)
            },
            AppAction::Disconnect => {
                let actions = self.manager.end_session();
                self.process_connection_actions(actions)
            },
            AppAction::Render | AppAction::Quit => vec![],
        }
    }

    /// Handle a notice from the transport.
    pub fn handle_notice(&mut self, notice: TransportNotice) -> Vec<AppEvent> {
        let actions = self.manager.handle_transport(notice);
        self.process_connection_actions(actions)
    }

    /// Take pending transport commands.
    pub fn take_outgoing(&mut self) -> Vec<TransportCommand> {
        std::mem::take(&mut self.outgoing)
    }

    fn process_connection_actions(&mut self, actions: Vec<ConnectionAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                ConnectionAction::Transport(command) => self.outgoing.push(command),
                ConnectionAction::Emit(event) => events.push(match event {
                    ConnectionEvent::Opened => AppEvent::Opened,
                    ConnectionEvent::MessageReceived(raw) => AppEvent::MessageReceived(raw),
                    ConnectionEvent::Closed => AppEvent::Closed,
                    ConnectionEvent::SendFailed { text } => AppEvent::SendFailed { text },
                }),
            }
        }

        events
    }
}
