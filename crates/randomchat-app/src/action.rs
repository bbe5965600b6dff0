//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use randomchat_client::Endpoint;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Open a connection.
    Connect {
        /// Server endpoint.
        endpoint: Endpoint,
    },

    /// Send chat text to the peer.
    SendText {
        /// Text as typed.
        text: String,
    },

    /// Close the connection.
    Disconnect,
}
