//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize).
//! - Connection events translated from the [`randomchat_client`] connection
//!   manager by the [`crate::Bridge`].

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Transport confirmed the connection.
    Opened,

    /// Raw inbound payload.
    MessageReceived(String),

    /// Connection closed.
    Closed,

    /// A send reached the connection manager while it was not open.
    SendFailed {
        /// The text that was not sent.
        text: String,
    },
}
