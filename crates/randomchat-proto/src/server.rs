//! Server → client frames as the server encodes them.
//!
//! Clients never decode these directly; they go through
//! [`crate::InboundFrame::classify`], which is deliberately more lenient.

use serde::{Deserialize, Serialize};

use crate::{PARTY_CLIENT, PARTY_SERVER, RoomStatus, errors::Result};

/// Frames emitted by the matchmaking server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ServerFrame {
    /// Presence count broadcast.
    #[serde(rename = "userCount")]
    UserCount {
        /// Users currently waiting or paired.
        #[serde(rename = "userCount")]
        user_count: u32,
    },

    /// Room status transition.
    #[serde(rename = "statusMessage")]
    StatusMessage {
        /// New status.
        status: RoomStatus,
    },

    /// Chat content relayed from the paired peer.
    #[serde(rename = "serverMessage")]
    ServerMessage {
        /// Message text.
        #[serde(rename = "messageContent")]
        message_content: String,
        /// Always `client`.
        receiver: String,
        /// Always `server`.
        sender: String,
    },
}

impl ServerFrame {
    /// Presence frame.
    pub fn user_count(user_count: u32) -> Self {
        Self::UserCount { user_count }
    }

    /// Status frame.
    pub fn status(status: RoomStatus) -> Self {
        Self::StatusMessage { status }
    }

    /// Relay `content` to the peer.
    pub fn relay(content: impl Into<String>) -> Self {
        Self::ServerMessage {
            message_content: content.into(),
            receiver: PARTY_CLIENT.to_owned(),
            sender: PARTY_SERVER.to_owned(),
        }
    }

    /// Serialize to the JSON text sent on the wire.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
