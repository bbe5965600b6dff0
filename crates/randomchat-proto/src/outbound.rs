//! Client → server chat frames.

use serde::{Deserialize, Serialize};

use crate::{
    KIND_CLIENT_MESSAGE, PARTY_CLIENT, PARTY_SERVER,
    errors::{ProtocolError, Result},
};

/// Chat frame sent by a client.
///
/// The routing fields are protocol constants. [`ClientMessage::new`] always
/// produces `kind: "clientMessage"`, `receiver: "server"`, `sender: "client"`,
/// and [`ClientMessage::decode`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMessage {
    kind: String,
    message_content: String,
    receiver: String,
    sender: String,
}

impl ClientMessage {
    /// Create a chat frame carrying `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            kind: KIND_CLIENT_MESSAGE.to_owned(),
            message_content: content.into(),
            receiver: PARTY_SERVER.to_owned(),
            sender: PARTY_CLIENT.to_owned(),
        }
    }

    /// Message text.
    pub fn content(&self) -> &str {
        &self.message_content
    }

    /// Consume the frame, returning the message text.
    pub fn into_content(self) -> String {
        self.message_content
    }

    /// Serialize to the JSON text sent on the wire.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a frame received by the server.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::JsonDecode` if the text is not a complete frame
    /// - `ProtocolError::UnexpectedKind` if `kind` is not `clientMessage`
    /// - `ProtocolError::InvalidRouting` if routing is not client → server
    pub fn decode(raw: &str) -> Result<Self> {
        let message: Self = serde_json::from_str(raw)?;

        if message.kind != KIND_CLIENT_MESSAGE {
            return Err(ProtocolError::UnexpectedKind(message.kind));
        }

        if message.receiver != PARTY_SERVER || message.sender != PARTY_CLIENT {
            return Err(ProtocolError::InvalidRouting {
                sender: message.sender,
                receiver: message.receiver,
            });
        }

        Ok(message)
    }
}
