//! Classification of server → client frames.
//!
//! The server speaks loosely-typed JSON: the `kind` field selects the frame
//! type, and chat content arrives either without a `kind` or with one the
//! client does not special-case. [`InboundFrame::classify`] turns a raw text
//! payload into a closed sum type so the session state machine can match
//! exhaustively instead of probing fields.
//!
//! # Precedence
//!
//! 1. Not a JSON object → [`InboundFrame::Unparseable`]
//! 2. `kind == "userCount"` → [`InboundFrame::UserCount`]
//! 3. `kind == "statusMessage"` → [`InboundFrame::Status`]
//! 4. Anything else → [`InboundFrame::Chat`]

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{KIND_STATUS_MESSAGE, KIND_USER_COUNT};

/// A classified inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Number of users currently online.
    UserCount(u32),

    /// Room status transition.
    Status(RoomStatus),

    /// Chat content from the paired peer.
    Chat {
        /// Message text.
        content: String,
    },

    /// Payload that could not be parsed as a structured frame.
    Unparseable {
        /// Raw payload text, unchanged.
        raw: String,
    },
}

impl InboundFrame {
    /// Classify a raw text payload.
    ///
    /// Never fails. JSON that is not an object (`null`, numbers, strings,
    /// arrays) is unparseable, as is a `userCount` frame whose count is
    /// missing, negative or out of range. A chat frame without a string
    /// `messageContent` carries the raw payload as its content.
    pub fn classify(raw: &str) -> Self {
        let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(raw) else {
            return Self::Unparseable { raw: raw.to_owned() };
        };

        match value.get("kind").and_then(Value::as_str) {
            Some(KIND_USER_COUNT) => value
                .get("userCount")
                .and_then(Value::as_u64)
                .and_then(|count| u32::try_from(count).ok())
                .map_or_else(|| Self::Unparseable { raw: raw.to_owned() }, Self::UserCount),
            Some(KIND_STATUS_MESSAGE) => {
                let status = value.get("status").and_then(Value::as_str).unwrap_or_default();
                Self::Status(RoomStatus::from_wire(status))
            },
            _ => {
                let content = value
                    .get("messageContent")
                    .and_then(Value::as_str)
                    .map_or_else(|| raw.to_owned(), ToOwned::to_owned);
                Self::Chat { content }
            },
        }
    }
}

/// Room status values carried by `statusMessage` frames.
///
/// Unknown values are preserved in [`RoomStatus::Other`]; the client treats
/// them like [`RoomStatus::UserLeft`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomStatus {
    /// Joined the server's waiting line.
    ConnectedToServer,
    /// Paired with another user.
    ConnectedToUser,
    /// Paired user left the room.
    UserLeft,
    /// Any other status string.
    Other(String),
}

impl RoomStatus {
    /// Parse a wire status string.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "connectedToServer" => Self::ConnectedToServer,
            "connectedToUser" => Self::ConnectedToUser,
            "userLeft" => Self::UserLeft,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Wire representation of this status.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::ConnectedToServer => "connectedToServer",
            Self::ConnectedToUser => "connectedToUser",
            Self::UserLeft => "userLeft",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for RoomStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for RoomStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&status))
    }
}
