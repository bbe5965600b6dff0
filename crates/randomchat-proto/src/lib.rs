//! Randomchat wire protocol
//!
//! Text frames exchanged over the `/randomchat` WebSocket endpoint. Every frame
//! is a single JSON object (or, from misbehaving peers, arbitrary text).
//!
//! # Frames
//!
//! - [`InboundFrame`]: server → client frames after classification
//! - [`ClientMessage`]: the only client → server frame (chat content)
//! - [`ServerFrame`]: server → client frames as the server encodes them
//!
//! Classification never fails: text that is not JSON becomes
//! [`InboundFrame::Unparseable`] so the caller decides how to surface it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
mod inbound;
mod outbound;
mod server;

pub use errors::{ProtocolError, Result};
pub use inbound::{InboundFrame, RoomStatus};
pub use outbound::ClientMessage;
pub use server::ServerFrame;

/// Path of the chat endpoint on the server.
pub const RANDOMCHAT_PATH: &str = "/randomchat";

/// `kind` of a presence frame.
pub const KIND_USER_COUNT: &str = "userCount";

/// `kind` of a room-status frame.
pub const KIND_STATUS_MESSAGE: &str = "statusMessage";

/// `kind` of a chat frame sent by a client.
pub const KIND_CLIENT_MESSAGE: &str = "clientMessage";

/// `kind` of a chat frame relayed by the server.
pub const KIND_SERVER_MESSAGE: &str = "serverMessage";

/// Routing label for the server end of a frame.
pub const PARTY_SERVER: &str = "server";

/// Routing label for the client end of a frame.
pub const PARTY_CLIENT: &str = "client";
