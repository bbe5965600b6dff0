//! Client
//!
//! Connection manager for the randomchat protocol. Owns the lifecycle of
//! exactly one WebSocket connection per chat session and surfaces everything
//! the transport reports as an ordered stream of [`ConnectionEvent`]s.
//!
//! # Architecture
//!
//! [`ConnectionManager`] is Sans-IO: intents (`start_session`, `send_text`,
//! `end_session`) and transport notices go in, [`ConnectionAction`]s come
//! out. An action either instructs the transport ([`TransportCommand`]) or
//! emits an event upward. Inbound payloads are forwarded untouched;
//! interpreting them is the session state machine's job.
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::WebSocketTransport`]: tokio-tungstenite transport that
//!   executes [`TransportCommand`]s and reports [`TransportNotice`]s

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod connection;
mod error;
mod event;

#[cfg(feature = "transport")]
pub mod transport;

pub use config::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_HOST, Endpoint};
pub use connection::{ConnectionManager, ConnectionState};
pub use error::ConnectionError;
pub use event::{
    ConnectionAction, ConnectionEvent, ConnectionId, TransportCommand, TransportEvent,
    TransportNotice,
};
