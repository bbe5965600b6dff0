//! Randomchat matchmaking server.
//!
//! Production server using tokio-tungstenite for the WebSocket transport and
//! Tokio for the async runtime.
//!
//! # Architecture
//!
//! [`Matchmaker`] follows the Sans-IO pattern: events in, actions out, no
//! I/O. [`Server`] accepts sockets on [`randomchat_proto::RANDOMCHAT_PATH`],
//! turns socket activity into [`ServerEvent`]s and executes the resulting
//! [`ServerAction`]s.
//!
//! Actions are executed while the matchmaker lock is held and outbound
//! queues are unbounded, so frames reach each session in the order the
//! matchmaker produced them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod matchmaker;

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

pub use error::ServerError;
use futures::{SinkExt, StreamExt};
pub use matchmaker::{Matchmaker, MatchmakerConfig, ServerAction, ServerEvent};
use randomchat_proto::{RANDOMCHAT_PATH, ServerFrame};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::{Mutex, mpsc},
};
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::{
        Message,
        handshake::server::{ErrorResponse, Request, Response},
        http::StatusCode,
    },
};

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "0.0.0.0:8080")
    pub bind_address: String,
    /// Maximum concurrent sessions
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: MatchmakerConfig::default().max_connections,
        }
    }
}

/// State shared by all connection tasks.
struct SharedState {
    matchmaker: Matchmaker,
    /// Outbound queue per session, drained by that session's writer task
    outbound: HashMap<u64, mpsc::UnboundedSender<Message>>,
}

/// Production randomchat server.
pub struct Server {
    listener: TcpListener,
    matchmaker: Matchmaker,
}

impl Server {
    /// Create and bind a new server.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            ServerError::Config(format!("invalid bind address '{}': {e}", config.bind_address))
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("WebSocket transport bound to {}", addr);

        let matchmaker =
            Matchmaker::new(MatchmakerConfig { max_connections: config.max_connections });

        Ok(Self { listener, matchmaker })
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the server, accepting connections and relaying frames.
    ///
    /// This method runs until the listener fails.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Server starting on {}", self.local_addr()?);

        let shared =
            Arc::new(Mutex::new(SharedState { matchmaker: self.matchmaker, outbound: HashMap::new() }));
        let next_session = AtomicU64::new(1);

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let session_id = next_session.fetch_add(1, Ordering::Relaxed);
                    let shared = Arc::clone(&shared);

                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, session_id, shared).await {
                            tracing::debug!(session_id, %peer, "Connection error: {}", e);
                        }
                    });
                },
                Err(e) => {
                    tracing::error!("Accept error: {}", e);
                },
            }
        }
    }
}

/// Reject handshakes for any path other than the chat endpoint.
fn check_path(request: &Request, response: Response) -> Result<Response, ErrorResponse> {
    if request.uri().path() == RANDOMCHAT_PATH {
        return Ok(response);
    }

    tracing::debug!(path = %request.uri().path(), "rejecting handshake for unknown path");
    let mut rejection = ErrorResponse::new(Some("not found".to_string()));
    *rejection.status_mut() = StatusCode::NOT_FOUND;
    Err(rejection)
}

/// Handle a single WebSocket session.
async fn handle_connection(
    stream: TcpStream,
    session_id: u64,
    shared: Arc<Mutex<SharedState>>,
) -> Result<(), ServerError> {
    let socket = accept_hdr_async(stream, check_path)
        .await
        .map_err(|e| ServerError::Transport(format!("handshake failed: {e}")))?;

    tracing::debug!(session_id, "New connection");

    let (mut sink, mut source) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let closing = message.is_close();
            if let Err(e) = sink.send(message).await {
                tracing::debug!(session_id, "Write error: {}", e);
                break;
            }
            if closing {
                break;
            }
        }
    });

    {
        let mut shared = shared.lock().await;
        shared.outbound.insert(session_id, outbound_tx);
        process(&mut shared, ServerEvent::ConnectionAccepted { session_id });
    }

    while let Some(message) = source.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let mut shared = shared.lock().await;
                let text = text.as_str().to_owned();
                process(&mut shared, ServerEvent::MessageReceived { session_id, text });
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {},
            Err(e) => {
                tracing::debug!(session_id, "Read error: {}", e);
                break;
            },
        }
    }

    {
        let mut shared = shared.lock().await;
        shared.outbound.remove(&session_id);
        process(&mut shared, ServerEvent::ConnectionClosed { session_id });
    }

    writer.abort();
    tracing::debug!(session_id, "Connection closed");

    Ok(())
}

/// Feed one event to the matchmaker and execute the resulting actions.
fn process(shared: &mut SharedState, event: ServerEvent) {
    match shared.matchmaker.process_event(event) {
        Ok(actions) => execute_actions(shared, actions),
        Err(e) => tracing::warn!("Event processing error: {}", e),
    }
}

/// Encode a frame as a WebSocket text message.
fn encode_frame(frame: &ServerFrame) -> Result<Message, ServerError> {
    Ok(Message::text(frame.encode()?))
}

/// Execute matchmaker actions.
fn execute_actions(shared: &mut SharedState, actions: Vec<ServerAction>) {
    for action in actions {
        match action {
            ServerAction::SendToSession { session_id, frame } => {
                let message = match encode_frame(&frame) {
                    Ok(message) => message,
                    Err(e) => {
                        tracing::error!(session_id, "Frame encode failed: {}", e);
                        continue;
                    },
                };

                match shared.outbound.get(&session_id) {
                    Some(queue) => {
                        if queue.send(message).is_err() {
                            tracing::warn!("SendToSession: writer for {} has stopped", session_id);
                        }
                    },
                    None => tracing::warn!("SendToSession: session {} not found", session_id),
                }
            },

            ServerAction::CloseConnection { session_id, reason } => {
                tracing::info!("Closing connection {}: {}", session_id, reason);
                if let Some(queue) = shared.outbound.remove(&session_id) {
                    let _ = queue.send(Message::Close(None));
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use randomchat_proto::RoomStatus;

    use super::*;

    #[test]
    fn frames_encode_as_text_messages() {
        let message = encode_frame(&ServerFrame::status(RoomStatus::UserLeft)).expect("encode");
        assert_eq!(message, Message::text(r#"{"kind":"statusMessage","status":"userLeft"}"#));
    }
}
