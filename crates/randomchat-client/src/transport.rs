//! WebSocket transport for the client.
//!
//! Provides [`WebSocketTransport`], which executes [`TransportCommand`]s and
//! reports what happens on the socket as [`TransportNotice`]s. This is a thin
//! layer that only moves text frames; connection lifecycle decisions remain in
//! the Sans-IO [`crate::ConnectionManager`].

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{ConnectionId, TransportCommand, TransportNotice};

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Transmit for a connection that is not the live socket.
    #[error("no live socket for {0}")]
    NoSocket(ConnectionId),

    /// Socket task is gone.
    #[error("socket task for {0} has stopped")]
    SocketClosed(ConnectionId),
}

/// Handle to the live socket task.
struct SocketHandle {
    connection: ConnectionId,
    outbound: mpsc::Sender<String>,
    abort_handle: tokio::task::AbortHandle,
}

/// WebSocket transport holding at most one live socket.
///
/// All sockets report into one shared notice channel so ordering across
/// connections is preserved. Notices from an aborted socket may still be
/// queued; the connection manager drops them by [`ConnectionId`].
pub struct WebSocketTransport {
    capacity: usize,
    notices_tx: mpsc::Sender<TransportNotice>,
    notices_rx: mpsc::Receiver<TransportNotice>,
    socket: Option<SocketHandle>,
}

impl WebSocketTransport {
    /// Create a transport whose channels hold `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (notices_tx, notices_rx) = mpsc::channel(capacity);
        Self { capacity, notices_tx, notices_rx, socket: None }
    }

    /// Execute one command.
    ///
    /// `Connect` replaces any live socket. `Disconnect` aborts the socket task
    /// immediately, discarding sends still in flight.
    ///
    /// # Errors
    ///
    /// - `TransportError::NoSocket` if `Transmit` names a connection that is
    ///   not live
    /// - `TransportError::SocketClosed` if the socket task already exited
    pub async fn execute(&mut self, command: TransportCommand) -> Result<(), TransportError> {
        match command {
            TransportCommand::Connect { connection, url } => {
                self.stop();

                let (outbound_tx, outbound_rx) = mpsc::channel(self.capacity);
                let task = tokio::spawn(run_socket(
                    connection,
                    url,
                    outbound_rx,
                    self.notices_tx.clone(),
                ));

                self.socket = Some(SocketHandle {
                    connection,
                    outbound: outbound_tx,
                    abort_handle: task.abort_handle(),
                });
                Ok(())
            },
            TransportCommand::Transmit { connection, payload } => {
                let socket = self
                    .socket
                    .as_ref()
                    .filter(|socket| socket.connection == connection)
                    .ok_or(TransportError::NoSocket(connection))?;

                socket
                    .outbound
                    .send(payload)
                    .await
                    .map_err(|_| TransportError::SocketClosed(connection))
            },
            TransportCommand::Disconnect { connection } => {
                if self.socket.as_ref().is_some_and(|socket| socket.connection == connection) {
                    self.stop();
                }
                Ok(())
            },
        }
    }

    /// Wait for the next notice.
    ///
    /// The transport keeps a sender alive, so this only resolves when a notice
    /// arrives.
    pub async fn recv(&mut self) -> Option<TransportNotice> {
        self.notices_rx.recv().await
    }

    /// Next notice if one is queued.
    pub fn try_recv(&mut self) -> Option<TransportNotice> {
        self.notices_rx.try_recv().ok()
    }

    /// Live connection, if any.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.socket.as_ref().map(|socket| socket.connection)
    }

    /// Abort the live socket task, if any.
    pub fn stop(&mut self) {
        if let Some(socket) = self.socket.take() {
            tracing::debug!(connection = %socket.connection, "aborting socket task");
            socket.abort_handle.abort();
        }
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run one socket, bridging between channels and the WebSocket.
///
/// Always reports exactly one `Closed` notice unless aborted.
async fn run_socket(
    connection: ConnectionId,
    url: String,
    mut outbound: mpsc::Receiver<String>,
    notices: mpsc::Sender<TransportNotice>,
) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::warn!(%connection, %url, error = %e, "websocket connect failed");
            let _ = notices.send(TransportNotice::closed(connection, Some(e.to_string()))).await;
            return;
        },
    };

    tracing::info!(%connection, %url, "websocket connected");
    if notices.send(TransportNotice::opened(connection)).await.is_err() {
        return;
    }

    let (mut sink, mut source) = stream.split();

    let reason = loop {
        tokio::select! {
            payload = outbound.recv() => {
                let Some(payload) = payload else {
                    let _ = sink.send(Message::Close(None)).await;
                    break None;
                };
                if let Err(e) = sink.send(Message::text(payload)).await {
                    tracing::warn!(%connection, error = %e, "websocket send failed");
                    break Some(e.to_string());
                }
            },
            message = source.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let notice = TransportNotice::text(connection, text.as_str());
                    if notices.send(notice).await.is_err() {
                        return;
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    break frame.map(|f| f.reason.as_str().to_owned()).filter(|r| !r.is_empty());
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => {
                    tracing::warn!(%connection, error = %e, "websocket receive failed");
                    break Some(e.to_string());
                },
                None => break None,
            },
        }
    };

    tracing::info!(%connection, ?reason, "websocket closed");
    let _ = notices.send(TransportNotice::closed(connection, reason)).await;
}
