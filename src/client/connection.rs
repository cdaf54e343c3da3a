//! Connection handle
//!
//! The only path by which anything reaches a client's socket. Sends are
//! queued to a per-connection writer task; transport failures surface on the
//! read side of the session, never as a return value from `send`.

use futures_util::{Sink, SinkExt};
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::protocol::ServerMessage;

/// Work item for a connection's writer task.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// One serialized JSON text frame.
    Frame(String),
    /// Send a close frame and stop writing.
    Close,
}

/// Write side of one client connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ConnectionHandle {
    /// Creates a handle together with the queue its writer drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Serializes `message` and queues it for the writer.
    pub fn send(&self, message: &ServerMessage) {
        let frame = match serde_json::to_string(message) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to serialize {} message: {}", message.kind(), e);
                return;
            }
        };

        if self.tx.send(Outbound::Frame(frame)).is_err() {
            debug!("Dropped {} message: writer already closed", message.kind());
        }
    }

    /// Asks the writer to close the transport.
    pub fn close(&self) {
        let _ = self.tx.send(Outbound::Close);
    }
}

/// Why a writer task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterExit {
    /// Close requested or every handle dropped.
    Closed,
    /// The transport rejected a write.
    WriteFailed,
}

/// Drains `rx` into `sink` until a close request, a write failure, or every
/// handle being dropped. Ends by sending a close frame when possible.
pub async fn run_writer<S>(mut sink: S, mut rx: mpsc::UnboundedReceiver<Outbound>) -> WriterExit
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    while let Some(outbound) = rx.recv().await {
        match outbound {
            Outbound::Frame(frame) => {
                if let Err(e) = sink.send(Message::text(frame)).await {
                    warn!("Write failed, stopping writer: {}", e);
                    return WriterExit::WriteFailed;
                }
            }
            Outbound::Close => break,
        }
    }

    let _ = sink.send(Message::Close(None)).await;
    let _ = sink.close().await;
    WriterExit::Closed
}
