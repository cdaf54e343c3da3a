//! Per-connection session
//!
//! Performs the WebSocket handshake, wires the client into the registry,
//! feeds inbound frames to the router and removes the client when the
//! transport closes or fails.

use chrono::Utc;
use futures_util::StreamExt;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use crate::client::connection::run_writer;
use crate::client::{ClientId, ClientRegistry, ConnectionHandle};
use crate::directory;
use crate::error::ServerError;
use crate::protocol::ServerMessage;
use crate::router;

/// Serves one client from handshake to teardown.
///
/// Returns an error only when the handshake fails; a transport fault after
/// that ends the session normally with the client removed.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    clients: Arc<Mutex<ClientRegistry>>,
) -> Result<(), ServerError> {
    let ws_stream = accept_async(stream).await?;
    let (sink, mut source) = ws_stream.split();

    let (handle, rx) = ConnectionHandle::channel();
    let mut writer = tokio::spawn(run_writer(sink, rx));

    let client_id = ClientId::generate();
    {
        let mut registry = clients.lock().await;
        let record = registry.add(client_id.clone(), handle);
        record.handle().send(&ServerMessage::welcome(client_id.clone()));
        info!("New client connected: {} from {}", client_id, addr);

        directory::send_snapshot(&registry, &client_id);
        directory::broadcast_all(&registry);
    }

    loop {
        // The writer only ends early when the transport rejects a write
        let frame = tokio::select! {
            frame = source.next() => frame,
            exit = &mut writer => {
                warn!("Writer for client {} stopped: {:?}", client_id, exit);
                break;
            }
        };

        match frame {
            Some(Ok(Message::Text(text))) => {
                let mut registry = clients.lock().await;
                router::dispatch(&mut registry, &client_id, text.as_str());
            }
            Some(Ok(Message::Binary(bytes))) => {
                let mut registry = clients.lock().await;
                router::dispatch_binary(&mut registry, &client_id, &bytes);
            }
            Some(Ok(Message::Close(_))) | None => break,
            // Ping/pong are answered by the WebSocket layer
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                warn!("WebSocket error for client {}: {}", client_id, e);
                break;
            }
        }
    }

    let mut registry = clients.lock().await;
    if let Some(record) = registry.remove(&client_id) {
        let lifetime = Utc::now().signed_duration_since(record.connected_at());
        info!(
            "Client disconnected: {} (connected {}s)",
            client_id,
            lifetime.num_seconds()
        );
        record.handle().close();
    }
    directory::broadcast_all(&registry);

    Ok(())
}
