use tokio::sync::mpsc::UnboundedReceiver;

use crate::client::{ClientId, ClientRegistry, ConnectionHandle, Outbound};
use crate::protocol::ServerMessage;

/// Adds an unregistered client to `registry` and returns the queue that
/// receives everything sent to it.
pub fn connect(registry: &mut ClientRegistry, id: &str) -> (ClientId, UnboundedReceiver<Outbound>) {
    let (handle, rx) = ConnectionHandle::channel();
    let id = ClientId::from(id);
    registry.add(id.clone(), handle);
    (id, rx)
}

/// Adds a client and registers it under `machine_name`.
pub fn connect_registered(
    registry: &mut ClientRegistry,
    id: &str,
    machine_name: &str,
) -> (ClientId, UnboundedReceiver<Outbound>) {
    let (id, rx) = connect(registry, id);
    registry
        .get_mut(&id)
        .expect("just added")
        .register(Some(machine_name.to_string()), None, None);
    (id, rx)
}

/// Every message queued so far, decoded.
pub fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(outbound) = rx.try_recv() {
        if let Outbound::Frame(frame) = outbound {
            messages.push(serde_json::from_str(&frame).expect("valid server frame"));
        }
    }
    messages
}

/// Ids listed in a `client_list` message, sorted.
pub fn listed_ids(message: &ServerMessage) -> Vec<String> {
    match message {
        ServerMessage::ClientList { clients } => {
            let mut ids: Vec<String> = clients.iter().map(|c| c.id.to_string()).collect();
            ids.sort();
            ids
        }
        other => panic!("expected client_list, got {}", other.kind()),
    }
}
