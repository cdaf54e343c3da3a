use log::debug;

use crate::client::{ClientId, ClientRegistry};
use crate::protocol::{PeerInfo, ServerMessage};

/// Peer list for `for_id`: every registered client except itself.
pub fn snapshot(registry: &ClientRegistry, for_id: &ClientId) -> Vec<PeerInfo> {
    registry
        .registered_records()
        .filter(|record| record.id() != for_id)
        .map(|record| record.peer_info())
        .collect()
}

/// Sends `id` its current peer list. Does nothing if `id` is gone.
pub fn send_snapshot(registry: &ClientRegistry, id: &ClientId) {
    let Some(record) = registry.get(id) else {
        return;
    };

    record.handle().send(&ServerMessage::ClientList {
        clients: snapshot(registry, id),
    });
}

/// Sends a fresh peer list to every registered client. No diffing: clients
/// whose view did not change receive it too.
pub fn broadcast_all(registry: &ClientRegistry) {
    let mut recipients = 0;
    for record in registry.registered_records() {
        send_snapshot(registry, record.id());
        recipients += 1;
    }
    debug!("Broadcast client list to {} registered client(s)", recipients);
}
