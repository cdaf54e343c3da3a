//! Per-message handlers
//!
//! `media_share` is the handshake and reports a missing target to the
//! sender. `media_update` and `stop_sharing` continue an existing session
//! and are dropped silently when the target is gone.

use log::{debug, info};

use crate::client::{ClientId, ClientRegistry};
use crate::directory;
use crate::error::handlers::TARGET_NOT_FOUND_NOTICE;
use crate::protocol::{MediaShare, MediaUpdate, Register, ServerMessage, StopSharing};
use crate::router::RouteOutcome;

/// Handles the `register` message.
///
/// Replaces the sender's identity metadata, confirms it back, then
/// rebroadcasts the directory to every registered client.
pub fn handle_register(registry: &mut ClientRegistry, sender: &ClientId, register: Register) -> RouteOutcome {
    let Some(record) = registry.get_mut(sender) else {
        return RouteOutcome::UnknownSender;
    };

    record.register(register.machine_name, register.screens, register.platform);

    info!(
        "Client registered: {} ({}) with {} screen(s)",
        record.machine_name().unwrap_or_default(),
        record.platform().unwrap_or_default(),
        record.screens().len()
    );

    record.handle().send(&ServerMessage::RegistrationConfirmed {
        client_info: record.client_info(),
    });

    directory::broadcast_all(registry);
    RouteOutcome::Registered
}

/// Handles `request_client_list`: snapshot to the sender only.
pub fn handle_request_client_list(registry: &ClientRegistry, sender: &ClientId) -> RouteOutcome {
    directory::send_snapshot(registry, sender);
    RouteOutcome::ClientListSent
}

/// Handles the `media_share` handshake.
pub fn handle_media_share(registry: &ClientRegistry, sender: &ClientId, share: MediaShare) -> RouteOutcome {
    let Some(target) = registry.get(&share.target_client_id) else {
        if let Some(record) = registry.get(sender) {
            record.handle().send(&ServerMessage::error(TARGET_NOT_FOUND_NOTICE));
        }
        return RouteOutcome::TargetNotFound;
    };

    info!("Media share from {} to {}", sender, share.target_client_id);

    target.handle().send(&ServerMessage::IncomingMedia {
        sender_id: sender.clone(),
        media_data: share.media_data,
        screens: share.screens,
    });

    if let Some(record) = registry.get(sender) {
        record.handle().send(&ServerMessage::ShareInitiated {
            target_client_id: share.target_client_id,
        });
    }

    RouteOutcome::ShareInitiated
}

/// Handles `media_update`, forwarding the opaque updates.
pub fn handle_media_update(registry: &ClientRegistry, sender: &ClientId, update: MediaUpdate) -> RouteOutcome {
    let Some(target) = update.target_client_id.as_ref().and_then(|id| registry.get(id)) else {
        debug!(
            "Dropping media update from {}: target {:?} is gone",
            sender, update.target_client_id
        );
        return RouteOutcome::Dropped;
    };

    target.handle().send(&ServerMessage::MediaUpdate {
        sender_id: sender.clone(),
        updates: update.updates,
    });
    RouteOutcome::Forwarded
}

/// Handles `stop_sharing`, telling the target to stop displaying media.
pub fn handle_stop_sharing(registry: &ClientRegistry, sender: &ClientId, stop: StopSharing) -> RouteOutcome {
    let Some(target) = stop.target_client_id.as_ref().and_then(|id| registry.get(id)) else {
        debug!(
            "Dropping stop sharing from {}: target {:?} is gone",
            sender, stop.target_client_id
        );
        return RouteOutcome::Dropped;
    };

    info!("Stop sharing from {} to {}", sender, target.id());

    target.handle().send(&ServerMessage::StopMedia {
        sender_id: sender.clone(),
    });
    RouteOutcome::Forwarded
}
