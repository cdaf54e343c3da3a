//! Message router
//!
//! Validates inbound frames and dispatches them by `type` to registry
//! lookups and connection handles. Any message is accepted from any
//! client, registered or not.

pub mod handlers;

use log::{debug, warn};

use crate::client::{ClientId, ClientRegistry};
use crate::error::ProtocolError;
use crate::error::handlers::error_to_client_notice;
use crate::protocol::{ClientMessage, ServerMessage, parse_frame, parse_message};

/// What the router did with one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Sender (re)registered; confirmation sent and directory rebroadcast.
    Registered,
    /// Directory snapshot sent to the sender.
    ClientListSent,
    /// Share forwarded to the target and acknowledged to the sender.
    ShareInitiated,
    /// Handshake target missing; sender told.
    TargetNotFound,
    /// Continuation message forwarded to its target.
    Forwarded,
    /// Continuation message whose target is gone; silently dropped.
    Dropped,
    /// Unknown message type; logged only.
    Ignored,
    /// Frame could not be decoded; sender told.
    Rejected,
    /// Sender no longer in the registry; nothing done.
    UnknownSender,
}

/// Handles one text frame from `sender`.
pub fn dispatch(registry: &mut ClientRegistry, sender: &ClientId, raw: &str) -> RouteOutcome {
    handle_decoded(registry, sender, parse_message(raw))
}

/// Handles one binary frame from `sender`.
pub fn dispatch_binary(registry: &mut ClientRegistry, sender: &ClientId, bytes: &[u8]) -> RouteOutcome {
    handle_decoded(registry, sender, parse_frame(bytes))
}

fn handle_decoded(
    registry: &mut ClientRegistry,
    sender: &ClientId,
    decoded: Result<ClientMessage, ProtocolError>,
) -> RouteOutcome {
    match decoded {
        Ok(message) => route(registry, sender, message),
        Err(err) => reject(registry, sender, &err),
    }
}

/// Applies one decoded message.
pub fn route(registry: &mut ClientRegistry, sender: &ClientId, message: ClientMessage) -> RouteOutcome {
    if registry.get(sender).is_none() {
        return RouteOutcome::UnknownSender;
    }

    debug!("Message from {}: {}", sender, message.kind());

    match message {
        ClientMessage::Register(register) => handlers::handle_register(registry, sender, register),
        ClientMessage::RequestClientList => handlers::handle_request_client_list(registry, sender),
        ClientMessage::MediaShare(share) => handlers::handle_media_share(registry, sender, share),
        ClientMessage::MediaUpdate(update) => handlers::handle_media_update(registry, sender, update),
        ClientMessage::StopSharing(stop) => handlers::handle_stop_sharing(registry, sender, stop),
        ClientMessage::Unknown(kind) => {
            warn!("Unknown message type from {}: {}", sender, kind);
            RouteOutcome::Ignored
        }
    }
}

fn reject(registry: &ClientRegistry, sender: &ClientId, err: &ProtocolError) -> RouteOutcome {
    let Some(record) = registry.get(sender) else {
        return RouteOutcome::UnknownSender;
    };

    warn!("Malformed frame from {}: {}", sender, err);
    record.handle().send(&ServerMessage::error(error_to_client_notice(err)));
    RouteOutcome::Rejected
}
