//! Server messages
//!
//! Everything the relay writes to a client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ClientId, ClientStatus};

pub const WELCOME_MESSAGE: &str = "Connected to Mouffette Server";

/// Directory entry describing one registered peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerInfo {
    pub id: ClientId,
    pub machine_name: String,
    pub screens: Vec<Value>,
    pub platform: Option<String>,
    pub status: ClientStatus,
}

/// Identity snapshot returned to a client after it registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub id: ClientId,
    pub machine_name: String,
    pub screens: Vec<Value>,
    pub platform: Option<String>,
}

/// Outbound message, serialized with its variant name as `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Welcome { client_id: ClientId, message: String },
    ClientList { clients: Vec<PeerInfo> },
    #[serde(rename_all = "camelCase")]
    RegistrationConfirmed { client_info: ClientInfo },
    Error { message: String },
    #[serde(rename_all = "camelCase")]
    IncomingMedia {
        sender_id: ClientId,
        media_data: Value,
        screens: Value,
    },
    #[serde(rename_all = "camelCase")]
    ShareInitiated { target_client_id: ClientId },
    #[serde(rename_all = "camelCase")]
    MediaUpdate { sender_id: ClientId, updates: Value },
    #[serde(rename_all = "camelCase")]
    StopMedia { sender_id: ClientId },
}

impl ServerMessage {
    pub fn welcome(client_id: ClientId) -> Self {
        ServerMessage::Welcome {
            client_id,
            message: WELCOME_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Wire `type` of this message, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Welcome { .. } => "welcome",
            ServerMessage::ClientList { .. } => "client_list",
            ServerMessage::RegistrationConfirmed { .. } => "registration_confirmed",
            ServerMessage::Error { .. } => "error",
            ServerMessage::IncomingMedia { .. } => "incoming_media",
            ServerMessage::ShareInitiated { .. } => "share_initiated",
            ServerMessage::MediaUpdate { .. } => "media_update",
            ServerMessage::StopMedia { .. } => "stop_media",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn welcome_uses_camel_case_fields() {
        let message = ServerMessage::welcome(ClientId::from("abc"));
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "welcome",
                "clientId": "abc",
                "message": "Connected to Mouffette Server"
            })
        );
    }

    #[test]
    fn client_list_entries_carry_status() {
        let message = ServerMessage::ClientList {
            clients: vec![PeerInfo {
                id: ClientId::from("b"),
                machine_name: "Win-1".to_string(),
                screens: vec![],
                platform: Some("windows".to_string()),
                status: ClientStatus::Connected,
            }],
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "client_list",
                "clients": [{
                    "id": "b",
                    "machineName": "Win-1",
                    "screens": [],
                    "platform": "windows",
                    "status": "connected"
                }]
            })
        );
    }

    #[test]
    fn incoming_media_forwards_opaque_values() {
        let message = ServerMessage::IncomingMedia {
            sender_id: ClientId::from("a"),
            media_data: json!({"kind": "image", "url": "x"}),
            screens: json!([{"id": 0}]),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "type": "incoming_media",
                "senderId": "a",
                "mediaData": {"kind": "image", "url": "x"},
                "screens": [{"id": 0}]
            })
        );
    }
}
