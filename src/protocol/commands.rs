//! Module `commands`
//!
//! Messages a client may send to the relay. Each known `type` has its own
//! payload struct; field names follow the camelCase wire format.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::client::ClientId;

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    Register(Register),
    RequestClientList,
    MediaShare(MediaShare),
    MediaUpdate(MediaUpdate),
    StopSharing(StopSharing),
    /// Well-formed frame with a `type` the relay does not handle.
    Unknown(String),
}

impl ClientMessage {
    /// Wire `type` of this message.
    pub fn kind(&self) -> &str {
        match self {
            ClientMessage::Register(_) => "register",
            ClientMessage::RequestClientList => "request_client_list",
            ClientMessage::MediaShare(_) => "media_share",
            ClientMessage::MediaUpdate(_) => "media_update",
            ClientMessage::StopSharing(_) => "stop_sharing",
            ClientMessage::Unknown(kind) => kind,
        }
    }
}

/// `register{machineName?, screens?, platform?}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub screens: Option<Vec<Value>>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// `media_share{targetClientId, mediaData, screens}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaShare {
    pub target_client_id: ClientId,
    #[serde(default)]
    pub media_data: Value,
    #[serde(default)]
    pub screens: Value,
}

/// `media_update{targetClientId, updates}`
///
/// A missing or non-string target decodes to `None`; the router drops it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUpdate {
    #[serde(default, deserialize_with = "optional_target")]
    pub target_client_id: Option<ClientId>,
    #[serde(default)]
    pub updates: Value,
}

/// `stop_sharing{targetClientId}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopSharing {
    #[serde(default, deserialize_with = "optional_target")]
    pub target_client_id: Option<ClientId>,
}

/// Continuation messages never fail on their target: anything other than a
/// string is treated as no target at all.
fn optional_target<'de, D>(deserializer: D) -> Result<Option<ClientId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(ClientId::from(id.as_str())),
        _ => None,
    })
}
