//! Frame decoding
//!
//! Two stages: the frame must be a JSON object with a string `type`, then
//! the payload of a known type is decoded into its own struct.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::protocol::ClientMessage;

/// Decodes one raw frame into a typed client message.
pub fn parse_message(raw: &str) -> Result<ClientMessage, ProtocolError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut object) = value else {
        return Err(ProtocolError::MissingType);
    };
    let kind = match object.remove("type") {
        Some(Value::String(kind)) => kind,
        _ => return Err(ProtocolError::MissingType),
    };

    match kind.as_str() {
        "register" => payload(&kind, object).map(ClientMessage::Register),
        "request_client_list" => Ok(ClientMessage::RequestClientList),
        "media_share" => payload(&kind, object).map(ClientMessage::MediaShare),
        "media_update" => payload(&kind, object).map(ClientMessage::MediaUpdate),
        "stop_sharing" => payload(&kind, object).map(ClientMessage::StopSharing),
        _ => Ok(ClientMessage::Unknown(kind)),
    }
}

/// Decodes a frame that may have arrived as binary; only UTF-8 is accepted.
pub fn parse_frame(bytes: &[u8]) -> Result<ClientMessage, ProtocolError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ProtocolError::NotText)?;
    parse_message(text)
}

fn payload<T: DeserializeOwned>(kind: &str, object: Map<String, Value>) -> Result<T, ProtocolError> {
    serde_json::from_value(Value::Object(object)).map_err(|source| ProtocolError::InvalidPayload {
        kind: kind.to_string(),
        source,
    })
}
