//! Error handlers
//!
//! Maps errors to log output and to the notice sent back to a client.

use crate::error::types::{ProtocolError, ServerError};
use log::error;

pub const INVALID_JSON_NOTICE: &str = "Invalid JSON format";
pub const INVALID_PAYLOAD_NOTICE: &str = "Invalid message payload";
pub const TARGET_NOT_FOUND_NOTICE: &str = "Target client not found";

/// Log a server error
pub fn handle_error(err: &ServerError) {
    error!("Mouffette Server Error: {}", err);
}

/// Convert a decode error to the `error.message` text sent to the client
pub fn error_to_client_notice(err: &ProtocolError) -> &'static str {
    match err {
        ProtocolError::InvalidJson(_) => INVALID_JSON_NOTICE,
        ProtocolError::MissingType => INVALID_JSON_NOTICE,
        ProtocolError::NotText => INVALID_JSON_NOTICE,
        ProtocolError::InvalidPayload { .. } => INVALID_PAYLOAD_NOTICE,
    }
}
