//! Error types
//!
//! Inbound frame decoding errors and server-level failures.

use std::fmt;
use std::io;
use tokio_tungstenite::tungstenite;

/// Errors raised while decoding one inbound frame.
///
/// Recovered locally: the sender is notified and the connection stays open.
#[derive(Debug)]
pub enum ProtocolError {
    /// The frame is not a JSON document at all.
    InvalidJson(serde_json::Error),
    /// The frame is JSON but not an object carrying a string `type`.
    MissingType,
    /// A known message type whose fields do not match its shape.
    InvalidPayload {
        kind: String,
        source: serde_json::Error,
    },
    /// A binary frame that is not UTF-8 text.
    NotText,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidJson(e) => write!(f, "Invalid JSON: {}", e),
            ProtocolError::MissingType => write!(f, "Message has no string `type` field"),
            ProtocolError::InvalidPayload { kind, source } => {
                write!(f, "Invalid `{}` payload: {}", kind, source)
            }
            ProtocolError::NotText => write!(f, "Binary frame is not UTF-8 text"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::InvalidJson(e) => Some(e),
            ProtocolError::InvalidPayload { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(error: serde_json::Error) -> Self {
        ProtocolError::InvalidJson(error)
    }
}

/// Server-level failures: startup, accept and transport errors.
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    Io(io::Error),
    WebSocket(tungstenite::Error),
    InvalidArgument(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
            ServerError::WebSocket(e) => write!(f, "WebSocket error: {}", e),
            ServerError::InvalidArgument(arg) => write!(f, "Invalid argument: {}", arg),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::Io(error)
    }
}

impl From<tungstenite::Error> for ServerError {
    fn from(error: tungstenite::Error) -> Self {
        ServerError::WebSocket(error)
    }
}
