//! Relay wire protocol
//!
//! JSON text frames tagged by a `type` field: inbound client messages,
//! outbound server messages, and the decoder between raw frames and types.

pub mod commands;
pub mod parser;
pub mod responses;

pub use commands::{ClientMessage, MediaShare, MediaUpdate, Register, StopSharing};
pub use parser::{parse_frame, parse_message};
pub use responses::{ClientInfo, PeerInfo, ServerMessage, WELCOME_MESSAGE};
