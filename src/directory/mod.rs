//! Peer directory
//!
//! Derives the peer list each registered client may see and pushes it out
//! whenever membership or metadata changes.

pub mod broadcaster;

pub use broadcaster::{broadcast_all, send_snapshot, snapshot};
