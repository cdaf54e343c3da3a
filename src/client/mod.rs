//! Client management system
//!
//! Tracks connected clients, their registration metadata and the handle
//! used to write to each of them.

pub mod connection;
pub mod registry;
pub mod state;

pub use connection::{ConnectionHandle, Outbound, WriterExit};
pub use registry::ClientRegistry;
pub use state::{ClientId, ClientRecord, ClientStatus};
