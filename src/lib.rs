pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod protocol;
pub mod router;
pub mod server;

#[cfg(test)]
mod test_helpers;

pub use crate::config::ServerConfig;
pub use server::Server;
