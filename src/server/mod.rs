//! Server core functionality
//!
//! Accept loop, per-connection sessions and the periodic status report.

pub mod core;
pub mod session;
pub mod stats;

pub use core::Server;
pub use stats::RelayStats;
