//! Configuration management for the Mouffette relay
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `MOUFFETTE_*` environment variables, then the port given on the
//! command line.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATS_INTERVAL_SECS: u64 = 30;
const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 250;

/// Relay server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the listener binds to
    /// Environment: MOUFFETTE_BIND_ADDRESS
    pub bind_address: String,

    /// WebSocket listen port (0 picks an ephemeral port)
    /// Environment: MOUFFETTE_PORT
    pub port: u16,

    /// Seconds between two status report lines
    /// Environment: MOUFFETTE_STATS_INTERVAL_SECS
    pub stats_interval_secs: u64,

    /// Time left to queued writes after the listener closes
    /// Environment: MOUFFETTE_SHUTDOWN_GRACE_MS
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            stats_interval_secs: DEFAULT_STATS_INTERVAL_SECS,
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, `config.toml` and the environment,
    /// applying `port_override` last.
    pub fn load(port_override: Option<u16>) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("stats_interval_secs", DEFAULT_STATS_INTERVAL_SECS as i64)?
            .set_default("shutdown_grace_ms", DEFAULT_SHUTDOWN_GRACE_MS as i64)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("MOUFFETTE"));

        if let Some(port) = port_override {
            builder = builder.set_override("port", i64::from(port))?;
        }

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.stats_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "stats_interval_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_socket(), "0.0.0.0:8080");
        assert_eq!(config.stats_interval(), Duration::from_secs(30));
    }

    #[test]
    fn validate_rejects_zero_stats_interval() {
        let config = ServerConfig {
            stats_interval_secs: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_bind_address() {
        let config = ServerConfig {
            bind_address: "  ".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
