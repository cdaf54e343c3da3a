//! Module `state`
//!
//! Defines the per-connection `ClientRecord` and its identity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::client::ConnectionHandle;
use crate::protocol::{ClientInfo, PeerInfo};

const UNKNOWN_PLATFORM: &str = "unknown";

/// Relay-assigned identifier of one live connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Mints a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder machine name for clients that register without one.
    pub fn placeholder_name(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("Client-{}", prefix)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Connection status advertised in the directory.
///
/// Only `Connected` exists; records are removed rather than transitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Connected,
}

/// State of one connected client.
///
/// Created unregistered at accept time; `register` fills in the identity
/// metadata, replacing whatever a previous registration set.
pub struct ClientRecord {
    id: ClientId,
    handle: ConnectionHandle,
    machine_name: Option<String>,
    screens: Vec<Value>,
    platform: Option<String>,
    status: ClientStatus,
    connected_at: DateTime<Utc>,
}

impl ClientRecord {
    pub fn new(id: ClientId, handle: ConnectionHandle) -> Self {
        Self {
            id,
            handle,
            machine_name: None,
            screens: Vec::new(),
            platform: None,
            status: ClientStatus::Connected,
            connected_at: Utc::now(),
        }
    }

    /// Overwrites the identity metadata, applying the defaults for absent or
    /// empty fields. Nothing from an earlier registration survives.
    pub fn register(
        &mut self,
        machine_name: Option<String>,
        screens: Option<Vec<Value>>,
        platform: Option<String>,
    ) {
        self.machine_name = Some(
            machine_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.id.placeholder_name()),
        );
        self.screens = screens.unwrap_or_default();
        self.platform = Some(
            platform
                .filter(|platform| !platform.is_empty())
                .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string()),
        );
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }

    /// A record is registered once it carries a non-empty machine name.
    pub fn is_registered(&self) -> bool {
        self.machine_name.as_deref().is_some_and(|name| !name.is_empty())
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.machine_name.as_deref()
    }

    pub fn screens(&self) -> &[Value] {
        &self.screens
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn status(&self) -> ClientStatus {
        self.status
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    // --------------------
    // Wire projections
    // --------------------

    /// Directory entry for this client as seen by its peers.
    pub fn peer_info(&self) -> PeerInfo {
        PeerInfo {
            id: self.id.clone(),
            machine_name: self.machine_name.clone().unwrap_or_default(),
            screens: self.screens.clone(),
            platform: self.platform.clone(),
            status: self.status,
        }
    }

    /// Identity snapshot echoed back on `registration_confirmed`.
    pub fn client_info(&self) -> ClientInfo {
        ClientInfo {
            id: self.id.clone(),
            machine_name: self.machine_name.clone().unwrap_or_default(),
            screens: self.screens.clone(),
            platform: self.platform.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ClientRecord {
        let (handle, _rx) = ConnectionHandle::channel();
        ClientRecord::new(ClientId::from("0123456789abcdef"), handle)
    }

    #[test]
    fn new_record_is_unregistered() {
        let record = record();
        assert!(!record.is_registered());
        assert_eq!(record.status(), ClientStatus::Connected);
        assert!(record.screens().is_empty());
    }

    #[test]
    fn register_applies_defaults() {
        let mut record = record();
        record.register(Some(String::new()), None, None);

        assert!(record.is_registered());
        assert_eq!(record.machine_name(), Some("Client-01234567"));
        assert_eq!(record.platform(), Some("unknown"));
        assert!(record.screens().is_empty());
    }

    #[test]
    fn re_register_replaces_everything() {
        let mut record = record();
        record.register(
            Some("Mac-1".to_string()),
            Some(vec![json!({"w": 1920, "h": 1080})]),
            Some("macos".to_string()),
        );
        record.register(Some("Mac-2".to_string()), None, None);

        assert_eq!(record.machine_name(), Some("Mac-2"));
        assert!(record.screens().is_empty());
        assert_eq!(record.platform(), Some("unknown"));
    }

    #[test]
    fn client_id_serializes_as_plain_string() {
        let id = ClientId::from("abc");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc"));
    }
}
