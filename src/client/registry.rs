//! Client registry
//!
//! Single source of truth for who is connected. Callers serialize access
//! (the server keeps it behind one mutex), so a mutation and any directory
//! rebroadcast it triggers are never interleaved with another unit of work.

use std::collections::HashMap;

use crate::client::{ClientId, ClientRecord, ConnectionHandle};

/// Registry of live connections keyed by relay-assigned id
#[derive(Default)]
pub struct ClientRegistry {
    clients: HashMap<ClientId, ClientRecord>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Inserts a fresh unregistered record for `id`.
    ///
    /// Ids are minted by the relay, so an existing entry is replaced only if
    /// a caller reuses one, which the server never does.
    pub fn add(&mut self, id: ClientId, handle: ConnectionHandle) -> &mut ClientRecord {
        let record = ClientRecord::new(id.clone(), handle);
        self.clients.entry(id).insert_entry(record).into_mut()
    }

    pub fn get(&self, id: &ClientId) -> Option<&ClientRecord> {
        self.clients.get(id)
    }

    pub fn get_mut(&mut self, id: &ClientId) -> Option<&mut ClientRecord> {
        self.clients.get_mut(id)
    }

    pub fn remove(&mut self, id: &ClientId) -> Option<ClientRecord> {
        self.clients.remove(id)
    }

    /// Records that completed registration, in no particular order.
    pub fn registered_records(&self) -> impl Iterator<Item = &ClientRecord> {
        self.clients.values().filter(|record| record.is_registered())
    }

    /// Every live record, registered or not, in no particular order.
    pub fn all_records(&self) -> impl Iterator<Item = &ClientRecord> {
        self.clients.values()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn registered_count(&self) -> usize {
        self.registered_records().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_client(registry: &mut ClientRegistry, id: &str) -> ClientId {
        let (handle, _rx) = ConnectionHandle::channel();
        let id = ClientId::from(id);
        registry.add(id.clone(), handle);
        id
    }

    #[test]
    fn add_then_get() {
        let mut registry = ClientRegistry::new();
        let id = add_client(&mut registry, "a");

        let record = registry.get(&id).unwrap();
        assert_eq!(record.id(), &id);
        assert!(!record.is_registered());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_drops_record() {
        let mut registry = ClientRegistry::new();
        let id = add_client(&mut registry, "a");

        assert!(registry.remove(&id).is_some());
        assert!(registry.get(&id).is_none());
        assert!(registry.remove(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn registered_records_only_lists_registered() {
        let mut registry = ClientRegistry::new();
        let a = add_client(&mut registry, "a");
        let _b = add_client(&mut registry, "b");

        registry
            .get_mut(&a)
            .unwrap()
            .register(Some("Mac-1".to_string()), None, None);

        let registered: Vec<_> = registry.registered_records().map(|r| r.id().clone()).collect();
        assert_eq!(registered, vec![a]);
        assert_eq!(registry.all_records().count(), 2);
        assert_eq!(registry.registered_count(), 1);
    }
}
