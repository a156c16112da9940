//! In-memory key-value store.

use super::{KvStore, StoreError};
use std::collections::BTreeMap;

/// `BTreeMap`-backed store. Never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn iter_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self
            .entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").expect("infallible"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemoryStore::new();
        store.set("k", "1").expect("infallible");
        store.set("k", "2").expect("infallible");
        assert_eq!(store.get("k").expect("infallible").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iter_prefix() {
        let mut store = MemoryStore::new();
        store
            .write_batch(vec![
                ("a-1".to_string(), "x".to_string()),
                ("a-2".to_string(), "y".to_string()),
                ("b-1".to_string(), "z".to_string()),
            ])
            .expect("infallible");
        let found = store.iter_prefix("a-").expect("infallible");
        assert_eq!(
            found,
            vec![
                ("a-1".to_string(), "x".to_string()),
                ("a-2".to_string(), "y".to_string())
            ]
        );
    }
}
