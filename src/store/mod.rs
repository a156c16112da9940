//! Key-value storage the keeper persists games through.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

/// String-keyed, string-valued storage.
///
/// Callers are expected to serialize access; implementations need no
/// internal locking.
pub trait KvStore {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Lists every entry whose key starts with `prefix`, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn iter_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError>;

    /// Writes several entries. Backends with transactions write all or none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn write_batch(&mut self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(&key, &value)?;
        }
        Ok(())
    }
}
