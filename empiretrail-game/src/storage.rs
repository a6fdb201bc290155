//! Key-value persistence seam shared by the achievement and save systems.
//!
//! Production hosts back this with browser local storage; tests and headless
//! runs use [`MemoryStore`]. All values are JSON strings; callers own the
//! (de)serialization so a store stays a dumb string map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

/// Storage key for the persisted set of unlocked achievement ids
/// (JSON array of strings).
pub const UNLOCKED_ACHIEVEMENTS_KEY: &str = "empire_trail_achievements";

/// Storage key for the numbered save-slot map
/// (JSON object mapping `slot_1..slot_5` to a save record).
pub const SAVE_SLOTS_KEY: &str = "empire_trail_saves";

/// Storage key for the single auto-save record, kept outside the slot map.
pub const AUTO_SAVE_KEY: &str = "empire_trail_autosave";

/// Errors a storage backend can report.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused the write (e.g. browser quota exhausted).
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable string-keyed store the engine persists through.
///
/// The engine performs whole-document read-modify-write cycles against these
/// keys and assumes a single writer; see the save system docs.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`; removing a missing key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be mutated.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store with shared-handle semantics: clones see the same map,
/// so one scratch store can back both the achievement service and the save
/// system in a session. Not thread-safe by design; the game model is
/// single-writer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Peek at a raw stored value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Overwrite a raw value directly, bypassing the trait. Handy for
    /// seeding corrupt or legacy payloads in tests.
    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrips_values() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.save("k", "v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn clones_share_the_same_map() {
        let mut store = MemoryStore::new();
        let alias = store.clone();
        store.save("k", "v").unwrap();
        assert_eq!(alias.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("absent").is_ok());
    }
}
