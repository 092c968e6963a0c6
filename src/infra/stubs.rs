use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use crate::infra::{contracts::KeyValueStorage, error::StorageError};

/// In-memory storage. Clones share the same entries, so a test can keep a
/// handle and inspect what was written after handing a clone to the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing_writes: Arc<Mutex<bool>>,
}

impl MemoryKeyValueStorage {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        storage
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Makes every following `set_item` fail until switched back.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn fail_writes(&self, failing: bool) {
        *self
            .failing_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = failing;
    }
}

impl KeyValueStorage for MemoryKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self
            .failing_writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(StorageError::Unavailable {
                key: key.to_owned(),
            });
        }

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_written_entries() {
        let handle = MemoryKeyValueStorage::default();
        let mut writer = handle.clone();

        writer.set_item("k", "v").expect("write should succeed");

        assert_eq!(handle.raw("k"), Some("v".to_owned()));
    }

    #[test]
    fn failing_writes_keep_previous_value() {
        let mut storage = MemoryKeyValueStorage::with_entry("k", "old");
        storage.fail_writes(true);

        let result = storage.set_item("k", "new");

        assert!(matches!(result, Err(StorageError::Unavailable { .. })));
        assert_eq!(storage.raw("k"), Some("old".to_owned()));
    }
}
