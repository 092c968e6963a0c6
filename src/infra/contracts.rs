use crate::infra::error::StorageError;

/// Whole-value string storage addressed by key.
pub trait KeyValueStorage {
    /// Returns `None` when nothing was ever stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key` in a single write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
