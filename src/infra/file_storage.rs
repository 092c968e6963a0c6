use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::infra::{contracts::KeyValueStorage, error::StorageError};

const ENTRY_EXTENSION: &str = "json";

/// Stores every key as its own file inside `root`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStorage {
    root: PathBuf,
}

impl FileKeyValueStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let name = entry_name(key).ok_or_else(|| StorageError::InvalidKey {
            key: key.to_owned(),
        })?;

        Ok(self.root.join(format!("{name}.{ENTRY_EXTENSION}")))
    }
}

impl KeyValueStorage for FileKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        let staging = path.with_extension(format!("{ENTRY_EXTENSION}.tmp"));

        write_then_rename(&staging, &path, value).map_err(|source| {
            let _ = fs::remove_file(&staging);
            StorageError::Write { path, source }
        })
    }
}

fn write_then_rename(staging: &Path, target: &Path, value: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(staging, value)?;
    fs::rename(staging, target)
}

/// Maps a storage key onto a file stem: leading `@` dropped, anything outside
/// `[A-Za-z0-9_-]` replaced by `_`.
fn entry_name(key: &str) -> Option<String> {
    let name: String = key
        .trim_start_matches('@')
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_app_key_to_plain_file_name() {
        let storage = FileKeyValueStorage::new("/data");

        let path = storage
            .entry_path("@chatinside_users")
            .expect("key should map");

        assert_eq!(path, PathBuf::from("/data/chatinside_users.json"));
    }

    #[test]
    fn rejects_keys_without_usable_characters() {
        let storage = FileKeyValueStorage::new("/data");

        assert!(matches!(
            storage.entry_path("@@"),
            Err(StorageError::InvalidKey { .. })
        ));
    }

    #[test]
    fn missing_entry_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileKeyValueStorage::new(dir.path());

        let value = storage.get_item("@nothing").expect("read should succeed");

        assert_eq!(value, None);
    }

    #[test]
    fn set_item_replaces_previous_value_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileKeyValueStorage::new(dir.path().join("nested"));

        storage.set_item("@users", "[1]").expect("first write");
        storage.set_item("@users", "[2]").expect("second write");

        assert_eq!(
            storage.get_item("@users").expect("read"),
            Some("[2]".to_owned())
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .expect("dir should exist")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn write_failure_is_reported_with_target_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").expect("blocker should be written");
        let mut storage = FileKeyValueStorage::new(&blocker);

        let error = storage
            .set_item("@users", "[]")
            .expect_err("write under a file must fail");

        match error {
            StorageError::Write { path, .. } => assert!(path.starts_with(&blocker)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
