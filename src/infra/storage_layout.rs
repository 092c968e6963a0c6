use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "chatinside";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl StorageLayout {
    /// Uses `data_dir` when given, otherwise `$XDG_DATA_HOME/chatinside`
    /// falling back to the platform data directory.
    pub fn resolve(data_dir: Option<&Path>) -> Result<Self, AppError> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => env::var_os("XDG_DATA_HOME")
                .map(PathBuf::from)
                .or_else(dirs::data_dir)
                .ok_or_else(|| AppError::StoragePathResolution {
                    details: "unable to resolve data base directory (XDG_DATA_HOME/HOME)".into(),
                })?
                .join(APP_DIR_NAME),
        };
        let logs_dir = data_dir.join("logs");

        Ok(Self { data_dir, logs_dir })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.data_dir, &self.logs_dir] {
            fs::create_dir_all(dir).map_err(|source| AppError::StorageDirCreate {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }

    pub fn lock_file(&self) -> PathBuf {
        self.data_dir.join("chatinside.lock")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir.join("chatinside.log")
    }
}
