use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to initialize logging: {0}")]
    LoggingInit(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("failed to resolve storage path: {details}")]
    StoragePathResolution { details: String },
    #[error("failed to create storage directory at {path}: {source}")]
    StorageDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("data directory is already in use by another process (lock: {path})")]
    DataDirBusy { path: PathBuf },
    #[error("failed to lock data directory at {path}: {source}")]
    DataLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failures of a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read storage entry at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write storage entry at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage key `{key}` does not map to a valid entry name")]
    InvalidKey { key: String },
    #[error("storage backend is unavailable for key `{key}`")]
    Unavailable { key: String },
}
