use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::infra::secrets::mask_secret;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub storage: StorageConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file; defaults to `<data_dir>/logs/chatinside.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_owned(),
            model: "gemini-2.0-flash".to_owned(),
            api_key: String::new(),
            timeout_ms: 30_000,
        }
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &mask_secret(&self.api_key))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
