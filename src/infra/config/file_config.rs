use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{AppConfig, GenerationConfig, LogConfig, StorageConfig};

#[derive(Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub storage: Option<FileStorageConfig>,
    pub generation: Option<FileGenerationConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(storage) = self.storage {
            storage.merge_into(&mut config.storage);
        }

        if let Some(generation) = self.generation {
            generation.merge_into(&mut config.generation);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileStorageConfig {
    pub data_dir: Option<PathBuf>,
}

impl FileStorageConfig {
    fn merge_into(self, config: &mut StorageConfig) {
        if let Some(data_dir) = self.data_dir {
            config.data_dir = Some(data_dir);
        }
    }
}

#[derive(Deserialize, Default)]
pub struct FileGenerationConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl FileGenerationConfig {
    fn merge_into(self, config: &mut GenerationConfig) {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint.trim_end_matches('/').to_owned();
        }

        if let Some(model) = self.model {
            config.model = model;
        }

        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
    }
}
