use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Overrides `generation.api_key` so the key can stay out of config files.
pub const API_KEY_ENV: &str = "CHATINSIDE_API_KEY";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = load_file(path)?;
    apply_env_overrides(&mut config);

    Ok(config)
}

fn load_file(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Some(api_key) = env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()) {
        config.generation.api_key = api_key.trim().to_owned();
    }
}
