use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError};

/// Installs the global subscriber. Output goes to a file because the shell
/// owns stdout.
pub fn init(config: &LogConfig, default_file: &Path) -> Result<(), AppError> {
    let path = config.file.as_deref().unwrap_or(default_file);
    let writer = file_appender(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(AppError::LoggingInit)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, AppError> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::StoragePathResolution {
            details: format!("log file path {} has no file name", path.display()),
        })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|error| AppError::LoggingInit(Box::new(error)))
}
