use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use fs2::FileExt;

use crate::{infra::error::AppError, usecases::context::AppContext};

/// Exclusive advisory lock on the data directory, released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    file: File,
    path: PathBuf,
}

impl DataDirLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

pub struct StartupPlan {
    pub lock_guard: Option<DataDirLock>,
    pub accounts_loaded: usize,
}

/// Locks the data directory, loads the account store, and marks the session
/// ready. Ephemeral contexts skip the lock.
pub fn start(context: &mut AppContext) -> Result<StartupPlan, AppError> {
    let lock_guard = if context.ephemeral {
        None
    } else {
        Some(acquire_data_lock(context.layout.lock_file())?)
    };

    let accounts_loaded = context.store.load().len();
    context.session.mark_ready();

    Ok(StartupPlan {
        lock_guard,
        accounts_loaded,
    })
}

fn acquire_data_lock(path: PathBuf) -> Result<DataDirLock, AppError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .map_err(|source| AppError::DataLock {
            path: path.clone(),
            source,
        })?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(DataDirLock { file, path }),
        Err(source) if source.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
            Err(AppError::DataDirBusy { path })
        }
        Err(source) => Err(AppError::DataLock { path, source }),
    }
}
