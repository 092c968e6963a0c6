use std::path::PathBuf;

use crate::{
    generation::GeminiClient,
    infra::{
        self,
        account_store::AccountStore,
        config,
        contracts::KeyValueStorage,
        error::AppError,
        file_storage::FileKeyValueStorage,
        storage_layout::StorageLayout,
        stubs::MemoryKeyValueStorage,
    },
    usecases::context::AppContext,
};

#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    pub config_path: Option<PathBuf>,
    /// Overrides `storage.data_dir` from the config file.
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

pub fn bootstrap(options: &BootstrapOptions) -> Result<AppContext, AppError> {
    let context = build_context(options)?;
    context.layout.ensure_dirs()?;
    infra::logging::init(&context.config.logging, &context.layout.log_file())?;

    tracing::debug!(
        data_dir = %context.layout.data_dir.display(),
        ephemeral = context.ephemeral,
        generation = ?context.config.generation,
        "context built"
    );
    Ok(context)
}

fn build_context(options: &BootstrapOptions) -> Result<AppContext, AppError> {
    let config = config::load(options.config_path.as_deref())?;

    let data_dir = options
        .data_dir
        .as_deref()
        .or(config.storage.data_dir.as_deref());
    let layout = StorageLayout::resolve(data_dir)?;

    let storage: Box<dyn KeyValueStorage> = if options.ephemeral {
        Box::new(MemoryKeyValueStorage::default())
    } else {
        Box::new(FileKeyValueStorage::new(&layout.data_dir))
    };
    let generator = GeminiClient::from_config(&config.generation)?;

    Ok(AppContext::new(
        config,
        layout,
        AccountStore::new(storage),
        Box::new(generator),
        options.ephemeral,
    ))
}
