use crate::{
    generation::TextGenerator,
    infra::{account_store::AccountStore, config::AppConfig, storage_layout::StorageLayout},
    usecases::{conversation::Conversation, session::Session},
};

/// Services built once at startup and handed to the front-end by reference.
pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
    pub store: AccountStore,
    pub session: Session,
    pub conversation: Conversation,
    pub generator: Box<dyn TextGenerator>,
    /// Accounts live in memory only; no lock is taken on the data directory.
    pub ephemeral: bool,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        layout: StorageLayout,
        store: AccountStore,
        generator: Box<dyn TextGenerator>,
        ephemeral: bool,
    ) -> Self {
        Self {
            config,
            layout,
            store,
            session: Session::default(),
            conversation: Conversation::default(),
            generator,
            ephemeral,
        }
    }
}
