//! Durable account collection.
//!
//! The whole collection lives under a single storage key and is rewritten on
//! every save. There is no partial update path.

use thiserror::Error;

use crate::{
    domain::account::Account,
    infra::{contracts::KeyValueStorage, error::StorageError},
};

pub const USERS_STORAGE_KEY: &str = "@chatinside_users";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode or decode accounts: {0}")]
    Codec(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct AccountStore {
    storage: Box<dyn KeyValueStorage>,
    accounts: Vec<Account>,
    loaded: bool,
}

impl AccountStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            accounts: Vec::new(),
            loaded: false,
        }
    }

    /// Reads the persisted collection and replaces the in-memory one.
    ///
    /// A missing or unreadable entry yields an empty collection. Read and
    /// decode failures are logged, never returned.
    pub fn load(&mut self) -> &[Account] {
        self.accounts = match self.read_accounts() {
            Ok(accounts) => {
                tracing::info!(accounts = accounts.len(), "accounts loaded");
                accounts
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to load accounts, starting empty");
                Vec::new()
            }
        };
        self.loaded = true;

        &self.accounts
    }

    /// Persists `accounts` as the new full collection.
    ///
    /// The in-memory collection is replaced only once the write succeeded.
    pub fn save(&mut self, accounts: Vec<Account>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&accounts).inspect_err(|error| {
            tracing::error!(error = %error, "failed to encode accounts");
        })?;

        if let Err(error) = self.storage.set_item(USERS_STORAGE_KEY, &raw) {
            tracing::error!(error = %error, "failed to save accounts");
            return Err(error.into());
        }

        tracing::info!(accounts = accounts.len(), "accounts saved");
        self.accounts = accounts;
        Ok(())
    }

    pub fn authenticate(&self, identifier: &str, secret: &str) -> Option<&Account> {
        tracing::debug!(identifier, "authenticating");
        self.accounts
            .iter()
            .find(|account| account.matches_credentials(identifier, secret))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.accounts
            .iter()
            .any(|account| account.identifier == identifier)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn read_accounts(&self) -> Result<Vec<Account>, StoreError> {
        match self.storage.get_item(USERS_STORAGE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}
