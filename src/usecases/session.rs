//! Who is currently signed in.

use crate::{domain::account::Account, infra::account_store::AccountStore};

#[derive(Debug)]
pub struct Session {
    current: Option<Account>,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current: None,
            loading: true,
        }
    }
}

impl Session {
    pub fn current_account(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// True until the account store has been loaded.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mark_ready(&mut self) {
        self.loading = false;
    }

    /// Signs in on an exact identifier/secret match. On failure the current
    /// account is left as it was.
    pub fn login(&mut self, store: &AccountStore, identifier: &str, secret: &str) -> bool {
        match store.authenticate(identifier, secret) {
            Some(account) => {
                tracing::info!(identifier, "signed in");
                self.current = Some(account.clone());
                true
            }
            None => {
                tracing::info!(identifier, "sign-in rejected");
                false
            }
        }
    }

    /// Creates an account, persists the grown collection, and signs it in.
    ///
    /// Fails on a blank field, a taken identifier (case-sensitive), or a
    /// storage write failure. None of these change the current account.
    pub fn register(
        &mut self,
        store: &mut AccountStore,
        identifier: &str,
        secret: &str,
        display_name: &str,
    ) -> bool {
        if [identifier, secret, display_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            tracing::warn!("registration rejected: blank field");
            return false;
        }

        if store.contains(identifier) {
            tracing::info!(identifier, "registration rejected: identifier already taken");
            return false;
        }

        let account = Account::new(identifier, secret, display_name);
        let mut accounts = store.accounts().to_vec();
        accounts.push(account.clone());

        if store.save(accounts).is_err() {
            tracing::warn!(identifier, "registration not persisted");
            return false;
        }

        tracing::info!(identifier, display_name, "account registered");
        self.current = Some(account);
        true
    }

    /// Forgets the signed-in account. Storage is untouched.
    pub fn sign_out(&mut self) {
        if let Some(account) = self.current.take() {
            tracing::info!(identifier = %account.identifier, "signed out");
        }
    }

    /// Replaces the signed-in account wholesale with an already persisted copy.
    pub fn set_current_account(&mut self, account: Account) {
        self.current = Some(account);
    }
}
