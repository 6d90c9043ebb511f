//! Local passcode repository

use wallet_nav_core::prelude::*;

use super::credentials::{CredentialRecord, CredentialStore};
use super::error::{AuthError, AuthResult};
use crate::storage::run_blocking;

/// Passcode registration and verification for a wallet id
#[trait_variant::make(AuthenticationRepository: Send)]
pub trait LocalAuthenticationRepository {
    /// Store `key_material` behind `passcode` for `id`, replacing any record
    async fn register(&self, id: &str, key_material: &str, passcode: &str) -> AuthResult<()>;

    /// Check `passcode` and return the stored key material
    async fn authenticate(&self, id: &str, passcode: &str) -> AuthResult<String>;

    /// Replace the passcode after verifying the old one
    async fn change_passcode(&self, id: &str, old_passcode: &str, passcode: &str)
        -> AuthResult<()>;
}

/// [`AuthenticationRepository`] backed by the on-disk [`CredentialStore`]
///
/// Store access runs on the blocking pool. There is no attempt counter or
/// lockout on this path.
#[derive(Debug, Clone)]
pub struct PasscodeRepository {
    store: CredentialStore,
}

impl PasscodeRepository {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }
}

impl AuthenticationRepository for PasscodeRepository {
    async fn register(&self, id: &str, key_material: &str, passcode: &str) -> AuthResult<()> {
        if passcode.is_empty() {
            return Err(AuthError::EmptyPasscode);
        }

        let store = self.store.clone();
        let record = CredentialRecord {
            id: id.to_string(),
            key_material: key_material.to_string(),
            passcode: passcode.to_string(),
        };
        run_blocking(move || store.upsert(record)).await?;

        info!(id = %id, "Registered passcode");
        Ok(())
    }

    async fn authenticate(&self, id: &str, passcode: &str) -> AuthResult<String> {
        let store = self.store.clone();
        let key = id.to_string();
        let record = run_blocking(move || store.get(&key))
            .await?
            .ok_or_else(|| AuthError::not_found(id))?;

        if record.passcode != passcode {
            debug!(id = %id, "Passcode rejected");
            return Err(AuthError::PasscodeIncorrect);
        }

        Ok(record.key_material)
    }

    async fn change_passcode(
        &self,
        id: &str,
        old_passcode: &str,
        passcode: &str,
    ) -> AuthResult<()> {
        if passcode.is_empty() {
            return Err(AuthError::EmptyPasscode);
        }

        let store = self.store.clone();
        let key = id.to_string();
        let old_passcode = old_passcode.to_string();
        let new_passcode = passcode.to_string();
        let outcome = run_blocking(move || {
            store.modify(&key, |record| {
                if record.passcode == old_passcode {
                    record.passcode = new_passcode;
                    true
                } else {
                    false
                }
            })
        })
        .await?;

        match outcome {
            None => Err(AuthError::not_found(id)),
            Some(false) => Err(AuthError::PasscodeIncorrect),
            Some(true) => {
                info!(id = %id, "Changed passcode");
                Ok(())
            }
        }
    }
}
