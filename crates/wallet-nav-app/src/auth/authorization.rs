//! Session/wallet store consumed by the navigation layer

use std::fmt::Write as _;

use rand::RngCore;
use tokio::sync::RwLock;
use wallet_nav_core::prelude::*;
use wallet_nav_core::Wallet;

use super::error::AuthResult;
use super::repository::{AuthenticationRepository, PasscodeRepository};
use crate::storage::{run_blocking, KeyValueStore};

/// Key under which the last logged-in wallet is stored
pub const LAST_WALLET_KEY: &str = "com.waves.authorization.last-wallet";

const KEY_MATERIAL_BYTES: usize = 32;

/// Authorization state of the current user
#[trait_variant::make(AuthorizationUseCase: Send)]
pub trait LocalAuthorizationUseCase {
    /// Whether `wallet` currently has an unlocked session
    async fn is_authorized_wallet(&self, wallet: &Wallet) -> Result<bool>;

    /// The wallet that was last logged in, if any
    async fn last_wallet_logged_in(&self) -> Result<Option<Wallet>>;

    /// The wallet with an unlocked session
    async fn authorized_wallet(&self) -> Result<Wallet>;

    /// Drop the unlocked session, keeping the last wallet
    async fn revoke_auth(&self) -> Result<()>;

    /// Drop the session and forget the last wallet
    async fn logout(&self) -> Result<()>;

    /// Unlock `wallet` with its passcode
    async fn authorize(&self, wallet: &Wallet, passcode: &str) -> AuthResult<Wallet>;

    /// Create credentials for a new wallet and unlock it
    async fn register(&self, wallet: &Wallet, passcode: &str) -> AuthResult<Wallet>;
}

/// [`AuthorizationUseCase`] over the local passcode repository.
///
/// The unlocked session lives in memory only; the last wallet is persisted
/// in the key-value store so the next launch can offer the passcode screen.
/// Store reads and writes run on the blocking pool.
#[derive(Debug)]
pub struct LocalAuthorization {
    repository: PasscodeRepository,
    defaults: KeyValueStore,
    session: RwLock<Option<Wallet>>,
}

impl LocalAuthorization {
    pub fn new(repository: PasscodeRepository, defaults: KeyValueStore) -> Self {
        Self {
            repository,
            defaults,
            session: RwLock::new(None),
        }
    }

    async fn open_session(&self, wallet: &Wallet) -> Result<()> {
        let defaults = self.defaults.clone();
        let last = wallet.clone();
        run_blocking(move || defaults.set(LAST_WALLET_KEY, &last)).await?;
        *self.session.write().await = Some(wallet.clone());
        info!(wallet = %wallet, "Wallet authorized");
        Ok(())
    }
}

impl AuthorizationUseCase for LocalAuthorization {
    async fn is_authorized_wallet(&self, wallet: &Wallet) -> Result<bool> {
        Ok(self
            .session
            .read()
            .await
            .as_ref()
            .is_some_and(|current| current.address == wallet.address))
    }

    async fn last_wallet_logged_in(&self) -> Result<Option<Wallet>> {
        let defaults = self.defaults.clone();
        run_blocking(move || defaults.get(LAST_WALLET_KEY)).await
    }

    async fn authorized_wallet(&self) -> Result<Wallet> {
        self.session
            .read()
            .await
            .clone()
            .ok_or(Error::NoAuthorizedWallet)
    }

    async fn revoke_auth(&self) -> Result<()> {
        if let Some(wallet) = self.session.write().await.take() {
            info!(wallet = %wallet, "Authorization revoked");
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.session.write().await.take();
        let defaults = self.defaults.clone();
        run_blocking(move || defaults.remove(LAST_WALLET_KEY)).await?;
        info!("Logged out");
        Ok(())
    }

    async fn authorize(&self, wallet: &Wallet, passcode: &str) -> AuthResult<Wallet> {
        self.repository.authenticate(wallet.id(), passcode).await?;
        self.open_session(wallet).await?;
        Ok(wallet.clone())
    }

    async fn register(&self, wallet: &Wallet, passcode: &str) -> AuthResult<Wallet> {
        let key_material = generate_key_material();
        self.repository
            .register(wallet.id(), &key_material, passcode)
            .await?;
        self.open_session(wallet).await?;
        Ok(wallet.clone())
    }
}

fn generate_key_material() -> String {
    let mut bytes = [0u8; KEY_MATERIAL_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}
