//! Passcode authentication and wallet authorization
//!
//! - `credentials`: file-backed credential records keyed by wallet id
//! - `repository`: register / authenticate / change passcode
//! - `authorization`: the session/wallet store consumed by navigation

pub mod authorization;
pub mod credentials;
pub mod error;
pub mod repository;

pub use authorization::{AuthorizationUseCase, LocalAuthorization, LAST_WALLET_KEY};
pub use credentials::{CredentialRecord, CredentialStore};
pub use error::{AuthError, AuthResult};
pub use repository::{AuthenticationRepository, PasscodeRepository};
