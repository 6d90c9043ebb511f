//! Authentication failures surfaced to the UI

use thiserror::Error;

pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Typed authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Passcode must not be empty")]
    EmptyPasscode,

    #[error("No credential stored for wallet {id}")]
    NotFound { id: String },

    #[error("Passcode is incorrect")]
    PasscodeIncorrect,

    /// Reserved for attempt limiting; nothing produces it today
    #[error("No passcode attempts left")]
    AttemptsEnded,

    #[error("Credential store failure: {0}")]
    UnderlyingStore(#[from] wallet_nav_core::Error),
}

impl AuthError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Failures caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AuthError::EmptyPasscode | AuthError::PasscodeIncorrect | AuthError::AttemptsEnded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(AuthError::PasscodeIncorrect.to_string(), "Passcode is incorrect");
        assert!(AuthError::not_found("3PAddr").to_string().contains("3PAddr"));
    }

    #[test]
    fn test_store_errors_wrap() {
        let err: AuthError = wallet_nav_core::Error::storage("locked").into();
        assert!(matches!(err, AuthError::UnderlyingStore(_)));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_user_errors() {
        assert!(AuthError::EmptyPasscode.is_user_error());
        assert!(AuthError::PasscodeIncorrect.is_user_error());
        assert!(!AuthError::not_found("x").is_user_error());
    }
}
