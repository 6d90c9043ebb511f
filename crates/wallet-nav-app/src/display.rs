//! Display state machine
//!
//! [`compute_display`] is the pure mapping from (wallet, authorization,
//! onboarding flag) to the top-level display. [`resolve_display`] and
//! [`launch_display`] feed it from the authorization store, treating every
//! store failure as "not authorized" / "no wallet".

use wallet_nav_core::prelude::*;
use wallet_nav_core::{Display, Wallet};

use crate::auth::AuthorizationUseCase;

/// Map the current session facts onto a display
pub fn compute_display(
    wallet: Option<&Wallet>,
    is_authorized: bool,
    has_shown_onboarding: bool,
) -> Display {
    match wallet {
        Some(wallet) if is_authorized => Display::Slide(wallet.clone()),
        Some(wallet) => Display::Passcode(wallet.clone()),
        None if has_shown_onboarding => Display::Enter,
        None => Display::Hello,
    }
}

/// Query authorization for `wallet` and compute the display
pub async fn resolve_display<A>(
    auth: &A,
    wallet: Option<&Wallet>,
    has_shown_onboarding: bool,
) -> Display
where
    A: AuthorizationUseCase + Sync,
{
    let is_authorized = match wallet {
        Some(wallet) => auth.is_authorized_wallet(wallet).await.unwrap_or_else(|e| {
            warn!("Authorization check failed, treating as locked: {}", e);
            false
        }),
        None => false,
    };

    compute_display(wallet, is_authorized, has_shown_onboarding)
}

/// Display to show at launch, starting from the last logged-in wallet
pub async fn launch_display<A>(auth: &A, has_shown_onboarding: bool) -> Display
where
    A: AuthorizationUseCase + Sync,
{
    let wallet = auth.last_wallet_logged_in().await.unwrap_or_else(|e| {
        warn!("Failed to load last wallet, starting without one: {}", e);
        None
    });

    resolve_display(auth, wallet.as_ref(), has_shown_onboarding).await
}

/// Delegate callbacks and lifecycle outcomes that move the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Hello flow completed
    OnboardingFinished,
    /// Enter flow produced an already-authorized wallet
    LoginSucceeded(Wallet),
    /// Enter flow produced a wallet that must be unlocked first
    NeedsPasscode(Wallet),
    /// Passcode flow unlocked its wallet
    PasscodeAccepted,
    LoggedOut,
    /// Re-lock delay elapsed in background; carries the reloaded last wallet
    BackgroundTimeout {
        wallet: Option<Wallet>,
        has_shown_onboarding: bool,
    },
}

impl Transition {
    /// Next display, or `None` if `self` does not apply to `current`
    pub fn apply(&self, current: &Display) -> Option<Display> {
        match (current, self) {
            (Display::Hello, Transition::OnboardingFinished) => Some(Display::Enter),

            (Display::Enter, Transition::LoginSucceeded(wallet)) => {
                Some(Display::Slide(wallet.clone()))
            }
            (Display::Enter, Transition::NeedsPasscode(wallet)) => {
                Some(Display::Passcode(wallet.clone()))
            }

            (Display::Passcode(wallet), Transition::PasscodeAccepted) => {
                Some(Display::Slide(wallet.clone()))
            }

            (Display::Passcode(_) | Display::Slide(_), Transition::LoggedOut) => {
                Some(Display::Enter)
            }

            // Applies from any display
            (
                _,
                Transition::BackgroundTimeout {
                    wallet,
                    has_shown_onboarding,
                },
            ) => match wallet {
                Some(wallet) => Some(Display::Passcode(wallet.clone())),
                None if *has_shown_onboarding => Some(Display::Enter),
                None => None,
            },

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_nav_core::{Error, Result};

    fn wallet() -> Wallet {
        Wallet::new("3PAddr", "PubKey")
    }

    #[test]
    fn test_compute_display_with_wallet() {
        for onboarded in [false, true] {
            assert_eq!(
                compute_display(Some(&wallet()), true, onboarded),
                Display::Slide(wallet())
            );
            assert_eq!(
                compute_display(Some(&wallet()), false, onboarded),
                Display::Passcode(wallet())
            );
        }
    }

    #[test]
    fn test_compute_display_without_wallet() {
        for authorized in [false, true] {
            assert_eq!(compute_display(None, authorized, false), Display::Hello);
            assert_eq!(compute_display(None, authorized, true), Display::Enter);
        }
    }

    #[test]
    fn test_top_level_transitions() {
        let w = wallet();
        let cases = [
            (Display::Hello, Transition::OnboardingFinished, Display::Enter),
            (
                Display::Enter,
                Transition::LoginSucceeded(w.clone()),
                Display::Slide(w.clone()),
            ),
            (
                Display::Enter,
                Transition::NeedsPasscode(w.clone()),
                Display::Passcode(w.clone()),
            ),
            (
                Display::Passcode(w.clone()),
                Transition::PasscodeAccepted,
                Display::Slide(w.clone()),
            ),
            (Display::Passcode(w.clone()), Transition::LoggedOut, Display::Enter),
            (Display::Slide(w.clone()), Transition::LoggedOut, Display::Enter),
            (
                Display::Slide(w.clone()),
                Transition::BackgroundTimeout {
                    wallet: Some(w.clone()),
                    has_shown_onboarding: true,
                },
                Display::Passcode(w.clone()),
            ),
        ];

        for (from, transition, to) in cases {
            assert_eq!(transition.apply(&from), Some(to), "{from} via {transition:?}");
        }
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let w = wallet();
        assert_eq!(Transition::OnboardingFinished.apply(&Display::Enter), None);
        assert_eq!(Transition::PasscodeAccepted.apply(&Display::Enter), None);
        assert_eq!(Transition::LoggedOut.apply(&Display::Hello), None);
        assert_eq!(
            Transition::LoginSucceeded(w.clone()).apply(&Display::Slide(w)),
            None
        );
    }

    #[test]
    fn test_background_timeout_without_wallet() {
        let onboarded = Transition::BackgroundTimeout {
            wallet: None,
            has_shown_onboarding: true,
        };
        let fresh = Transition::BackgroundTimeout {
            wallet: None,
            has_shown_onboarding: false,
        };

        assert_eq!(onboarded.apply(&Display::Slide(wallet())), Some(Display::Enter));
        assert_eq!(fresh.apply(&Display::Hello), None);
    }

    /// Store whose every call fails
    struct BrokenStore;

    impl AuthorizationUseCase for BrokenStore {
        async fn is_authorized_wallet(&self, _wallet: &Wallet) -> Result<bool> {
            Err(Error::authorization("unavailable"))
        }

        async fn last_wallet_logged_in(&self) -> Result<Option<Wallet>> {
            Err(Error::authorization("unavailable"))
        }

        async fn authorized_wallet(&self) -> Result<Wallet> {
            Err(Error::NoAuthorizedWallet)
        }

        async fn revoke_auth(&self) -> Result<()> {
            Ok(())
        }

        async fn logout(&self) -> Result<()> {
            Ok(())
        }

        async fn authorize(
            &self,
            _wallet: &Wallet,
            _passcode: &str,
        ) -> crate::auth::AuthResult<Wallet> {
            Err(crate::auth::AuthError::PasscodeIncorrect)
        }

        async fn register(
            &self,
            _wallet: &Wallet,
            _passcode: &str,
        ) -> crate::auth::AuthResult<Wallet> {
            Err(crate::auth::AuthError::EmptyPasscode)
        }
    }

    #[tokio::test]
    async fn test_store_errors_are_swallowed() {
        assert_eq!(
            resolve_display(&BrokenStore, Some(&wallet()), true).await,
            Display::Passcode(wallet())
        );
        assert_eq!(launch_display(&BrokenStore, false).await, Display::Hello);
        assert_eq!(launch_display(&BrokenStore, true).await, Display::Enter);
    }
}
