//! Main update function - handles state transitions (TEA pattern)

use tracing::{debug, info, warn};
use wallet_nav_core::{AppPhase, Display};

use crate::display::Transition;
use crate::message::Message;
use crate::state::{Alert, AppState};

use super::{UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Launch
        // ─────────────────────────────────────────────────────────
        Message::Launch => {
            state.relock.become_active();
            UpdateResult::action(UpdateAction::ResolveLaunchDisplay {
                has_shown_onboarding: state.app_settings.has_shown_onboarding,
            })
        }

        Message::DisplayResolved(resolved) => {
            if state.display.is_some() {
                debug!(resolved = %resolved, "Launch display already shown");
                return UpdateResult::none();
            }
            info!(resolved = %resolved, "Launch display resolved");
            state.show_display(resolved);
            if state.phase == AppPhase::Initializing {
                state.phase = if state.relock.is_active {
                    AppPhase::Active
                } else {
                    AppPhase::Background
                };
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Flow Callbacks
        // ─────────────────────────────────────────────────────────
        Message::OnboardingFinished => {
            if !state.apply_transition(&Transition::OnboardingFinished) {
                return UpdateResult::none();
            }
            state.app_settings.has_shown_onboarding = true;
            UpdateResult::action(UpdateAction::SaveAppSettings(state.app_settings))
        }

        Message::SelectWallet(wallet) => {
            if state.display != Some(Display::Enter) {
                debug!("Wallet selected outside the enter flow; ignored");
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::CheckWalletAuthorization(wallet))
        }

        Message::RegisterWallet { wallet, passcode } => {
            if state.display != Some(Display::Enter) {
                debug!("Registration outside the enter flow; ignored");
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::RegisterWallet { wallet, passcode })
        }

        Message::WalletLoggedIn(wallet) => {
            state.apply_transition(&Transition::LoginSucceeded(wallet));
            UpdateResult::none()
        }

        Message::WalletNeedsPasscode(wallet) => {
            state.apply_transition(&Transition::NeedsPasscode(wallet));
            UpdateResult::none()
        }

        Message::SubmitPasscode(passcode) => match state.passcode_wallet() {
            Some(wallet) => UpdateResult::action(UpdateAction::Authorize {
                wallet: wallet.clone(),
                passcode,
            }),
            None => {
                debug!("Passcode submitted without a passcode screen; ignored");
                UpdateResult::none()
            }
        },

        Message::PasscodeAccepted(wallet) => {
            if state.passcode_wallet().map(|w| &w.address) != Some(&wallet.address) {
                debug!(wallet = %wallet, "Stale passcode acceptance; ignored");
                return UpdateResult::none();
            }
            state.apply_transition(&Transition::PasscodeAccepted);
            UpdateResult::none()
        }

        Message::PasscodeRejected { wallet, reason } => {
            warn!(wallet = %wallet, "Passcode rejected: {}", reason);
            state.push_alert(Alert::PasscodeRejected { wallet, reason });
            UpdateResult::none()
        }

        Message::Logout => match state.display {
            Some(Display::Passcode(_) | Display::Slide(_)) => {
                UpdateResult::action(UpdateAction::Logout)
            }
            _ => {
                debug!("No wallet to log out");
                UpdateResult::none()
            }
        },

        Message::LoggedOut => {
            state.apply_transition(&Transition::LoggedOut);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Application Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::DidEnterBackground => match state.relock.enter_background() {
            Some(generation) => {
                state.phase = AppPhase::Background;
                UpdateResult::action(UpdateAction::ScheduleRelock {
                    generation,
                    delay: state.relock.delay,
                })
            }
            None => UpdateResult::none(),
        },

        Message::DidBecomeActive => {
            if !state.relock.become_active() {
                return UpdateResult::none();
            }
            if state.display.is_some() {
                state.phase = AppPhase::Active;
            }
            UpdateResult::action(UpdateAction::CancelRelock)
        }

        Message::RelockTimerFired { generation } => {
            if !state.relock.should_relock(generation) {
                debug!(generation, "Stale re-lock timer; ignored");
                return UpdateResult::none();
            }
            info!("Background re-lock delay elapsed");
            UpdateResult::action(UpdateAction::RevokeAuthAndReload)
        }

        Message::RelockResolved { wallet } => {
            let has_shown_onboarding = state.app_settings.has_shown_onboarding;
            state.apply_transition(&Transition::BackgroundTimeout {
                wallet,
                has_shown_onboarding,
            });
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Menu
        // ─────────────────────────────────────────────────────────
        Message::OpenMenuLink(link) => {
            if !matches!(state.display, Some(Display::Slide(_))) {
                debug!(link = %link, "Menu is not reachable from this display");
                return UpdateResult::none();
            }
            match link.url() {
                Ok(url) => UpdateResult::action(UpdateAction::OpenUrl {
                    url,
                    browser: state.browser.clone(),
                }),
                Err(e) => UpdateResult::message(Message::ActionFailed {
                    message: format!("Invalid {} link: {}", link, e),
                    fatal: false,
                }),
            }
        }

        Message::ActionFailed { message, fatal } => {
            warn!(fatal, "Action failed: {}", message);
            state.push_alert(Alert::Error { message, fatal });
            UpdateResult::none()
        }
    }
}
