//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::mpsc;
use wallet_nav_core::prelude::*;
use wallet_nav_core::Wallet;

use crate::app_settings::SettingsStore;
use crate::auth::{AuthError, AuthorizationUseCase};
use crate::display::launch_display;
use crate::handler::UpdateAction;
use crate::menu::open_url_in_browser;
use crate::message::Message;
use crate::relock::RelockTimer;

/// Collaborators the action handlers run against
#[derive(Debug)]
pub struct ActionContext<A> {
    pub auth: Arc<A>,
    pub settings_store: SettingsStore,
    pub relock_timer: RelockTimer,
}

impl<A> ActionContext<A> {
    pub fn new(auth: Arc<A>, settings_store: SettingsStore) -> Self {
        Self {
            auth,
            settings_store,
            relock_timer: RelockTimer::new(),
        }
    }
}

/// Execute an action, spawning a background task where it does I/O
pub fn handle_action<A>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    ctx: &mut ActionContext<A>,
) where
    A: AuthorizationUseCase + Sync + 'static,
{
    match action {
        UpdateAction::ResolveLaunchDisplay {
            has_shown_onboarding,
        } => {
            let auth = ctx.auth.clone();
            tokio::spawn(async move {
                let display = launch_display(auth.as_ref(), has_shown_onboarding).await;
                send(&msg_tx, Message::DisplayResolved(display)).await;
            });
        }

        UpdateAction::SaveAppSettings(settings) => {
            let store = ctx.settings_store.clone();
            tokio::spawn(async move {
                let result = tokio::task::spawn_blocking(move || store.save(&settings)).await;
                match result {
                    Ok(Ok(())) => debug!("Saved application settings"),
                    Ok(Err(e)) => send(&msg_tx, failure("Failed to save settings", e)).await,
                    Err(e) => warn!("Settings save task panicked: {}", e),
                }
            });
        }

        UpdateAction::CheckWalletAuthorization(wallet) => {
            let auth = ctx.auth.clone();
            tokio::spawn(async move {
                let authorized = auth.is_authorized_wallet(&wallet).await.unwrap_or_else(|e| {
                    warn!("Authorization check failed, asking for passcode: {}", e);
                    false
                });
                let msg = if authorized {
                    Message::WalletLoggedIn(wallet)
                } else {
                    Message::WalletNeedsPasscode(wallet)
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::RegisterWallet { wallet, passcode } => {
            let auth = ctx.auth.clone();
            tokio::spawn(async move {
                let msg = match auth.register(&wallet, &passcode).await {
                    Ok(wallet) => Message::WalletLoggedIn(wallet),
                    Err(e) => rejection(wallet, e),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::Authorize { wallet, passcode } => {
            let auth = ctx.auth.clone();
            tokio::spawn(async move {
                let msg = match auth.authorize(&wallet, &passcode).await {
                    Ok(wallet) => Message::PasscodeAccepted(wallet),
                    Err(e) => rejection(wallet, e),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::Logout => {
            let auth = ctx.auth.clone();
            tokio::spawn(async move {
                let msg = match auth.logout().await {
                    Ok(()) => Message::LoggedOut,
                    Err(e) => failure("Logout failed", e),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::ScheduleRelock { generation, delay } => {
            ctx.relock_timer.schedule(generation, delay, msg_tx);
        }

        UpdateAction::CancelRelock => {
            ctx.relock_timer.cancel();
        }

        UpdateAction::RevokeAuthAndReload => {
            let auth = ctx.auth.clone();
            tokio::spawn(async move {
                if let Err(e) = auth.revoke_auth().await {
                    send(&msg_tx, failure("Failed to revoke authorization", e)).await;
                    return;
                }
                let wallet = auth.last_wallet_logged_in().await.unwrap_or_else(|e| {
                    warn!("Failed to reload last wallet after re-lock: {}", e);
                    None
                });
                send(&msg_tx, Message::RelockResolved { wallet }).await;
            });
        }

        UpdateAction::OpenUrl { url, browser } => {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = open_url_in_browser(&url, &browser) {
                    warn!("Failed to open {}: {}", url, e);
                }
            });
        }
    }
}

/// Report a failed action. Store errors that cannot be retried are fatal.
fn failure(context: &str, e: Error) -> Message {
    if e.is_recoverable() {
        warn!("{}: {}", context, e);
    } else {
        error!("{}: {}", context, e);
    }
    Message::ActionFailed {
        message: format!("{}: {}", context, e),
        fatal: e.is_fatal(),
    }
}

fn rejection(wallet: Wallet, error: AuthError) -> Message {
    if !error.is_user_error() {
        warn!(wallet = %wallet, "Authorization store failure: {}", error);
    }
    Message::PasscodeRejected {
        wallet,
        reason: error.to_string(),
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Engine channel closed; dropping result message");
    }
}
