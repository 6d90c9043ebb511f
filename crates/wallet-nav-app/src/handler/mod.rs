//! Handler module - TEA update function
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch

pub(crate) mod update;


use std::time::Duration;

use url::Url;
use wallet_nav_core::Wallet;

use crate::app_settings::AppSettings;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Load the last wallet and compute the launch display
    ResolveLaunchDisplay { has_shown_onboarding: bool },

    /// Persist the application flags
    SaveAppSettings(AppSettings),

    /// Ask the authorization store whether a selected wallet is unlocked
    CheckWalletAuthorization(Wallet),

    /// Create credentials for a wallet from the enter flow
    RegisterWallet { wallet: Wallet, passcode: String },

    /// Verify a passcode for the wallet on the passcode screen
    Authorize { wallet: Wallet, passcode: String },

    /// Clear the session and forget the last wallet
    Logout,

    /// Start the background re-lock timer
    ScheduleRelock { generation: u64, delay: Duration },

    /// Abort the pending re-lock timer
    CancelRelock,

    /// Revoke authorization and reload the last wallet
    RevokeAuthAndReload,

    /// Open an external page in the browser
    OpenUrl { url: Url, browser: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
