//! Message types for the application (TEA pattern)

use wallet_nav_core::{Display, Wallet};

use crate::menu::MenuLink;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Launch
    // ─────────────────────────────────────────────────────────
    /// Resolve the launch display from the last logged-in wallet
    Launch,

    /// Launch display computed by a background task
    DisplayResolved(Display),

    // ─────────────────────────────────────────────────────────
    // Flow Callbacks
    // ─────────────────────────────────────────────────────────
    /// Hello flow completed
    OnboardingFinished,

    /// Enter flow picked an existing wallet
    SelectWallet(Wallet),

    /// Enter flow created or imported a wallet protected by `passcode`
    RegisterWallet { wallet: Wallet, passcode: String },

    /// Selected wallet already has an unlocked session
    WalletLoggedIn(Wallet),

    /// Selected wallet must be unlocked with its passcode
    WalletNeedsPasscode(Wallet),

    /// Passcode typed into the passcode screen
    SubmitPasscode(String),

    /// Passcode verified for `wallet`
    PasscodeAccepted(Wallet),

    /// Passcode or registration refused
    PasscodeRejected { wallet: Wallet, reason: String },

    /// User asked to log out
    Logout,

    /// Session and last wallet cleared
    LoggedOut,

    // ─────────────────────────────────────────────────────────
    // Application Lifecycle
    // ─────────────────────────────────────────────────────────
    DidEnterBackground,

    DidBecomeActive,

    /// Re-lock delay elapsed for the given background generation
    RelockTimerFired { generation: u64 },

    /// Authorization revoked after the re-lock delay; carries the reloaded
    /// last wallet
    RelockResolved { wallet: Option<Wallet> },

    // ─────────────────────────────────────────────────────────
    // Menu
    // ─────────────────────────────────────────────────────────
    OpenMenuLink(MenuLink),

    // ─────────────────────────────────────────────────────────
    // Misc
    // ─────────────────────────────────────────────────────────
    /// A background action failed; `fatal` mirrors the store error's class
    ActionFailed { message: String, fatal: bool },

    Quit,
}
