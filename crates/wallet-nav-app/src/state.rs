//! Application state (Model in TEA pattern)

use wallet_nav_core::prelude::*;
use wallet_nav_core::{AppPhase, Display, Wallet};

use crate::app_settings::AppSettings;
use crate::config::Settings;
use crate::coordinator::AppCoordinator;
use crate::display::Transition;
use crate::relock::RelockState;

/// User-facing notice produced while handling a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    PasscodeRejected { wallet: Wallet, reason: String },
    Error { message: String, fatal: bool },
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    /// Current top-level display; `None` until the launch display resolves
    pub display: Option<Display>,

    /// Persisted flags, loaded at engine start
    pub app_settings: AppSettings,

    pub relock: RelockState,

    /// Browser command for menu links (empty = system default)
    pub browser: String,

    /// Coordinator tree and windows
    pub navigator: AppCoordinator,

    /// Notices not yet reported by the engine
    alerts: Vec<Alert>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default(), AppSettings::default())
    }

    pub fn with_settings(settings: &Settings, app_settings: AppSettings) -> Self {
        Self {
            phase: AppPhase::Initializing,
            display: None,
            app_settings,
            relock: RelockState::new(settings.relock_delay()),
            browser: settings.behavior.browser.clone(),
            navigator: AppCoordinator::headless(),
            alerts: Vec::new(),
        }
    }

    /// Make `display` current and bring the coordinator tree in line
    pub fn show_display(&mut self, display: Display) {
        self.navigator.show_display(&display);
        self.display = Some(display);
    }

    /// Apply a transition to the current display.
    ///
    /// Returns false (leaving everything untouched) if the transition does
    /// not apply.
    pub fn apply_transition(&mut self, transition: &Transition) -> bool {
        let Some(current) = &self.display else {
            debug!(?transition, "Ignoring transition before launch display");
            return false;
        };

        match transition.apply(current) {
            Some(next) => {
                info!(from = %current, to = %next, "Display transition");
                self.show_display(next);
                true
            }
            None => {
                debug!(display = %current, ?transition, "Transition does not apply");
                false
            }
        }
    }

    /// Wallet shown by the passcode display, if that is current
    pub fn passcode_wallet(&self) -> Option<&Wallet> {
        match &self.display {
            Some(Display::Passcode(wallet)) => Some(wallet),
            _ => None,
        }
    }

    pub fn push_alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}
