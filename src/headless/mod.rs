//! Headless mode - NDJSON event output for scripted runs
//!
//! Navigation changes are written to stdout as structured JSON events so a
//! driver script can follow the app without a UI. Commands come in on stdin,
//! one per line (see [`runner::parse_command`]).
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"display_changed","display":"hello","wallet":null,"previous":null,"timestamp":1704700001000}
//! {"event":"screen_presented","window":"main","screen":"hello","wallet":null,"animated":false,"timestamp":1704700001000}
//! {"event":"passcode_rejected","wallet":"3PAddr","reason":"Passcode is incorrect","timestamp":1704700003000}
//! ```

pub mod runner;

pub use runner::run_headless;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use wallet_nav_app::router::AnimateKind;
use wallet_nav_app::{EngineEvent, Screen, WindowKind};
use wallet_nav_core::{AppPhase, Display};

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The top-level display changed
    DisplayChanged {
        display: String,
        wallet: Option<String>,
        previous: Option<String>,
        timestamp: i64,
    },

    /// A window got a new root screen
    ScreenPresented {
        window: WindowKind,
        screen: String,
        wallet: Option<String>,
        animated: bool,
        timestamp: i64,
    },

    /// A window was dismissed
    WindowDismissed { window: WindowKind, timestamp: i64 },

    /// Foreground/background phase changed
    PhaseChanged { phase: String, timestamp: i64 },

    /// A passcode or registration was refused
    PasscodeRejected {
        wallet: String,
        reason: String,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        // Serialize to JSON
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Headless rendering of an engine event. Engine lifecycle events have none.
    pub fn from_engine(event: &EngineEvent) -> Option<Self> {
        match event {
            EngineEvent::DisplayChanged { old, new } => Some(Self::display_changed(old.as_ref(), new)),
            EngineEvent::ScreenPresented {
                window,
                screen,
                animation,
            } => Some(Self::screen_presented(*window, screen, *animation)),
            EngineEvent::WindowDismissed { window } => Some(Self::WindowDismissed {
                window: *window,
                timestamp: Self::now(),
            }),
            EngineEvent::PhaseChanged { new_phase, .. } => Some(Self::phase_changed(*new_phase)),
            EngineEvent::PasscodeRejected { wallet, reason } => Some(Self::PasscodeRejected {
                wallet: wallet.address.clone(),
                reason: reason.clone(),
                timestamp: Self::now(),
            }),
            EngineEvent::Error { message, fatal } => Some(Self::error(message.clone(), *fatal)),
            EngineEvent::Shutdown => None,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn display_changed(previous: Option<&Display>, display: &Display) -> Self {
        Self::DisplayChanged {
            display: display.name().to_string(),
            wallet: display.wallet().map(|w| w.address.clone()),
            previous: previous.map(|d| d.name().to_string()),
            timestamp: Self::now(),
        }
    }

    pub fn screen_presented(
        window: WindowKind,
        screen: &Screen,
        animation: Option<AnimateKind>,
    ) -> Self {
        let wallet = match screen {
            Screen::Passcode(wallet) | Screen::MainTabBar(wallet) => Some(wallet.address.clone()),
            Screen::Hello | Screen::Enter => None,
        };
        Self::ScreenPresented {
            window,
            screen: screen.name().to_string(),
            wallet,
            animated: animation.is_some(),
            timestamp: Self::now(),
        }
    }

    pub fn phase_changed(phase: AppPhase) -> Self {
        let phase = match phase {
            AppPhase::Initializing => "initializing",
            AppPhase::Active => "active",
            AppPhase::Background => "background",
            AppPhase::Quitting => "quitting",
        };
        Self::PhaseChanged {
            phase: phase.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}
