//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`.

use wallet_nav_core::{AppPhase, Display, Wallet};

use crate::router::{AnimateKind, Screen, WindowKind};

/// Domain events emitted by the Engine for external consumers.
///
/// Events are broadcast after each message processing cycle, so subscribers
/// see a consistent view of state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// The top-level display changed
    DisplayChanged {
        old: Option<Display>,
        new: Display,
    },

    /// A root screen was installed in a window
    ScreenPresented {
        window: WindowKind,
        screen: Screen,
        animation: Option<AnimateKind>,
    },

    /// A window was dismissed
    WindowDismissed { window: WindowKind },

    // ─────────────────────────────────────────────────────────
    // App Phase Changes
    // ─────────────────────────────────────────────────────────
    PhaseChanged {
        old_phase: AppPhase,
        new_phase: AppPhase,
    },

    // ─────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────
    /// A passcode or registration was refused
    PasscodeRejected { wallet: Wallet, reason: String },

    /// A background action failed
    Error { message: String, fatal: bool },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DisplayChanged { .. } => "display_changed",
            Self::ScreenPresented { .. } => "screen_presented",
            Self::WindowDismissed { .. } => "window_dismissed",
            Self::PhaseChanged { .. } => "phase_changed",
            Self::PasscodeRejected { .. } => "passcode_rejected",
            Self::Error { .. } => "error",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        assert_eq!(
            EngineEvent::DisplayChanged {
                old: None,
                new: Display::Hello
            }
            .event_type(),
            "display_changed"
        );
        assert_eq!(
            EngineEvent::WindowDismissed {
                window: WindowKind::Alert
            }
            .event_type(),
            "window_dismissed"
        );
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
    }
}
