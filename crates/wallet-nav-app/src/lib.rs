//! wallet-nav-app - Application state and navigation for the wallet client
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! top-level display, the coordinator tree and window router that present it,
//! background re-lock, local passcode authorization, configuration loading,
//! and the feedback-loop reducers behind the DEX screens.

pub mod actions;
pub mod app_settings;
pub mod auth;
pub mod config;
pub mod coordinator;
pub mod dex;
pub mod display;
pub mod engine;
pub mod engine_event;
pub mod feedback;
pub mod handler;
pub mod menu;
pub mod message;
pub mod process;
pub mod relock;
pub mod router;
pub mod signals;
pub mod state;
pub mod storage;

// Re-export primary types
pub use app_settings::{AppSettings, SettingsStore};
pub use auth::{AuthError, AuthorizationUseCase, LocalAuthorization};
pub use coordinator::{AppCoordinator, CoordinatorKind};
pub use display::Transition;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use menu::MenuLink;
pub use message::Message;
pub use router::{Screen, WindowKind, WindowRouter};
pub use state::AppState;
