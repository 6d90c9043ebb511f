//! Engine - owns the TEA state, the message channel and the collaborators
//!
//! Runners feed messages in (stdin, lifecycle signals) and subscribe to
//! [`EngineEvent`]s coming out after each processing cycle.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{info, warn};

use wallet_nav_core::{AppPhase, Display};

use crate::actions::ActionContext;
use crate::app_settings::{AppSettings, SettingsStore};
use crate::auth::{AuthorizationUseCase, CredentialStore, LocalAuthorization, PasscodeRepository};
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::router::RouterEvent;
use crate::state::{Alert, AppState};
use crate::storage::KeyValueStore;

/// Key-value store file inside the data directory
pub const DEFAULTS_FILENAME: &str = "defaults.json";

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    phase: AppPhase,
    display: Option<Display>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            phase: state.phase,
            display: state.display.clone(),
        }
    }
}

/// Orchestration engine for the wallet navigation core.
///
/// Encapsulates:
/// - TEA state management
/// - Message channel
/// - Shutdown signaling
/// - Settings
/// - Authorization store, settings store and re-lock timer
/// - Event broadcasting for external consumers
pub struct Engine<A> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (stdin reader, signal handler).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    /// Loaded settings (cached from config)
    pub settings: Settings,

    actions: ActionContext<A>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<LocalAuthorization> {
    /// Create an engine over the local stores in `settings.data_dir()`
    pub fn open(settings: Settings) -> Self {
        let data_dir = settings.data_dir();
        info!("Using data directory {}", data_dir.display());

        let defaults = KeyValueStore::open(data_dir.join(DEFAULTS_FILENAME));
        let auth = LocalAuthorization::new(
            PasscodeRepository::new(CredentialStore::in_dir(&data_dir)),
            defaults.clone(),
        );

        Self::new(settings, auth, SettingsStore::new(defaults))
    }
}

impl<A> Engine<A>
where
    A: AuthorizationUseCase + Sync + 'static,
{
    /// Create a new Engine.
    ///
    /// Loads the application flags (defaults on failure), creates the
    /// message channel (capacity 256), the shutdown signal and the event
    /// broadcaster. Nothing is shown until [`Engine::start`].
    pub fn new(settings: Settings, auth: A, settings_store: SettingsStore) -> Self {
        let app_settings = settings_store.load().unwrap_or_else(|e| {
            warn!("Failed to load application settings, using defaults: {}", e);
            AppSettings::default()
        });

        let state = AppState::with_settings(&settings, app_settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            settings,
            actions: ActionContext::new(Arc::new(auth), settings_store),
            event_tx,
        }
    }

    /// Resolve and show the launch display
    pub fn start(&mut self) {
        self.process_message(Message::Launch);
    }

    /// The authorization store shared with background tasks
    pub fn auth(&self) -> &Arc<A> {
        &self.actions.auth
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents based on state changes detected by comparing
    /// before/after snapshots, then reports presentations and notices.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &mut self.actions);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Initiate shutdown: cancel the re-lock timer and signal background tasks.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        self.actions.relock_timer.cancel();
        let _ = self.shutdown_tx.send(true);
        info!("Engine shut down");
    }

    fn emit_events(&mut self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.display != post.display {
            if let Some(new) = &post.display {
                self.emit(EngineEvent::DisplayChanged {
                    old: pre.display.clone(),
                    new: new.clone(),
                });
            }
        }

        for event in self.state.navigator.drain_router_events() {
            self.emit(match event {
                RouterEvent::Presented {
                    window,
                    screen,
                    animation,
                } => EngineEvent::ScreenPresented {
                    window,
                    screen,
                    animation,
                },
                RouterEvent::Dismissed { window } => EngineEvent::WindowDismissed { window },
            });
        }

        if pre.phase != post.phase {
            self.emit(EngineEvent::PhaseChanged {
                old_phase: pre.phase,
                new_phase: post.phase,
            });
        }

        for alert in self.state.take_alerts() {
            self.emit(match alert {
                Alert::PasscodeRejected { wallet, reason } => {
                    EngineEvent::PasscodeRejected { wallet, reason }
                }
                Alert::Error { message, fatal } => EngineEvent::Error { message, fatal },
            });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
