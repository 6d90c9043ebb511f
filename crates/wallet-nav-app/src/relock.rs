//! Background re-lock policy
//!
//! Entering background schedules a delayed [`Message::RelockTimerFired`].
//! Returning to foreground aborts the pending timer. Each schedule carries a
//! generation number so a firing that raced a cancel is recognised as stale
//! by the update handler.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use wallet_nav_core::prelude::*;

use crate::message::Message;

/// Foreground/background bookkeeping kept in `AppState`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelockState {
    /// Whether the app is in the foreground
    pub is_active: bool,
    /// Generation of the most recently scheduled timer
    pub generation: u64,
    pub delay: Duration,
}

impl RelockState {
    pub fn new(delay: Duration) -> Self {
        Self {
            is_active: false,
            generation: 0,
            delay,
        }
    }

    /// Move to background. Returns the generation to schedule, or `None`
    /// if the app was already in background.
    pub fn enter_background(&mut self) -> Option<u64> {
        if !self.is_active {
            return None;
        }
        self.is_active = false;
        self.generation += 1;
        Some(self.generation)
    }

    /// Move to foreground. Returns false if the app was already active.
    pub fn become_active(&mut self) -> bool {
        if self.is_active {
            return false;
        }
        self.is_active = true;
        true
    }

    /// Whether a firing for `generation` should re-lock now
    pub fn should_relock(&self, generation: u64) -> bool {
        !self.is_active && generation == self.generation
    }
}

/// The single pending re-lock timer
#[derive(Debug, Default)]
pub struct RelockTimer {
    pending: Option<(u64, JoinHandle<()>)>,
}

impl RelockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer for `generation`, replacing any pending one
    pub fn schedule(&mut self, generation: u64, delay: Duration, msg_tx: mpsc::Sender<Message>) {
        self.cancel();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if msg_tx
                .send(Message::RelockTimerFired { generation })
                .await
                .is_err()
            {
                debug!("Re-lock timer fired after engine shut down");
            }
        });

        debug!(generation, ?delay, "Scheduled re-lock timer");
        self.pending = Some((generation, handle));
    }

    /// Abort the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some((generation, handle)) = self.pending.take() {
            handle.abort();
            debug!(generation, "Cancelled re-lock timer");
        }
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(generation, _)| *generation)
    }
}

impl Drop for RelockTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
