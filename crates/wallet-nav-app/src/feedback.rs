//! Reducer systems driven by feedback loops
//!
//! A [`System`] owns one task that pops events off an unbounded queue and
//! folds them into the state one at a time. After every reduction each
//! [`Feedback`] observes the new state and may start asynchronous effects
//! whose events are pushed back onto the same queue.
//!
//! Dropping the system aborts the reducer task, which drops the feedbacks
//! and aborts their in-flight effects.

use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use wallet_nav_core::prelude::*;

/// A stream of events produced by one effect
pub type Effects<E> = BoxStream<'static, E>;

/// An effect source that watches state and feeds events back into the system
pub trait Feedback<S, E>: Send {
    /// Called with the initial state and after every reduction
    fn observe(&mut self, state: &S, events: &mpsc::UnboundedSender<E>);
}

/// Feedback that runs `effects(request)` whenever `request(state)` yields a
/// new value.
///
/// A changed request aborts the previous effect before starting the next.
/// A `None` request aborts the running effect and starts nothing.
pub fn react<S, R, E, Q, F>(request: Q, effects: F) -> Box<dyn Feedback<S, E>>
where
    S: 'static,
    R: PartialEq + Clone + Send + 'static,
    E: Send + 'static,
    Q: Fn(&S) -> Option<R> + Send + 'static,
    F: FnMut(R) -> Effects<E> + Send + 'static,
{
    Box::new(React {
        request,
        effects,
        current: None,
    })
}

struct React<R, Q, F> {
    request: Q,
    effects: F,
    current: Option<(R, JoinHandle<()>)>,
}

impl<R, Q, F> React<R, Q, F> {
    fn cancel(&mut self) {
        if let Some((_, handle)) = self.current.take() {
            handle.abort();
        }
    }
}

impl<S, R, E, Q, F> Feedback<S, E> for React<R, Q, F>
where
    R: PartialEq + Clone + Send + 'static,
    E: Send + 'static,
    Q: Fn(&S) -> Option<R> + Send,
    F: FnMut(R) -> Effects<E> + Send,
{
    fn observe(&mut self, state: &S, events: &mpsc::UnboundedSender<E>) {
        let request = (self.request)(state);
        if self.current.as_ref().map(|(current, _)| current) == request.as_ref() {
            return;
        }

        self.cancel();
        let Some(request) = request else {
            return;
        };

        let mut stream = (self.effects)(request.clone());
        let events = events.clone();
        let handle = tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                if events.send(event).is_err() {
                    break;
                }
            }
        });
        self.current = Some((request, handle));
    }
}

impl<R, Q, F> Drop for React<R, Q, F> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A running reducer with its feedback loops
#[derive(Debug)]
pub struct System<S, E> {
    events: mpsc::UnboundedSender<E>,
    state: watch::Receiver<S>,
    task: JoinHandle<()>,
}

impl<S, E> System<S, E>
where
    S: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    /// Spawn the reducer task. Feedbacks observe `initial` before the first
    /// event is reduced.
    pub fn spawn<R>(initial: S, mut reduce: R, mut feedbacks: Vec<Box<dyn Feedback<S, E>>>) -> Self
    where
        R: FnMut(S, E) -> S + Send + 'static,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let feedback_tx = event_tx.clone();

        let task = tokio::spawn(async move {
            let mut state = initial;
            for feedback in feedbacks.iter_mut() {
                feedback.observe(&state, &feedback_tx);
            }

            while let Some(event) = event_rx.recv().await {
                state = reduce(state, event);
                state_tx.send_replace(state.clone());
                for feedback in feedbacks.iter_mut() {
                    feedback.observe(&state, &feedback_tx);
                }
            }
        });

        Self {
            events: event_tx,
            state: state_rx,
            task,
        }
    }

    /// Queue an event for reduction. Fails once the reducer task is gone.
    pub fn send(&self, event: E) -> Result<()> {
        self.events.send(event).map_err(|_| Error::ChannelClosed)
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<E> {
        self.events.clone()
    }

    /// Latest reduced state
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }
}

impl<S, E> Drop for System<S, E> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
