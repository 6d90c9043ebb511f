//! Message processing
//!
//! Runs a message through the TEA update function, following up messages
//! until none remain and dispatching every action produced on the way.

use tokio::sync::mpsc;

use crate::actions::{handle_action, ActionContext};
use crate::auth::AuthorizationUseCase;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<A>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    ctx: &mut ActionContext<A>,
) where
    A: AuthorizationUseCase + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), ctx);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
