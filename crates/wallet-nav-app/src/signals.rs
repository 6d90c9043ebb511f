//! OS signals mapped onto engine messages
//!
//! SIGINT/SIGTERM (Ctrl+C on Windows) quit. On unix, SIGUSR1 and SIGUSR2
//! stand in for the platform's background and foreground notifications.

use tokio::sync::{mpsc, watch};
use wallet_nav_core::prelude::*;

use crate::message::Message;

/// Spawn a task that turns OS signals into messages until shutdown
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>, shutdown_rx: watch::Receiver<bool>) {
    tokio::spawn(async move {
        if let Err(e) = forward_signals(tx, shutdown_rx).await {
            error!("Signal handler error: {}", e);
        }
    });
}

/// Forward signals until quit, shutdown, or the engine goes away
async fn forward_signals(
    tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigusr1 = signal(SignalKind::user_defined1())?;
        let mut sigusr2 = signal(SignalKind::user_defined2())?;

        loop {
            let msg = tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT");
                    Message::Quit
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM");
                    Message::Quit
                }
                _ = sigusr1.recv() => {
                    debug!("Received SIGUSR1, entering background");
                    Message::DidEnterBackground
                }
                _ = sigusr2.recv() => {
                    debug!("Received SIGUSR2, becoming active");
                    Message::DidBecomeActive
                }
                _ = shutdown_rx.changed() => return Ok(()),
            };

            let quit = matches!(msg, Message::Quit);
            tx.send(msg)
                .await
                .map_err(|_| Error::channel_send("signal message"))?;
            if quit {
                return Ok(());
            }
        }
    }

    #[cfg(windows)]
    {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Received Ctrl+C");
                tx.send(Message::Quit)
                    .await
                    .map_err(|_| Error::channel_send("signal message"))?;
            }
            _ = shutdown_rx.changed() => {}
        }
        Ok(())
    }
}
