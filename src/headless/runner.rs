//! Headless mode runner - main event loop without a UI
//!
//! Reads line commands from stdin, feeds them to the engine and writes the
//! resulting engine events to stdout as NDJSON.

use std::io::BufRead;

use tokio::sync::{broadcast, mpsc};

use wallet_nav_app::config::Settings;
use wallet_nav_app::signals::spawn_signal_handler;
use wallet_nav_app::{Engine, EngineEvent, LocalAuthorization, Message, MenuLink};
use wallet_nav_core::prelude::*;
use wallet_nav_core::Wallet;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of a UI
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("wallet-nav starting in HEADLESS mode");
    info!("Re-lock delay: {:?}", settings.relock_delay());
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::open(settings);
    let mut events = engine.subscribe();

    // Spawn headless-specific stdin reader
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });
    spawn_signal_handler(engine.msg_sender(), engine.shutdown_receiver());

    engine.start();

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown().await;

    info!("wallet-nav headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine<LocalAuthorization>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        emit_pending_events(events);

        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => engine.process_message(msg),
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    emit_pending_events(events);
    Ok(())
}

/// Write every queued engine event to stdout
fn emit_pending_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(event) = HeadlessEvent::from_engine(&event) {
                    event.emit();
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Parse one stdin line. Blank lines yield `Ok(None)`.
///
/// ```text
/// onboarding-done
/// register <address> <public-key> <passcode>
/// select <address> <public-key>
/// passcode <pin>
/// logout | background | foreground
/// menu <link>
/// q | quit
/// ```
pub fn parse_command(line: &str) -> std::result::Result<Option<Message>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let msg = match (command, args.as_slice()) {
        ("onboarding-done", []) => Message::OnboardingFinished,
        ("register", [address, public_key, passcode]) => Message::RegisterWallet {
            wallet: Wallet::new(*address, *public_key),
            passcode: passcode.to_string(),
        },
        ("select", [address, public_key]) => {
            Message::SelectWallet(Wallet::new(*address, *public_key))
        }
        ("passcode", [pin]) => Message::SubmitPasscode(pin.to_string()),
        ("logout", []) => Message::Logout,
        ("background", []) => Message::DidEnterBackground,
        ("foreground", []) => Message::DidBecomeActive,
        ("menu", [link]) => {
            Message::OpenMenuLink(link.parse::<MenuLink>().map_err(|e| e.to_string())?)
        }
        ("q" | "quit", []) => Message::Quit,
        _ => return Err(format!("Unknown stdin command: {}", line.trim())),
    };
    Ok(Some(msg))
}

/// Spawn stdin reader task that sends commands to message channel (blocking version)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    let stdin = std::io::stdin();
    forward_commands(stdin.lock(), &msg_tx);
    info!("Stdin reader exiting");
}

/// Forward parsed commands until `quit`. End of input also sends `Quit`.
fn forward_commands(reader: impl BufRead, msg_tx: &mpsc::Sender<Message>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(msg)) => {
                let quit = matches!(msg, Message::Quit);
                if msg_tx.blocking_send(msg).is_err() || quit {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("{}", e);
                HeadlessEvent::error(e, false).emit();
            }
        }
    }

    debug!("Stdin closed, requesting quit");
    if msg_tx.blocking_send(Message::Quit).is_err() {
        debug!("Engine already gone");
    }
}
