//! Integration tests for the navigation flow through the engine

use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use wallet_nav_app::config::Settings;
use wallet_nav_app::coordinator::CoordinatorKind;
use wallet_nav_app::{Engine, EngineEvent, LocalAuthorization, Message, Screen, WindowKind};
use wallet_nav_core::{Display, Wallet};

fn settings_in(dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.storage.data_dir = Some(dir.to_path_buf());
    settings
}

fn wallet() -> Wallet {
    Wallet::new(
        "3PNaua1fMrQm4TArqeTuakmY1u985CgMRk6",
        "BrjUWjndUanm5VsJkbUip8VRYy6LWJePtxya3FNv4TQa",
    )
}

/// Process the next message produced by a background task
async fn pump(engine: &mut Engine<LocalAuthorization>) {
    let msg = engine
        .msg_rx
        .recv()
        .await
        .expect("engine channel closed");
    engine.process_message(msg);
}

/// Launch an engine and wait for its first display
async fn launch(dir: &TempDir) -> Engine<LocalAuthorization> {
    let mut engine = Engine::open(settings_in(dir.path()));
    engine.start();
    pump(&mut engine).await;
    engine
}

/// Launch, finish onboarding and register `wallet()` with passcode 1234
async fn logged_in(dir: &TempDir) -> Engine<LocalAuthorization> {
    let mut engine = launch(dir).await;
    engine.process_message(Message::OnboardingFinished);
    engine.process_message(Message::RegisterWallet {
        wallet: wallet(),
        passcode: "1234".to_string(),
    });
    pump(&mut engine).await;
    assert_eq!(engine.state.display, Some(Display::Slide(wallet())));
    engine
}

fn collect(events: &mut tokio::sync::broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test]
async fn test_first_launch_onboarding_then_register() {
    let dir = TempDir::new().unwrap();
    let mut engine = launch(&dir).await;
    assert_eq!(engine.state.display, Some(Display::Hello));

    engine.process_message(Message::OnboardingFinished);
    assert_eq!(engine.state.display, Some(Display::Enter));
    assert_eq!(
        engine.state.navigator.router().root(WindowKind::Main),
        Some(&Screen::Enter)
    );

    let mut events = engine.subscribe();
    engine.process_message(Message::RegisterWallet {
        wallet: wallet(),
        passcode: "1234".to_string(),
    });
    pump(&mut engine).await;

    assert_eq!(engine.state.display, Some(Display::Slide(wallet())));
    assert_eq!(
        engine.state.navigator.router().root(WindowKind::Main),
        Some(&Screen::MainTabBar(wallet()))
    );
    assert!(collect(&mut events).iter().any(|e| matches!(
        e,
        EngineEvent::ScreenPresented {
            window: WindowKind::Main,
            animation: Some(_),
            ..
        }
    )));
}

#[tokio::test]
async fn test_register_with_empty_passcode_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut engine = launch(&dir).await;
    engine.process_message(Message::OnboardingFinished);
    let mut events = engine.subscribe();

    engine.process_message(Message::RegisterWallet {
        wallet: wallet(),
        passcode: String::new(),
    });
    pump(&mut engine).await;

    assert_eq!(engine.state.display, Some(Display::Enter));
    assert!(collect(&mut events)
        .iter()
        .any(|e| matches!(e, EngineEvent::PasscodeRejected { .. })));
}

#[tokio::test]
async fn test_restart_asks_for_passcode() {
    let dir = TempDir::new().unwrap();
    drop(logged_in(&dir).await);

    let mut engine = launch(&dir).await;
    assert_eq!(engine.state.display, Some(Display::Passcode(wallet())));
    assert_eq!(
        engine.state.navigator.router().root(WindowKind::Alert),
        Some(&Screen::Passcode(wallet()))
    );

    engine.process_message(Message::SubmitPasscode("1234".to_string()));
    pump(&mut engine).await;

    assert_eq!(engine.state.display, Some(Display::Slide(wallet())));
    assert_eq!(engine.state.navigator.router().root(WindowKind::Alert), None);
}

#[tokio::test]
async fn test_logout_returns_to_enter_across_restarts() {
    let dir = TempDir::new().unwrap();
    let mut engine = logged_in(&dir).await;

    engine.process_message(Message::Logout);
    pump(&mut engine).await;
    assert_eq!(engine.state.display, Some(Display::Enter));
    // Let the onboarding flag save land before the next launch reads it
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(engine);

    let engine = launch(&dir).await;
    assert_eq!(engine.state.display, Some(Display::Enter));
}

#[tokio::test(start_paused = true)]
async fn test_background_past_delay_relocks() {
    let dir = TempDir::new().unwrap();
    let mut engine = logged_in(&dir).await;

    engine.process_message(Message::DidEnterBackground);
    tokio::time::sleep(Duration::from_secs(11)).await;

    // Timer firing, then revoke + reload
    pump(&mut engine).await;
    pump(&mut engine).await;

    assert_eq!(engine.state.display, Some(Display::Passcode(wallet())));
    let tree = engine.state.navigator.tree();
    assert!(tree.has_child(tree.root(), CoordinatorKind::PasscodeLogIn));
    assert_eq!(
        engine.state.navigator.router().root(WindowKind::Alert),
        Some(&Screen::Passcode(wallet()))
    );

    engine.process_message(Message::DidBecomeActive);
    engine.process_message(Message::SubmitPasscode("1234".to_string()));
    pump(&mut engine).await;
    assert_eq!(engine.state.display, Some(Display::Slide(wallet())));
}

#[tokio::test(start_paused = true)]
async fn test_foreground_before_delay_keeps_display() {
    let dir = TempDir::new().unwrap();
    let mut engine = logged_in(&dir).await;

    engine.process_message(Message::DidEnterBackground);
    tokio::time::sleep(Duration::from_secs(5)).await;
    engine.process_message(Message::DidBecomeActive);
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(engine.drain_pending_messages(), 0);
    assert_eq!(engine.state.display, Some(Display::Slide(wallet())));
}
