//! Concrete flows started by the app coordinator

use wallet_nav_core::Wallet;

use super::{Coordinator, CoordinatorContext, CoordinatorKind};
use crate::router::{AnimateKind, Screen, WindowKind};

/// First-launch onboarding
#[derive(Debug, Default)]
pub struct HelloCoordinator;

impl Coordinator for HelloCoordinator {
    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::Hello
    }

    fn start(&mut self, ctx: &mut CoordinatorContext<'_>) {
        ctx.router()
            .set_root_screen(WindowKind::Main, Screen::Hello, None);
    }
}

/// Side-menu container. Hosts the main tab bar for a wallet, or the enter
/// flow when no wallet is logged in.
#[derive(Debug)]
pub struct SlideCoordinator {
    wallet: Option<Wallet>,
}

impl SlideCoordinator {
    pub fn new(wallet: Option<Wallet>) -> Self {
        Self { wallet }
    }

    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }
}

impl Coordinator for SlideCoordinator {
    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::Slide
    }

    fn start(&mut self, ctx: &mut CoordinatorContext<'_>) {
        match &self.wallet {
            Some(wallet) => ctx.spawn_child(Box::new(MainTabBarCoordinator::new(wallet.clone()))),
            None => ctx.spawn_child(Box::new(EnterCoordinator)),
        }
    }
}

/// Wallet picker: import, create or choose an account
#[derive(Debug, Default)]
pub struct EnterCoordinator;

impl Coordinator for EnterCoordinator {
    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::Enter
    }

    fn start(&mut self, ctx: &mut CoordinatorContext<'_>) {
        ctx.router().set_root_screen(
            WindowKind::Main,
            Screen::Enter,
            Some(AnimateKind::CrossDissolve),
        );
    }
}

#[derive(Debug)]
pub struct MainTabBarCoordinator {
    wallet: Wallet,
}

impl MainTabBarCoordinator {
    pub fn new(wallet: Wallet) -> Self {
        Self { wallet }
    }
}

impl Coordinator for MainTabBarCoordinator {
    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::MainTabBar
    }

    fn start(&mut self, ctx: &mut CoordinatorContext<'_>) {
        ctx.router().set_root_screen(
            WindowKind::Main,
            Screen::MainTabBar(self.wallet.clone()),
            Some(AnimateKind::CrossDissolve),
        );
    }
}

/// Passcode prompt shown in the alert window above whatever the main
/// window holds
#[derive(Debug)]
pub struct PasscodeLogInCoordinator {
    wallet: Wallet,
}

impl PasscodeLogInCoordinator {
    pub fn new(wallet: Wallet) -> Self {
        Self { wallet }
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }
}

impl Coordinator for PasscodeLogInCoordinator {
    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::PasscodeLogIn
    }

    fn start(&mut self, ctx: &mut CoordinatorContext<'_>) {
        ctx.router().set_root_screen(
            WindowKind::Alert,
            Screen::Passcode(self.wallet.clone()),
            None,
        );
    }

    fn finish(&mut self, ctx: &mut CoordinatorContext<'_>) {
        ctx.router().dismiss_window(WindowKind::Alert);
    }
}
