//! Root coordinator
//!
//! Owns the coordinator tree and the window router, and maps each
//! [`Display`] onto the set of children that should be alive.

use wallet_nav_core::prelude::*;
use wallet_nav_core::{Display, Wallet};

use super::flows::{HelloCoordinator, PasscodeLogInCoordinator, SlideCoordinator};
use super::tree::{CoordinatorId, CoordinatorTree};
use super::{Coordinator, CoordinatorContext, CoordinatorKind};
use crate::router::{RouterEvent, WindowRouter};

/// Tree root. Children are added by [`AppCoordinator::show_display`].
#[derive(Debug)]
struct AppRoot;

impl Coordinator for AppRoot {
    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::App
    }

    fn start(&mut self, _ctx: &mut CoordinatorContext<'_>) {}
}

#[derive(Debug)]
pub struct AppCoordinator {
    tree: CoordinatorTree,
    router: WindowRouter,
}

impl AppCoordinator {
    pub fn new(router: WindowRouter) -> Self {
        Self {
            tree: CoordinatorTree::new(Box::new(AppRoot)),
            router,
        }
    }

    /// App coordinator over in-memory windows
    pub fn headless() -> Self {
        Self::new(WindowRouter::headless())
    }

    pub fn tree(&self) -> &CoordinatorTree {
        &self.tree
    }

    pub fn router(&self) -> &WindowRouter {
        &self.router
    }

    /// Take the presentations made since the last call
    pub fn drain_router_events(&mut self) -> Vec<RouterEvent> {
        self.router.drain_events()
    }

    fn child(&self, kind: CoordinatorKind) -> Option<CoordinatorId> {
        self.tree.child_of_kind(self.tree.root(), kind)
    }

    fn add(&mut self, child: Box<dyn Coordinator>) -> Option<CoordinatorId> {
        let root = self.tree.root();
        self.tree.add_child_and_start(root, child, &mut self.router)
    }

    fn remove(&mut self, kind: CoordinatorKind) {
        let root = self.tree.root();
        if let Some(id) = self.child(kind) {
            self.tree.remove_child(root, id, &mut self.router);
        }
    }

    /// Whether the slide child currently hosts a child of `kind`
    fn slide_hosts(&self, kind: CoordinatorKind) -> bool {
        self.child(CoordinatorKind::Slide)
            .is_some_and(|slide| self.tree.has_child(slide, kind))
    }

    /// Bring the tree in line with `next`
    pub fn show_display(&mut self, next: &Display) {
        debug!(next = %next, "Showing display");

        match next {
            Display::Hello => {
                self.add(Box::new(HelloCoordinator));
            }

            Display::Passcode(wallet) => {
                if self.tree.has_child(self.tree.root(), CoordinatorKind::PasscodeLogIn) {
                    return;
                }
                self.add(Box::new(PasscodeLogInCoordinator::new(wallet.clone())));
            }

            Display::Slide(wallet) => self.show_slide(Some(wallet)),

            Display::Enter => {
                self.remove(CoordinatorKind::Hello);
                self.remove(CoordinatorKind::PasscodeLogIn);

                if self.slide_hosts(CoordinatorKind::Enter) {
                    return;
                }
                self.show_slide(None);
            }
        }
    }

    fn show_slide(&mut self, wallet: Option<&Wallet>) {
        if wallet.is_some() {
            // The passcode flow has finished once a wallet slide is requested
            self.remove(CoordinatorKind::PasscodeLogIn);
            self.remove(CoordinatorKind::Hello);

            if self.slide_hosts(CoordinatorKind::MainTabBar) {
                return;
            }
        }

        self.remove(CoordinatorKind::Slide);
        self.add(Box::new(SlideCoordinator::new(wallet.cloned())));
    }
}
