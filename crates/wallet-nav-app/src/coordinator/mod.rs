//! Coordinator tree - navigation units owning their child flows
//!
//! Organized into submodules:
//! - `tree`: Arena holding coordinators with parent/child links
//! - `flows`: Concrete flows (hello, slide, enter, main tab bar, passcode)
//! - `app`: Root coordinator mapping a [`Display`] onto the tree

pub mod app;
pub mod flows;
pub mod tree;

use std::fmt;

use crate::router::WindowRouter;

pub use app::AppCoordinator;
pub use flows::{
    EnterCoordinator, HelloCoordinator, MainTabBarCoordinator, PasscodeLogInCoordinator,
    SlideCoordinator,
};
pub use tree::{CoordinatorId, CoordinatorTree};

#[cfg(doc)]
use wallet_nav_core::Display;

/// Concrete type of a coordinator. A parent holds at most one child per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinatorKind {
    App,
    Hello,
    Slide,
    Enter,
    MainTabBar,
    PasscodeLogIn,
}

impl fmt::Display for CoordinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinatorKind::App => "app",
            CoordinatorKind::Hello => "hello",
            CoordinatorKind::Slide => "slide",
            CoordinatorKind::Enter => "enter",
            CoordinatorKind::MainTabBar => "main_tab_bar",
            CoordinatorKind::PasscodeLogIn => "passcode_log_in",
        };
        f.write_str(name)
    }
}

/// A navigation unit.
///
/// `start` runs once, right after the coordinator is attached to its parent.
/// `finish` runs when the coordinator is removed from the tree.
pub trait Coordinator: Send + fmt::Debug {
    fn kind(&self) -> CoordinatorKind;

    fn start(&mut self, ctx: &mut CoordinatorContext<'_>);

    fn finish(&mut self, _ctx: &mut CoordinatorContext<'_>) {}
}

/// What a coordinator may touch while starting or finishing
#[derive(Debug)]
pub struct CoordinatorContext<'a> {
    router: &'a mut WindowRouter,
    children: Vec<Box<dyn Coordinator>>,
}

impl<'a> CoordinatorContext<'a> {
    pub(crate) fn new(router: &'a mut WindowRouter) -> Self {
        Self {
            router,
            children: Vec::new(),
        }
    }

    pub fn router(&mut self) -> &mut WindowRouter {
        self.router
    }

    /// Queue a child to be attached and started under the current coordinator
    pub fn spawn_child(&mut self, child: Box<dyn Coordinator>) {
        self.children.push(child);
    }

    pub(crate) fn into_children(self) -> Vec<Box<dyn Coordinator>> {
        self.children
    }
}
