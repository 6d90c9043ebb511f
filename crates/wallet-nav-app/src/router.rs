//! Window router - presents root screens into the main and alert windows
//!
//! Rendering is external. A [`Window`] only tracks what it shows; every
//! presentation is also recorded as a [`RouterEvent`] so the engine can report
//! it after a message has been processed.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use wallet_nav_core::prelude::*;
use wallet_nav_core::Wallet;

/// Duration of the cross-dissolve between two root screens
pub const ANIMATION_DURATION: Duration = Duration::from_millis(240);

/// A root screen a window can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "wallet", rename_all = "snake_case")]
pub enum Screen {
    Hello,
    Enter,
    Passcode(Wallet),
    MainTabBar(Wallet),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Hello => "hello",
            Screen::Enter => "enter",
            Screen::Passcode(_) => "passcode",
            Screen::MainTabBar(_) => "main_tab_bar",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimateKind {
    CrossDissolve,
}

/// Which window a screen goes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// The application window
    Main,
    /// Window layered above the main one (passcode prompt)
    Alert,
}

/// A platform window. Only the root screen is modelled.
pub trait Window: Send + fmt::Debug {
    fn root(&self) -> Option<&Screen>;

    /// Replace the root screen. `animation` is set when the change cross-dissolves.
    fn set_root(&mut self, screen: Screen, animation: Option<(AnimateKind, Duration)>);

    fn make_key_and_visible(&mut self);

    fn is_visible(&self) -> bool;

    /// Slide the window away. The root screen is released.
    fn dismiss(&mut self);
}

/// In-memory [`Window`] used by the headless runner and tests
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    root: Option<Screen>,
    visible: bool,
}

impl Window for HeadlessWindow {
    fn root(&self) -> Option<&Screen> {
        self.root.as_ref()
    }

    fn set_root(&mut self, screen: Screen, animation: Option<(AnimateKind, Duration)>) {
        if let Some((kind, duration)) = animation {
            trace!(?kind, ?duration, screen = %screen, "Transitioning root screen");
        }
        self.root = Some(screen);
    }

    fn make_key_and_visible(&mut self) {
        self.visible = true;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn dismiss(&mut self) {
        self.visible = false;
        self.root = None;
    }
}

/// A change made through the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    Presented {
        window: WindowKind,
        screen: Screen,
        animation: Option<AnimateKind>,
    },
    Dismissed {
        window: WindowKind,
    },
}

/// Owns the main and alert windows
#[derive(Debug)]
pub struct WindowRouter {
    main: Box<dyn Window>,
    alert: Box<dyn Window>,
    events: Vec<RouterEvent>,
}

impl WindowRouter {
    pub fn new(main: Box<dyn Window>, alert: Box<dyn Window>) -> Self {
        Self {
            main,
            alert,
            events: Vec::new(),
        }
    }

    pub fn headless() -> Self {
        Self::new(
            Box::new(HeadlessWindow::default()),
            Box::new(HeadlessWindow::default()),
        )
    }

    pub fn window(&self, kind: WindowKind) -> &dyn Window {
        match kind {
            WindowKind::Main => self.main.as_ref(),
            WindowKind::Alert => self.alert.as_ref(),
        }
    }

    fn window_mut(&mut self, kind: WindowKind) -> &mut dyn Window {
        match kind {
            WindowKind::Main => self.main.as_mut(),
            WindowKind::Alert => self.alert.as_mut(),
        }
    }

    /// Root screen currently shown by `kind`
    pub fn root(&self, kind: WindowKind) -> Option<&Screen> {
        self.window(kind).root()
    }

    /// Make `screen` the root of `kind` and show the window.
    ///
    /// Cross-dissolve is only applied when the window already has a root;
    /// otherwise the screen is installed immediately.
    pub fn set_root_screen(
        &mut self,
        kind: WindowKind,
        screen: Screen,
        animated: Option<AnimateKind>,
    ) {
        let window = self.window_mut(kind);
        let animation = animated.filter(|_| window.root().is_some());

        window.set_root(
            screen.clone(),
            animation.map(|animate| (animate, ANIMATION_DURATION)),
        );
        window.make_key_and_visible();

        debug!(window = ?kind, screen = %screen, ?animation, "Presented root screen");
        self.events.push(RouterEvent::Presented {
            window: kind,
            screen,
            animation,
        });
    }

    pub fn dismiss_window(&mut self, kind: WindowKind) {
        self.window_mut(kind).dismiss();
        debug!(window = ?kind, "Dismissed window");
        self.events.push(RouterEvent::Dismissed { window: kind });
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<RouterEvent> {
        std::mem::take(&mut self.events)
    }
}
