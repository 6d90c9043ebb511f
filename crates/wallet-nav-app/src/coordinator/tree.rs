//! Arena of coordinators
//!
//! Each node records its parent index; the parent's child list is the only
//! ownership edge. Freed slots are reused with a bumped generation, so a
//! stale [`CoordinatorId`] can only miss, never alias another coordinator.

use std::fmt;

use wallet_nav_core::prelude::*;

use super::{Coordinator, CoordinatorContext, CoordinatorKind};
use crate::router::WindowRouter;

/// Handle to a coordinator stored in a [`CoordinatorTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinatorId {
    index: usize,
    generation: u32,
}

impl fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Node {
    coordinator: Box<dyn Coordinator>,
    parent: Option<CoordinatorId>,
    children: Vec<CoordinatorId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug)]
pub struct CoordinatorTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: CoordinatorId,
}

impl CoordinatorTree {
    /// Create a tree holding `root`. The root is not started.
    pub fn new(root: Box<dyn Coordinator>) -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node {
                    coordinator: root,
                    parent: None,
                    children: Vec::new(),
                }),
            }],
            free: Vec::new(),
            root: CoordinatorId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn root(&self) -> CoordinatorId {
        self.root
    }

    fn node(&self, id: CoordinatorId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: CoordinatorId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn insert(&mut self, node: Node) -> CoordinatorId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                CoordinatorId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                CoordinatorId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Empty the slot behind `id` and queue it for reuse
    fn release(&mut self, id: CoordinatorId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    pub fn contains(&self, id: CoordinatorId) -> bool {
        self.node(id).is_some()
    }

    pub fn kind(&self, id: CoordinatorId) -> Option<CoordinatorKind> {
        self.node(id).map(|n| n.coordinator.kind())
    }

    pub fn parent(&self, id: CoordinatorId) -> Option<CoordinatorId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of `id` in insertion order
    pub fn children(&self, id: CoordinatorId) -> &[CoordinatorId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live coordinators, root included
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The child of `parent` with the given kind
    pub fn child_of_kind(
        &self,
        parent: CoordinatorId,
        kind: CoordinatorKind,
    ) -> Option<CoordinatorId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == Some(kind))
    }

    pub fn has_child(&self, parent: CoordinatorId, kind: CoordinatorKind) -> bool {
        self.child_of_kind(parent, kind).is_some()
    }

    /// Attach `child` under `parent` and start it.
    ///
    /// Returns `None` without starting anything if `parent` already has a
    /// child of the same kind or does not exist. Children spawned by
    /// `start()` are attached and started in turn.
    pub fn add_child_and_start(
        &mut self,
        parent: CoordinatorId,
        child: Box<dyn Coordinator>,
        router: &mut WindowRouter,
    ) -> Option<CoordinatorId> {
        let kind = child.kind();

        if !self.contains(parent) {
            warn!("Cannot attach {} coordinator: parent {} is gone", kind, parent);
            return None;
        }

        if self.has_child(parent, kind) {
            debug!("Parent {} already has a {} coordinator", parent, kind);
            return None;
        }

        let id = self.insert(Node {
            coordinator: child,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }

        let mut ctx = CoordinatorContext::new(router);
        if let Some(node) = self.node_mut(id) {
            node.coordinator.start(&mut ctx);
        }
        debug!("Started {} coordinator {} under {}", kind, id, parent);

        for grandchild in ctx.into_children() {
            self.add_child_and_start(id, grandchild, router);
        }

        Some(id)
    }

    /// Detach `child` from `parent` and tear down its subtree.
    ///
    /// Descendants finish before their ancestors. Returns false if `child`
    /// is not a child of `parent`.
    pub fn remove_child(
        &mut self,
        parent: CoordinatorId,
        child: CoordinatorId,
        router: &mut WindowRouter,
    ) -> bool {
        let Some(node) = self.node_mut(parent) else {
            return false;
        };
        let Some(position) = node.children.iter().position(|&c| c == child) else {
            return false;
        };
        node.children.remove(position);

        self.teardown(child, router);
        true
    }

    fn teardown(&mut self, id: CoordinatorId, router: &mut WindowRouter) {
        let Some(mut node) = self.release(id) else {
            return;
        };

        for &child in node.children.iter().rev() {
            self.teardown(child, router);
        }

        let mut ctx = CoordinatorContext::new(router);
        node.coordinator.finish(&mut ctx);
        let orphans = ctx.into_children();
        if !orphans.is_empty() {
            warn!(
                "{} coordinator spawned {} children while finishing; dropped",
                node.coordinator.kind(),
                orphans.len()
            );
        }
        debug!("Finished {} coordinator {}", node.coordinator.kind(), id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records start/finish calls into shared counters
    #[derive(Debug)]
    struct Recorder {
        kind: CoordinatorKind,
        starts: Arc<AtomicUsize>,
        finished: Arc<Mutex<Vec<CoordinatorKind>>>,
        spawn: Vec<CoordinatorKind>,
    }

    #[derive(Debug, Default, Clone)]
    struct Counters {
        starts: Arc<AtomicUsize>,
        finished: Arc<Mutex<Vec<CoordinatorKind>>>,
    }

    impl Counters {
        fn recorder(&self, kind: CoordinatorKind) -> Box<dyn Coordinator> {
            self.recorder_spawning(kind, vec![])
        }

        fn recorder_spawning(
            &self,
            kind: CoordinatorKind,
            spawn: Vec<CoordinatorKind>,
        ) -> Box<dyn Coordinator> {
            Box::new(Recorder {
                kind,
                starts: self.starts.clone(),
                finished: self.finished.clone(),
                spawn,
            })
        }

        fn start_count(&self) -> usize {
            self.starts.load(Ordering::SeqCst)
        }

        fn finish_order(&self) -> Vec<CoordinatorKind> {
            self.finished.lock().unwrap().clone()
        }
    }

    impl Coordinator for Recorder {
        fn kind(&self) -> CoordinatorKind {
            self.kind
        }

        fn start(&mut self, ctx: &mut CoordinatorContext<'_>) {
            self.starts.fetch_add(1, Ordering::SeqCst);
            for kind in self.spawn.drain(..) {
                ctx.spawn_child(Box::new(Recorder {
                    kind,
                    starts: self.starts.clone(),
                    finished: self.finished.clone(),
                    spawn: vec![],
                }));
            }
        }

        fn finish(&mut self, _ctx: &mut CoordinatorContext<'_>) {
            self.finished.lock().unwrap().push(self.kind);
        }
    }

    fn tree(counters: &Counters) -> CoordinatorTree {
        CoordinatorTree::new(counters.recorder(CoordinatorKind::App))
    }

    #[test]
    fn test_add_same_kind_twice_starts_once() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();

        let first =
            tree.add_child_and_start(root, counters.recorder(CoordinatorKind::Hello), &mut router);
        let second =
            tree.add_child_and_start(root, counters.recorder(CoordinatorKind::Hello), &mut router);

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(counters.start_count(), 1);
    }

    #[test]
    fn test_child_records_parent() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();

        let id = tree
            .add_child_and_start(root, counters.recorder(CoordinatorKind::Slide), &mut router)
            .unwrap();

        assert_eq!(tree.parent(id), Some(root));
        assert_eq!(tree.parent(root), None);
        assert!(tree.has_child(root, CoordinatorKind::Slide));
        assert!(!tree.has_child(root, CoordinatorKind::Hello));
    }

    #[test]
    fn test_different_kinds_coexist_in_order() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();

        let slide = tree
            .add_child_and_start(root, counters.recorder(CoordinatorKind::Slide), &mut router)
            .unwrap();
        let passcode = tree
            .add_child_and_start(
                root,
                counters.recorder(CoordinatorKind::PasscodeLogIn),
                &mut router,
            )
            .unwrap();

        assert_eq!(tree.children(root), &[slide, passcode]);
    }

    #[test]
    fn test_spawned_children_are_started() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();

        let slide = tree
            .add_child_and_start(
                root,
                counters.recorder_spawning(CoordinatorKind::Slide, vec![CoordinatorKind::Enter]),
                &mut router,
            )
            .unwrap();

        assert!(tree.has_child(slide, CoordinatorKind::Enter));
        assert_eq!(counters.start_count(), 2);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_remove_child_tears_down_subtree() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();
        let slide = tree
            .add_child_and_start(
                root,
                counters.recorder_spawning(CoordinatorKind::Slide, vec![CoordinatorKind::MainTabBar]),
                &mut router,
            )
            .unwrap();
        let tab_bar = tree.children(slide)[0];

        assert!(tree.remove_child(root, slide, &mut router));

        assert!(!tree.contains(slide));
        assert!(!tree.contains(tab_bar));
        assert!(tree.children(root).is_empty());
        assert_eq!(
            counters.finish_order(),
            vec![CoordinatorKind::MainTabBar, CoordinatorKind::Slide]
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_requires_parent_link() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();
        let slide = tree
            .add_child_and_start(
                root,
                counters.recorder_spawning(CoordinatorKind::Slide, vec![CoordinatorKind::Enter]),
                &mut router,
            )
            .unwrap();
        let enter = tree.children(slide)[0];

        assert!(!tree.remove_child(root, enter, &mut router));
        assert!(tree.contains(enter));
        assert!(counters.finish_order().is_empty());
    }

    #[test]
    fn test_kind_can_be_added_again_after_removal() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();
        let hello = tree
            .add_child_and_start(root, counters.recorder(CoordinatorKind::Hello), &mut router)
            .unwrap();
        tree.remove_child(root, hello, &mut router);

        let again =
            tree.add_child_and_start(root, counters.recorder(CoordinatorKind::Hello), &mut router);

        assert!(again.is_some());
        assert_ne!(again, Some(hello));
        assert_eq!(counters.start_count(), 2);
    }

    #[test]
    fn test_attach_to_removed_parent_is_refused() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();
        let slide = tree
            .add_child_and_start(root, counters.recorder(CoordinatorKind::Slide), &mut router)
            .unwrap();
        tree.remove_child(root, slide, &mut router);

        let orphan =
            tree.add_child_and_start(slide, counters.recorder(CoordinatorKind::Enter), &mut router);

        assert!(orphan.is_none());
        assert_eq!(counters.start_count(), 1);
    }

    #[test]
    fn test_removed_slots_are_reused_without_aliasing() {
        let counters = Counters::default();
        let mut tree = tree(&counters);
        let mut router = WindowRouter::headless();
        let root = tree.root();

        let mut previous = Vec::new();
        for _ in 0..50 {
            let passcode = tree
                .add_child_and_start(
                    root,
                    counters.recorder(CoordinatorKind::PasscodeLogIn),
                    &mut router,
                )
                .unwrap();
            assert!(tree.remove_child(root, passcode, &mut router));
            previous.push(passcode);
        }

        assert_eq!(tree.slots.len(), 2);
        let slide = tree
            .add_child_and_start(root, counters.recorder(CoordinatorKind::Slide), &mut router)
            .unwrap();
        assert!(previous.iter().all(|&stale| !tree.contains(stale)));
        assert!(!tree.remove_child(root, previous[0], &mut router));
        assert!(tree.contains(slide));
    }
}
