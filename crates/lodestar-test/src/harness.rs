//! Keyboard-driven test harness.
//!
//! Wires a [`MockTree`] to a [`FocusController`], a [`Resolver`] and an
//! [`Announcer`], and plays the part of the browser for anything the
//! controller leaves unhandled: a Tab press that is not prevented moves
//! focus to the next focusable node in document order, wrapping at the ends.

use crate::tree::{MockTree, NodeId};
use lodestar_core::{
    handle_arrow_keys, Activation, Announcer, Deactivation, Direction, DirectionState,
    EventDisposition, FocusController, FocusError, FocusHost, Key, KeyEvent, LodestarConfig,
    Modifiers, Orientation, Politeness, Resolver,
};
use std::time::{Duration, Instant};

/// Test harness for keyboard interaction.
#[derive(Debug)]
pub struct KeyboardHarness {
    tree: MockTree,
    controller: FocusController<NodeId>,
    resolver: Resolver,
    announcer: Announcer<NodeId>,
    clock: Instant,
}

impl KeyboardHarness {
    /// Harness over `tree` in left-to-right mode.
    pub fn new(tree: MockTree) -> Self {
        Self::with_state(tree, DirectionState::default(), Announcer::new())
    }

    /// Harness using the direction and announcer settings of `config`.
    pub fn from_config(tree: MockTree, config: &LodestarConfig) -> Self {
        Self::with_state(tree, config.direction_state(), config.build_announcer())
    }

    fn with_state(tree: MockTree, state: DirectionState, announcer: Announcer<NodeId>) -> Self {
        Self {
            tree,
            controller: FocusController::new(),
            resolver: Resolver::new(state),
            announcer,
            clock: Instant::now(),
        }
    }

    /// Switch the writing direction.
    #[must_use]
    pub fn direction(self, direction: Direction) -> Self {
        self.resolver.state().set_direction(direction);
        self
    }

    // === Accessors ===

    /// The tree under test.
    pub const fn tree(&self) -> &MockTree {
        &self.tree
    }

    /// Mutable access, for detaching nodes mid-test.
    pub fn tree_mut(&mut self) -> &mut MockTree {
        &mut self.tree
    }

    /// The focus controller.
    pub const fn controller(&self) -> &FocusController<NodeId> {
        &self.controller
    }

    /// The resolver, bound to the harness direction state.
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Shared direction state.
    pub const fn state(&self) -> &DirectionState {
        self.resolver.state()
    }

    /// Name of the focused node.
    pub fn focused_name(&self) -> Option<&str> {
        self.tree.focused_name()
    }

    // === Focus traps ===

    /// Trap focus in `container`.
    pub fn trap(&mut self, container: NodeId) -> Result<Activation, FocusError> {
        self.controller.activate(&mut self.tree, &container)
    }

    /// Release the innermost trap.
    pub fn release(&mut self) -> Deactivation<NodeId> {
        self.controller.deactivate(&mut self.tree)
    }

    // === Key simulation ===

    /// Dispatch a key event and apply the native Tab action if nothing
    /// prevented it.
    pub fn press(&mut self, event: KeyEvent) -> EventDisposition {
        let mut event = event;
        let disposition = self.controller.handle_key(&mut self.tree, &mut event);
        tracing::trace!(key = ?event.key, ?disposition, "harness key press");

        let m = event.modifiers;
        if event.key == Key::Tab && !event.is_default_prevented() && !(m.ctrl || m.alt || m.meta) {
            self.native_tab(m.shift);
        }
        disposition
    }

    /// Press Tab.
    pub fn tab(&mut self) -> &mut Self {
        self.press(KeyEvent::new(Key::Tab));
        self
    }

    /// Press Shift+Tab.
    pub fn shift_tab(&mut self) -> &mut Self {
        self.press(KeyEvent::with_modifiers(Key::Tab, Modifiers::SHIFT));
        self
    }

    /// Press `key` on a roving-focus list, returning the new index.
    pub fn navigate(
        &mut self,
        key: Key,
        items: &[NodeId],
        current_index: usize,
        orientation: Orientation,
    ) -> Option<usize> {
        let mut event = KeyEvent::new(key);
        handle_arrow_keys(
            &mut self.tree,
            &self.resolver,
            &mut event,
            items,
            current_index,
            orientation,
        )
    }

    fn native_tab(&mut self, backwards: bool) {
        let order = self.tree.tab_order();
        let len = order.len();
        if len == 0 {
            return;
        }

        let position = self
            .tree
            .focused()
            .and_then(|f| order.iter().position(|id| *id == f));
        let next = match (backwards, position) {
            (false, Some(i)) => (i + 1) % len,
            (true, Some(i)) => (i + len - 1) % len,
            (false, None) => 0,
            (true, None) => len - 1,
        };
        self.tree.focus(&order[next]);
    }

    // === Announcements ===

    /// Announce through the harness announcer at the current time.
    pub fn announce(&mut self, message: &str, politeness: Politeness) -> Option<NodeId> {
        self.announcer
            .announce(&mut self.tree, message, politeness, self.clock)
    }

    /// Move the harness clock forward and flush expired live regions.
    ///
    /// Returns how many nodes were removed.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.clock += by;
        self.announcer.flush_expired(&mut self.tree, self.clock)
    }

    // === Assertions ===

    /// Assert which node holds focus.
    ///
    /// # Panics
    ///
    /// Panics if focus is elsewhere or nowhere.
    pub fn assert_focused(&self, name: &str) -> &Self {
        let actual = self.focused_name();
        assert!(
            actual == Some(name),
            "Expected focus on '{name}', but it was on {actual:?}"
        );
        self
    }

    /// Assert that `message` is currently live.
    ///
    /// # Panics
    ///
    /// Panics if no live region carries `message`.
    pub fn assert_announced(&self, message: &str) -> &Self {
        let live = self.tree.live_messages();
        assert!(
            live.iter().any(|(m, _)| *m == message),
            "Expected live region '{message}', found {live:?}"
        );
        self
    }
}
