//! Keyboard scenarios driven through the harness.

use lodestar_core::{
    on_activate, on_escape, Activation, Deactivation, Direction, EventDisposition, FocusError,
    Key, KeyEvent, Orientation, Politeness,
};
use lodestar_test::{KeyboardHarness, MockTree, NodeId};
use proptest::prelude::*;
use std::cell::Cell;
use std::time::Duration;

fn app() -> (MockTree, NodeId, NodeId) {
    let mut tree = MockTree::new();
    let root = tree.root();
    tree.focusables(root, &["menu", "settings"]);
    let dialog = tree.container(root, "dialog");
    tree.focusables(dialog, &["title-close", "field"]);
    let confirm = tree.container(dialog, "confirm");
    tree.focusables(confirm, &["no", "yes"]);
    (tree, dialog, confirm)
}

// =============================================================================
// Focus Trap Lifecycle
// =============================================================================

#[test]
fn test_dialog_open_and_close_restores_trigger() {
    let (tree, dialog, _) = app();
    let mut h = KeyboardHarness::new(tree);
    h.tab().tab().assert_focused("settings");

    assert_eq!(h.trap(dialog), Ok(Activation::Activated));
    h.assert_focused("title-close");

    let settings = h.tree().find("settings").unwrap();
    assert_eq!(h.release(), Deactivation::Restored(settings));
    h.assert_focused("settings");
    assert!(!h.controller().is_trapped());
}

#[test]
fn test_nested_traps_unwind_in_order() {
    let (tree, dialog, confirm) = app();
    let mut h = KeyboardHarness::new(tree);
    h.tab().assert_focused("menu");

    h.trap(dialog).unwrap();
    h.tab().tab().assert_focused("no");

    h.trap(confirm).unwrap();
    assert_eq!(h.controller().depth(), 2);
    h.assert_focused("no");
    h.tab().assert_focused("yes");
    h.tab().assert_focused("no");

    let no = h.tree().find("no").unwrap();
    assert_eq!(h.release(), Deactivation::Restored(no));

    // Back in the outer trap: the whole dialog cycles again.
    h.tab().tab().assert_focused("title-close");

    let menu = h.tree().find("menu").unwrap();
    assert_eq!(h.release(), Deactivation::Restored(menu));
    assert_eq!(h.release(), Deactivation::NotActive);
}

#[test]
fn test_trapping_same_container_twice_fails() {
    let (tree, dialog, _) = app();
    let mut h = KeyboardHarness::new(tree);
    h.trap(dialog).unwrap();
    assert_eq!(h.trap(dialog), Err(FocusError::AlreadyTrapped));
    assert_eq!(h.controller().depth(), 1);
}

#[test]
fn test_empty_container_is_skipped() {
    let mut tree = MockTree::new();
    let root = tree.root();
    tree.focusable(root, "button");
    let empty = tree.container(root, "empty");
    let mut h = KeyboardHarness::new(tree);
    h.tab();

    assert_eq!(h.trap(empty), Ok(Activation::Skipped));
    assert!(!h.controller().is_trapped());
    h.assert_focused("button");
    h.tab().assert_focused("button");
}

#[test]
fn test_release_when_trigger_was_removed() {
    let (tree, dialog, _) = app();
    let mut h = KeyboardHarness::new(tree);
    h.tab();
    h.trap(dialog).unwrap();

    let menu = h.tree().find("menu").unwrap();
    h.tree_mut().detach(menu);

    assert_eq!(h.release(), Deactivation::RestorationSkipped);
    h.assert_focused("title-close");
}

#[test]
fn test_focus_escaping_the_trap_is_pulled_back() {
    let (tree, dialog, _) = app();
    let mut h = KeyboardHarness::new(tree);
    h.trap(dialog).unwrap();

    let settings = h.tree().find("settings").unwrap();
    h.tree_mut().set_focus(Some(settings));

    let disposition = h.press(KeyEvent::new(Key::Tab));
    assert_eq!(disposition, EventDisposition::Handled);
    h.assert_focused("title-close");
}

#[test]
fn test_escape_closes_dialog() {
    let (tree, dialog, _) = app();
    let mut h = KeyboardHarness::new(tree);
    h.tab();
    h.trap(dialog).unwrap();

    let closed = Cell::new(false);
    let mut event = KeyEvent::new(Key::Escape);
    let disposition = on_escape(&mut event, || closed.set(true));
    assert!(disposition.is_handled());
    assert!(event.is_default_prevented());
    assert!(closed.get());

    h.release();
    h.assert_focused("menu");
}

#[test]
fn test_activation_keys() {
    let presses = Cell::new(0);
    for key in [Key::Enter, Key::Space, Key::Char('a')] {
        let mut event = KeyEvent::new(key);
        on_activate(&mut event, || presses.set(presses.get() + 1));
    }
    assert_eq!(presses.get(), 2);
}

// =============================================================================
// Roving Focus
// =============================================================================

#[test]
fn test_toolbar_follows_direction_change() {
    let mut tree = MockTree::new();
    let root = tree.root();
    let items = tree.focusables(root, &["bold", "italic", "underline"]);
    let mut h = KeyboardHarness::new(tree);

    assert_eq!(h.navigate(Key::Right, &items, 0, Orientation::Horizontal), Some(1));
    h.assert_focused("italic");

    h.state().set_from_language("ar-EG");
    assert_eq!(h.navigate(Key::Right, &items, 1, Orientation::Horizontal), Some(0));
    h.assert_focused("bold");
    assert_eq!(h.navigate(Key::End, &items, 0, Orientation::Horizontal), Some(2));
    h.assert_focused("underline");
}

#[test]
fn test_vertical_menu_ignores_direction() {
    let mut tree = MockTree::new();
    let root = tree.root();
    let items = tree.focusables(root, &["new", "open", "save"]);
    let mut h = KeyboardHarness::new(tree).direction(Direction::Rtl);

    assert_eq!(h.navigate(Key::Down, &items, 0, Orientation::Vertical), Some(1));
    assert_eq!(h.navigate(Key::Down, &items, 2, Orientation::Vertical), Some(2));
    assert_eq!(h.navigate(Key::Left, &items, 1, Orientation::Vertical), None);
    h.assert_focused("save");
}

// =============================================================================
// Announcements
// =============================================================================

#[test]
fn test_announcements_expire_independently() {
    let mut h = KeyboardHarness::new(MockTree::new());
    h.announce("Uploading", Politeness::Polite);
    h.advance(Duration::from_millis(700));
    h.announce("Upload failed", Politeness::Assertive);

    assert_eq!(h.advance(Duration::from_millis(300)), 1);
    h.assert_announced("Upload failed");
    assert_eq!(h.tree().live_messages().len(), 1);

    assert_eq!(h.advance(Duration::from_millis(700)), 1);
    assert!(h.tree().live_messages().is_empty());
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_tab_never_leaves_trap(
        count in 1usize..8,
        presses in prop::collection::vec(any::<bool>(), 0..40),
    ) {
        let mut tree = MockTree::new();
        let root = tree.root();
        tree.focusables(root, &["before", "after"]);
        let trap = tree.container(root, "trap");
        let names: Vec<String> = (0..count).map(|i| format!("item-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        tree.focusables(trap, &refs);

        let mut h = KeyboardHarness::new(tree);
        h.trap(trap).unwrap();

        for backwards in presses {
            if backwards {
                h.shift_tab();
            } else {
                h.tab();
            }
            let name = h.focused_name().unwrap().to_string();
            prop_assert!(name.starts_with("item-"), "focus escaped to {}", name);
        }
    }

    #[test]
    fn prop_full_tab_cycle_returns_to_start(count in 1usize..8) {
        let mut tree = MockTree::new();
        let root = tree.root();
        let trap = tree.container(root, "trap");
        let names: Vec<String> = (0..count).map(|i| format!("item-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        tree.focusables(trap, &refs);

        let mut h = KeyboardHarness::new(tree);
        h.trap(trap).unwrap();
        for _ in 0..count {
            h.tab();
        }
        prop_assert_eq!(h.focused_name(), Some("item-0"));
    }
}
