#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::manual_assert)]
//! Testing support for Lodestar.
//!
//! - [`MockTree`]: an in-memory UI tree implementing the focus and
//!   live-region host traits
//! - [`KeyboardHarness`]: drives Tab, Shift+Tab and arrow keys through a
//!   focus controller, standing in for the browser's native Tab order
//! - [`ContrastAudit`]: checks a [`Palette`] of color pairs against WCAG
//!   thresholds
//!
//! ```
//! use lodestar_test::{KeyboardHarness, MockTree};
//!
//! let mut tree = MockTree::new();
//! let root = tree.root();
//! let dialog = tree.container(root, "dialog");
//! tree.focusables(dialog, &["cancel", "ok"]);
//!
//! let mut harness = KeyboardHarness::new(tree);
//! harness.trap(dialog).unwrap();
//! harness.assert_focused("cancel");
//! harness.tab().assert_focused("ok");
//! harness.tab().assert_focused("cancel");
//! ```

mod audit;
mod harness;
mod tree;

pub use audit::{AuditReport, ColorPair, ContrastAudit, Impact, Palette, PaletteError, Violation};
pub use harness::KeyboardHarness;
pub use tree::{MockTree, NodeId};
