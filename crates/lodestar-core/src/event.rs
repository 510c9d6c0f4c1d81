//! Keyboard input as seen by the focus controller.

use serde::{Deserialize, Serialize};

/// Keys the interaction layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Control keys
    /// Enter/Return key
    Enter,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space key
    Space,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,

    // Arrow keys
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,

    /// Any other printable character
    Char(char),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a [`Key`].
    ///
    /// Returns `None` for keys with no counterpart (function keys, bare
    /// modifiers and the like).
    #[must_use]
    pub fn from_dom_key(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            " " | "Spacebar" => Self::Space,
            "Delete" | "Del" => Self::Delete,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Check if this is an arrow key.
    #[must_use]
    pub const fn is_arrow(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }

    /// Keys that trigger an activation (Enter and Space).
    #[must_use]
    pub const fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Control key (Cmd on Mac).
    pub ctrl: bool,
    /// Alt key (Option on Mac).
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
    /// Meta key (Windows key, Cmd on Mac).
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: false,
    };

    /// Create custom modifiers.
    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }

    /// Check if any modifier is pressed.
    pub const fn any(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }

    /// Check if no modifier is pressed.
    pub const fn none(&self) -> bool {
        !self.any()
    }
}

/// A key press delivered by the host, with a "prevent default" flag the
/// host reads back after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed
    pub key: Key,
    /// Modifiers held
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::NONE)
    }

    /// Key press with modifiers.
    #[must_use]
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// Shift + key.
    #[must_use]
    pub const fn shifted(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::SHIFT)
    }

    /// Suppress the platform's default action (scrolling, tabbing, ...).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`KeyEvent::prevent_default`] was called.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The handler acted and prevented the default action
    Handled,
    /// The handler left the event alone
    Ignored,
}

impl EventDisposition {
    /// Check if the event was handled.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}
