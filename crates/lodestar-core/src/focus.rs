//! Focus trapping and keyboard list navigation.
//!
//! This module provides:
//! - [`FocusHost`], the capability the UI tree exposes to the controller
//! - [`FocusController`], the focus-trap lifecycle with a Tab loop
//! - [`handle_arrow_keys`], direction-aware roving focus for lists
//! - [`on_activate`] / [`on_escape`] key helpers
//!
//! Traps nest as a stack: activating a second container while one is trapped
//! pushes a new session, and deactivating pops back to the outer trap.

use crate::event::{EventDisposition, Key, KeyEvent};
use crate::resolver::{Orientation, Resolver};
use std::fmt;
use thiserror::Error;

/// What the controller needs from the UI tree.
///
/// Elements are cheap handles (ids, reference-counted nodes, ...) compared by
/// identity.
pub trait FocusHost {
    /// Element handle type.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Focusable descendants of `container`, in traversal order.
    fn focusable_within(&self, container: &Self::Element) -> Vec<Self::Element>;

    /// Element that currently holds focus, if any.
    fn focused(&self) -> Option<Self::Element>;

    /// Move focus to `element`.
    fn focus(&mut self, element: &Self::Element);

    /// Whether `element` is still part of the tree.
    fn is_attached(&self, element: &Self::Element) -> bool;
}

/// Controller state as observed from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// No trap is active
    Idle,
    /// At least one trap is active
    Trapped,
}

/// Result of [`FocusController::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Trap installed and focus moved to the first element
    Activated,
    /// Container had nothing focusable; nothing changed
    Skipped,
}

/// Result of [`FocusController::deactivate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deactivation<E> {
    /// Focus went back to the element focused before activation
    Restored(E),
    /// The trap was released but prior focus was gone or absent
    RestorationSkipped,
    /// No trap was active
    NotActive,
}

/// Errors from trap activation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
    /// The container already owns a trap session
    #[error("container is already trapped")]
    AlreadyTrapped,
}

/// One active focus trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrapSession<E> {
    container: E,
    focusables: Vec<E>,
    prior_focus: Option<E>,
}

impl<E: PartialEq> TrapSession<E> {
    /// Container the trap is scoped to.
    pub const fn container(&self) -> &E {
        &self.container
    }

    /// Focusable set captured at activation, in traversal order.
    pub fn focusables(&self) -> &[E] {
        &self.focusables
    }

    /// Element focused right before activation.
    pub const fn prior_focus(&self) -> Option<&E> {
        self.prior_focus.as_ref()
    }

    /// Check if an element belongs to the trapped set.
    pub fn contains(&self, element: &E) -> bool {
        self.focusables.contains(element)
    }

    fn position(&self, element: &E) -> Option<usize> {
        self.focusables.iter().position(|e| e == element)
    }
}

/// Focus-trap controller.
///
/// The innermost session owns the Tab intercept; [`FocusController::handle_key`]
/// is the intercept and does nothing while the controller is idle.
#[derive(Debug, Clone)]
pub struct FocusController<E> {
    stack: Vec<TrapSession<E>>,
}

impl<E> Default for FocusController<E> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<E: Clone + PartialEq + fmt::Debug> FocusController<E> {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> FocusState {
        if self.stack.is_empty() {
            FocusState::Idle
        } else {
            FocusState::Trapped
        }
    }

    /// Check if a trap is active.
    pub fn is_trapped(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Number of nested traps.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The innermost session.
    pub fn active_session(&self) -> Option<&TrapSession<E>> {
        self.stack.last()
    }

    /// Trap focus inside `container`.
    ///
    /// Focusable elements are captured once, now. An empty container is not
    /// an error: the controller stays as it was and reports
    /// [`Activation::Skipped`].
    pub fn activate<H>(&mut self, host: &mut H, container: &E) -> Result<Activation, FocusError>
    where
        H: FocusHost<Element = E>,
    {
        if self.stack.iter().any(|s| &s.container == container) {
            return Err(FocusError::AlreadyTrapped);
        }

        let focusables = host.focusable_within(container);
        let Some(first) = focusables.first().cloned() else {
            tracing::debug!(?container, "focus trap skipped: no focusable elements");
            return Ok(Activation::Skipped);
        };

        let prior_focus = host.focused();
        host.focus(&first);

        tracing::debug!(
            ?container,
            focusables = focusables.len(),
            depth = self.stack.len() + 1,
            "focus trap activated"
        );

        self.stack.push(TrapSession {
            container: container.clone(),
            focusables,
            prior_focus,
        });
        Ok(Activation::Activated)
    }

    /// Release the innermost trap and restore prior focus if it still exists.
    pub fn deactivate<H>(&mut self, host: &mut H) -> Deactivation<E>
    where
        H: FocusHost<Element = E>,
    {
        let Some(session) = self.stack.pop() else {
            return Deactivation::NotActive;
        };

        match session.prior_focus {
            Some(prior) if host.is_attached(&prior) => {
                host.focus(&prior);
                tracing::debug!(
                    container = ?session.container,
                    ?prior,
                    "focus trap released, focus restored"
                );
                Deactivation::Restored(prior)
            }
            _ => {
                tracing::debug!(
                    container = ?session.container,
                    "focus trap released without restoring focus"
                );
                Deactivation::RestorationSkipped
            }
        }
    }

    /// Tab intercept for the innermost trap.
    ///
    /// Tab on the last element wraps to the first and Shift+Tab on the first
    /// wraps to the last. Focus found outside the trapped set is pulled back
    /// in. Every other Tab press is left to the host.
    pub fn handle_key<H>(&self, host: &mut H, event: &mut KeyEvent) -> EventDisposition
    where
        H: FocusHost<Element = E>,
    {
        let Some(session) = self.stack.last() else {
            return EventDisposition::Ignored;
        };

        let m = event.modifiers;
        if event.key != Key::Tab || m.ctrl || m.alt || m.meta {
            return EventDisposition::Ignored;
        }

        let (Some(first), Some(last)) = (session.focusables.first(), session.focusables.last())
        else {
            return EventDisposition::Ignored;
        };
        let last_index = session.focusables.len() - 1;
        let position = host.focused().and_then(|f| session.position(&f));

        let target = match (m.shift, position) {
            (false, Some(i)) if i == last_index => first,
            (true, Some(0)) => last,
            (_, Some(_)) => return EventDisposition::Ignored,
            (false, None) => first,
            (true, None) => last,
        };

        tracing::trace!(?target, shift = m.shift, "tab wrapped inside focus trap");
        event.prevent_default();
        host.focus(target);
        EventDisposition::Handled
    }
}

/// Roving focus for a list of items.
///
/// Computes the next index with the resolver (so horizontal lists follow the
/// writing direction), focuses `items[next]` and prevents the default
/// scrolling. Keys that do not navigate are left unhandled and return `None`,
/// as are presses with Ctrl, Alt or Meta held (Alt+Left is history back).
pub fn handle_arrow_keys<H>(
    host: &mut H,
    resolver: &Resolver,
    event: &mut KeyEvent,
    items: &[H::Element],
    current_index: usize,
    orientation: Orientation,
) -> Option<usize>
where
    H: FocusHost,
{
    let m = event.modifiers;
    if m.ctrl || m.alt || m.meta {
        return None;
    }

    let next = resolver.arrow_key(event.key, orientation, current_index, items.len())?;
    event.prevent_default();
    host.focus(&items[next]);
    Some(next)
}

/// Run `callback` for Enter or Space.
///
/// The default action is prevented before the callback runs, so Space does
/// not also scroll the page.
pub fn on_activate<F: FnOnce()>(event: &mut KeyEvent, callback: F) -> EventDisposition {
    if !event.key.is_activation() {
        return EventDisposition::Ignored;
    }
    event.prevent_default();
    callback();
    EventDisposition::Handled
}

/// Run `callback` for Escape, preventing the default action first.
pub fn on_escape<F: FnOnce()>(event: &mut KeyEvent, callback: F) -> EventDisposition {
    if event.key != Key::Escape {
        return EventDisposition::Ignored;
    }
    event.prevent_default();
    callback();
    EventDisposition::Handled
}
