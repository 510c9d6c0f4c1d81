//! Writing direction and the shared direction state.
//!
//! [`DirectionState`] holds the one direction that is current for a UI
//! session and fans changes out to observers. It is an explicit object rather
//! than a global so that independent sessions (and tests) can each carry
//! their own direction.
//!
//! # Examples
//!
//! ```
//! use lodestar_core::{Direction, DirectionState};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let state = DirectionState::new(Direction::Ltr);
//! let seen = Rc::new(Cell::new(None));
//!
//! let sink = Rc::clone(&seen);
//! let _subscription = state.subscribe(move |d| sink.set(Some(d)));
//!
//! state.set_direction(Direction::Rtl);
//! assert_eq!(seen.get(), Some(Direction::Rtl));
//! ```

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use thiserror::Error;

/// Writing/reading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left
    Rtl,
}

/// Primary language subtags whose default script is written right to left.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "iw", "ps", "sd", "syr", "ug", "ur", "yi",
];

/// Script subtags that force right-to-left regardless of language.
const RTL_SCRIPTS: &[&str] = &["arab", "hebr", "thaa", "syrc", "nkoo", "adlm"];

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }

    /// Whether this is right to left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Attribute value (`"ltr"` / `"rtl"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Direction for a BCP 47 language tag such as `"ar-EG"` or `"ha-Arab"`.
    ///
    /// An explicit script subtag wins over the language's default script.
    /// Unknown or empty tags resolve to [`Direction::Ltr`].
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let mut subtags = tag.split(['-', '_']).map(str::to_ascii_lowercase);
        let Some(language) = subtags.next() else {
            return Self::Ltr;
        };

        for subtag in subtags {
            if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                return if RTL_SCRIPTS.contains(&subtag.as_str()) {
                    Self::Rtl
                } else {
                    Self::Ltr
                };
            }
        }

        if RTL_LANGUAGES.contains(&language.as_str()) {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }

    /// Dominant direction of a run of text, or `None` without strong characters.
    ///
    /// Counts right-to-left letters against other alphabetic characters;
    /// digits, punctuation and whitespace are neutral.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let mut rtl_count = 0usize;
        let mut ltr_count = 0usize;

        for c in text.chars() {
            if is_rtl_char(c) {
                rtl_count += 1;
            } else if c.is_alphabetic() {
                ltr_count += 1;
            }
        }

        if rtl_count > ltr_count {
            Some(Self::Rtl)
        } else if ltr_count > 0 {
            Some(Self::Ltr)
        } else {
            None
        }
    }
}

/// Check if a character belongs to a right-to-left script block.
fn is_rtl_char(c: char) -> bool {
    let code = c as u32;
    // Hebrew
    (0x0590..=0x05FF).contains(&code)
        || (0xFB1D..=0xFB4F).contains(&code) // Hebrew presentation forms
        // Arabic
        || (0x0600..=0x06FF).contains(&code)
        || (0x0750..=0x077F).contains(&code) // Arabic Supplement
        || (0x0870..=0x089F).contains(&code) // Arabic Extended-B
        || (0x08A0..=0x08FF).contains(&code) // Arabic Extended-A
        || (0xFB50..=0xFDFF).contains(&code) // Arabic Presentation Forms-A
        || (0xFE70..=0xFEFF).contains(&code) // Arabic Presentation Forms-B
        // Other RTL scripts
        || (0x0700..=0x074F).contains(&code) // Syriac
        || (0x0780..=0x07BF).contains(&code) // Thaana
        || (0x07C0..=0x07FF).contains(&code) // NKo
        || (0x1E900..=0x1E95F).contains(&code) // Adlam
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

/// A string that is neither `"ltr"` nor `"rtl"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected \"ltr\" or \"rtl\")")]
pub struct DirectionParseError(pub String);

type Observer = Rc<dyn Fn(Direction)>;

struct Inner {
    current: Cell<Direction>,
    observers: RefCell<Vec<(u64, Observer)>>,
    next_id: Cell<u64>,
}

/// Shared, observable writing direction for one UI session.
///
/// Cloning yields another handle to the same state. Observers are notified
/// synchronously, in subscription order, after the new value is stored, so a
/// read from inside a callback already sees it. A panicking observer is not
/// caught.
///
/// The state is single-threaded (`!Send`); a multi-threaded host has to
/// serialize access itself.
#[derive(Clone)]
pub struct DirectionState {
    inner: Rc<Inner>,
}

impl DirectionState {
    /// Create a state holding `initial`.
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self {
            inner: Rc::new(Inner {
                current: Cell::new(initial),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// The current direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.inner.current.get()
    }

    /// Store a new direction and notify observers.
    ///
    /// Setting the value that is already current notifies nobody. Returns
    /// whether the direction changed.
    pub fn set_direction(&self, direction: Direction) -> bool {
        let previous = self.inner.current.replace(direction);
        if previous == direction {
            tracing::trace!(%direction, "direction unchanged");
            return false;
        }

        // Snapshot so observers may subscribe or unsubscribe while we iterate.
        let observers: Vec<(u64, Observer)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();

        tracing::debug!(
            from = %previous,
            to = %direction,
            observers = observers.len(),
            "direction changed"
        );

        for (id, observer) in observers {
            // Skip observers removed by an earlier callback in this pass.
            if self.is_subscribed(id) {
                observer(direction);
            }
        }
        true
    }

    /// Flip the current direction. Returns the new value.
    pub fn toggle(&self) -> Direction {
        let next = self.direction().flip();
        self.set_direction(next);
        next
    }

    /// Set the direction implied by a language tag (see [`Direction::for_language`]).
    pub fn set_from_language(&self, tag: &str) -> bool {
        self.set_direction(Direction::for_language(tag))
    }

    /// Register an observer.
    ///
    /// The observer stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped.
    #[must_use = "dropping the subscription unsubscribes the observer"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Direction) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));

        Subscription {
            id,
            state: Rc::downgrade(&self.inner),
        }
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner.observers.borrow().iter().any(|(o, _)| *o == id)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl Default for DirectionState {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}

impl fmt::Debug for DirectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionState")
            .field("direction", &self.direction())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Handle returned by [`DirectionState::subscribe`].
///
/// Dropping it removes the observer. Outliving the state is harmless.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    state: Weak<Inner>,
}

impl Subscription {
    /// Remove the observer now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the state this subscription belongs to is still alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|inner| inner.observers.borrow().iter().any(|(id, _)| *id == self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.state.upgrade() {
            inner
                .observers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
