//! Logical-to-physical resolution.
//!
//! Layout, icon and keyboard code asks in reading-relative terms ("start",
//! "next item") and gets back the physical answer for the direction that is
//! current at the time of the call. The free functions take the direction
//! explicitly; [`Resolver`] reads it from a [`DirectionState`] on every call
//! and never caches it.

use crate::direction::{Direction, DirectionState};
use crate::event::Key;
use serde::{Deserialize, Serialize};

/// Horizontal mirror appended to icon transforms under right-to-left.
pub const MIRROR_TRANSFORM: &str = "scaleX(-1)";

/// Reading-relative inline side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalSide {
    /// Where reading begins
    Start,
    /// Where reading ends
    End,
}

impl LogicalSide {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Screen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalSide {
    /// Left edge
    Left,
    /// Right edge
    Right,
}

impl PhysicalSide {
    /// Lowercase CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Physical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left
    Left,
    /// Flush right
    Right,
}

impl TextAlign {
    /// Lowercase CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Layout axis of a navigable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Items laid out in a row
    Horizontal,
    /// Items laid out in a column
    #[default]
    Vertical,
}

/// Inline-axis logical box properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogicalProperty {
    /// `margin-inline-start`
    MarginInlineStart,
    /// `margin-inline-end`
    MarginInlineEnd,
    /// `padding-inline-start`
    PaddingInlineStart,
    /// `padding-inline-end`
    PaddingInlineEnd,
    /// `border-inline-start`
    BorderInlineStart,
    /// `border-inline-end`
    BorderInlineEnd,
    /// `inset-inline-start`
    InsetInlineStart,
    /// `inset-inline-end`
    InsetInlineEnd,
}

impl LogicalProperty {
    const fn side(self) -> LogicalSide {
        match self {
            Self::MarginInlineStart
            | Self::PaddingInlineStart
            | Self::BorderInlineStart
            | Self::InsetInlineStart => LogicalSide::Start,
            Self::MarginInlineEnd
            | Self::PaddingInlineEnd
            | Self::BorderInlineEnd
            | Self::InsetInlineEnd => LogicalSide::End,
        }
    }
}

/// Values for the two inline edges, keyed logically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicalEdges<T> {
    /// Start edge value
    pub start: T,
    /// End edge value
    pub end: T,
}

impl<T> LogicalEdges<T> {
    /// Create edges from start and end values.
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

/// Values for the two inline edges, keyed physically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhysicalEdges<T> {
    /// Left edge value
    pub left: T,
    /// Right edge value
    pub right: T,
}

/// Physical side for a logical side.
///
/// `Start` is `Left` under ltr and `Right` under rtl; `End` is the
/// complement.
#[must_use]
pub const fn resolve_side(direction: Direction, side: LogicalSide) -> PhysicalSide {
    match (direction, side) {
        (Direction::Ltr, LogicalSide::Start) | (Direction::Rtl, LogicalSide::End) => {
            PhysicalSide::Left
        }
        (Direction::Ltr, LogicalSide::End) | (Direction::Rtl, LogicalSide::Start) => {
            PhysicalSide::Right
        }
    }
}

/// Physical text alignment for a logical alignment.
#[must_use]
pub const fn resolve_text_align(direction: Direction, align: LogicalSide) -> TextAlign {
    match resolve_side(direction, align) {
        PhysicalSide::Left => TextAlign::Left,
        PhysicalSide::Right => TextAlign::Right,
    }
}

/// Icon transform for the current direction.
///
/// Under rtl the mirror is appended to `base`; under ltr `base` comes back
/// unchanged. Pass the original transform every time: an already mirrored
/// string gets a second mirror, which cancels the first.
#[must_use]
pub fn resolve_icon_transform(direction: Direction, base: &str) -> String {
    if !direction.is_rtl() {
        return base.to_string();
    }

    let base = base.trim();
    if base.is_empty() || base == "none" {
        MIRROR_TRANSFORM.to_string()
    } else {
        format!("{base} {MIRROR_TRANSFORM}")
    }
}

/// Next index for a navigation key in a list of `item_count` items.
///
/// Vertical lists advance on Down and retreat on Up in both directions.
/// Horizontal lists advance on Right under ltr and on Left under rtl. Home
/// and End jump to the ends. Movement holds at the boundaries instead of
/// wrapping. Returns `None` for keys that do not navigate in `orientation`
/// and for empty lists.
#[must_use]
pub fn resolve_arrow_key(
    direction: Direction,
    key: Key,
    orientation: Orientation,
    current_index: usize,
    item_count: usize,
) -> Option<usize> {
    let last = item_count.checked_sub(1)?;
    let current = current_index.min(last);

    let forward = match (orientation, key) {
        (_, Key::Home) => return Some(0),
        (_, Key::End) => return Some(last),
        (Orientation::Vertical, Key::Down) => true,
        (Orientation::Vertical, Key::Up) => false,
        (Orientation::Horizontal, Key::Right) => !direction.is_rtl(),
        (Orientation::Horizontal, Key::Left) => direction.is_rtl(),
        _ => return None,
    };

    Some(if forward {
        (current + 1).min(last)
    } else {
        current.saturating_sub(1)
    })
}

/// Physical CSS property name for a logical inline property.
#[must_use]
pub const fn resolve_property(direction: Direction, property: LogicalProperty) -> &'static str {
    let side = resolve_side(direction, property.side());
    match (property, side) {
        (
            LogicalProperty::MarginInlineStart | LogicalProperty::MarginInlineEnd,
            PhysicalSide::Left,
        ) => "margin-left",
        (
            LogicalProperty::MarginInlineStart | LogicalProperty::MarginInlineEnd,
            PhysicalSide::Right,
        ) => "margin-right",
        (
            LogicalProperty::PaddingInlineStart | LogicalProperty::PaddingInlineEnd,
            PhysicalSide::Left,
        ) => "padding-left",
        (
            LogicalProperty::PaddingInlineStart | LogicalProperty::PaddingInlineEnd,
            PhysicalSide::Right,
        ) => "padding-right",
        (
            LogicalProperty::BorderInlineStart | LogicalProperty::BorderInlineEnd,
            PhysicalSide::Left,
        ) => "border-left",
        (
            LogicalProperty::BorderInlineStart | LogicalProperty::BorderInlineEnd,
            PhysicalSide::Right,
        ) => "border-right",
        (
            LogicalProperty::InsetInlineStart | LogicalProperty::InsetInlineEnd,
            PhysicalSide::Left,
        ) => "left",
        (
            LogicalProperty::InsetInlineStart | LogicalProperty::InsetInlineEnd,
            PhysicalSide::Right,
        ) => "right",
    }
}

/// Map logically keyed edge values onto physical edges.
pub fn resolve_edges<T>(direction: Direction, edges: LogicalEdges<T>) -> PhysicalEdges<T> {
    let LogicalEdges { start, end } = edges;
    match direction {
        Direction::Ltr => PhysicalEdges {
            left: start,
            right: end,
        },
        Direction::Rtl => PhysicalEdges {
            left: end,
            right: start,
        },
    }
}

/// Left-relative offset of a box positioned `offset` from the start edge.
#[must_use]
pub fn mirror_offset(direction: Direction, offset: f32, width: f32, container_width: f32) -> f32 {
    match direction {
        Direction::Ltr => offset,
        Direction::Rtl => container_width - offset - width,
    }
}

/// Resolver bound to a live [`DirectionState`].
///
/// Every method reads the state at call time, so results track direction
/// changes immediately.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    state: DirectionState,
}

impl Resolver {
    /// Bind to a direction state.
    #[must_use]
    pub fn new(state: DirectionState) -> Self {
        Self { state }
    }

    /// The bound state.
    #[must_use]
    pub const fn state(&self) -> &DirectionState {
        &self.state
    }

    /// Direction as of now.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    /// See [`resolve_side`].
    #[must_use]
    pub fn side(&self, side: LogicalSide) -> PhysicalSide {
        resolve_side(self.direction(), side)
    }

    /// See [`resolve_text_align`].
    #[must_use]
    pub fn text_align(&self, align: LogicalSide) -> TextAlign {
        resolve_text_align(self.direction(), align)
    }

    /// See [`resolve_icon_transform`].
    #[must_use]
    pub fn icon_transform(&self, base: &str) -> String {
        resolve_icon_transform(self.direction(), base)
    }

    /// See [`resolve_arrow_key`].
    #[must_use]
    pub fn arrow_key(
        &self,
        key: Key,
        orientation: Orientation,
        current_index: usize,
        item_count: usize,
    ) -> Option<usize> {
        let next = resolve_arrow_key(self.direction(), key, orientation, current_index, item_count);
        tracing::trace!(?key, ?orientation, current_index, item_count, ?next, "arrow key resolved");
        next
    }

    /// See [`resolve_property`].
    #[must_use]
    pub fn property(&self, property: LogicalProperty) -> &'static str {
        resolve_property(self.direction(), property)
    }

    /// See [`resolve_edges`].
    pub fn edges<T>(&self, edges: LogicalEdges<T>) -> PhysicalEdges<T> {
        resolve_edges(self.direction(), edges)
    }

    /// See [`mirror_offset`].
    #[must_use]
    pub fn offset(&self, offset: f32, width: f32, container_width: f32) -> f32 {
        mirror_offset(self.direction(), offset, width, container_width)
    }
}
