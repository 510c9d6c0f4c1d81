//! Direction-aware accessibility primitives.
//!
//! This crate provides the decision logic a UI layer calls on every
//! interaction:
//! - Contrast checks: [`relative_luminance`], [`contrast_ratio`],
//!   [`meets_threshold`] over [`Color`]
//! - Writing direction: [`Direction`] and the observable [`DirectionState`]
//! - Logical-to-physical resolution: [`Resolver`] and the `resolve_*`
//!   functions
//! - Focus control: [`FocusController`], [`handle_arrow_keys`],
//!   [`on_activate`], [`on_escape`]
//! - Screen-reader announcements: [`Announcer`]
//!
//! The UI tree is reached only through the [`FocusHost`] and
//! [`LiveRegionHost`] capability traits, so everything here can be tested
//! without a real tree.
//!
//! # Examples
//!
//! ```
//! use lodestar_core::{
//!     meets_threshold_hex, Direction, DirectionState, Key, LogicalSide, Orientation,
//!     PhysicalSide, Resolver,
//! };
//!
//! assert_eq!(meets_threshold_hex("#000000", "#ffffff", 4.5), Ok(true));
//!
//! let state = DirectionState::new(Direction::Rtl);
//! let resolver = Resolver::new(state.clone());
//! assert_eq!(resolver.side(LogicalSide::Start), PhysicalSide::Right);
//! assert_eq!(resolver.arrow_key(Key::Left, Orientation::Horizontal, 2, 5), Some(3));
//!
//! state.set_direction(Direction::Ltr);
//! assert_eq!(resolver.side(LogicalSide::Start), PhysicalSide::Left);
//! ```

mod announce;
mod color;
pub mod config;
mod contrast;
mod direction;
mod error;
mod event;
mod focus;
mod resolver;

pub use announce::{Announcer, LiveRegionHost, Politeness, DEFAULT_ANNOUNCEMENT_TTL};
pub use color::{Color, ColorParseError};
pub use config::{ConfigError, LodestarConfig};
pub use contrast::{
    check_contrast, contrast_ratio, contrast_ratio_hex, meets_threshold, meets_threshold_hex,
    preferred_text_color, relative_luminance, ContrastLevel, ContrastResult, WcagGrade,
    DEFAULT_MIN_RATIO, MAX_RATIO,
};
pub use direction::{Direction, DirectionParseError, DirectionState, Subscription};
pub use error::{Error, Result};
pub use event::{EventDisposition, Key, KeyEvent, Modifiers};
pub use focus::{
    handle_arrow_keys, on_activate, on_escape, Activation, Deactivation, FocusController,
    FocusError, FocusHost, FocusState, TrapSession,
};
pub use resolver::{
    mirror_offset, resolve_arrow_key, resolve_edges, resolve_icon_transform, resolve_property,
    resolve_side, resolve_text_align, LogicalEdges, LogicalProperty, LogicalSide, Orientation,
    PhysicalEdges, PhysicalSide, Resolver, TextAlign, MIRROR_TRANSFORM,
};
