//! Crate-wide error type.

use crate::color::ColorParseError;
use crate::config::ConfigError;
use crate::direction::DirectionParseError;
use crate::focus::FocusError;
use thiserror::Error;

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Any error this crate can report.
///
/// Lifecycle edge cases (an empty focus set, a stale prior-focus element) are
/// outcomes, not errors, and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed color string
    #[error("color parse error: {0}")]
    Color(#[from] ColorParseError),
    /// Malformed direction string
    #[error(transparent)]
    Direction(#[from] DirectionParseError),
    /// Focus trap misuse
    #[error("focus error: {0}")]
    Focus(#[from] FocusError),
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}
