//! Color representation and hex parsing for contrast checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque 8-bit-per-channel sRGB color.
///
/// Serialized as its `#rrggbb` string, so design tokens can carry colors
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    ///
    /// Exactly six hex digits are accepted, with at most one leading `#`.
    /// Shorthand (`#fff`) and alpha (`#ffff`, `#ffffffff`) forms are rejected
    /// with their own error variants rather than being expanded or truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        match digits.len() {
            0 => return Err(ColorParseError::Empty),
            3 => return Err(ColorParseError::Shorthand),
            4 | 8 => return Err(ColorParseError::AlphaChannel),
            6 => {}
            len => return Err(ColorParseError::InvalidLength(len)),
        }

        // `from_str_radix` tolerates a leading `+`, so check the digits first.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex);
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError::InvalidHex)
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert to a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as an `(r, g, b)` tuple.
    #[must_use]
    pub const fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White color
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Nothing to parse
    #[error("empty color string")]
    Empty,
    /// Three-digit shorthand such as `#fff`
    #[error("shorthand hex colors are not supported (expected 6 digits)")]
    Shorthand,
    /// Four- or eight-digit form carrying an alpha channel
    #[error("alpha channel is not supported (expected 6 digits)")]
    AlphaChannel,
    /// Any other digit count
    #[error("invalid hex string length {0} (expected 6)")]
    InvalidLength(usize),
    /// Invalid hex characters
    #[error("invalid hex characters")]
    InvalidHex,
}
