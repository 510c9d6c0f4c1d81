//! WCAG 2.1 luminance and contrast calculations.
//!
//! The engine is threshold-agnostic: callers pass the minimum ratio they
//! need, or pick one of the [`ContrastLevel`] presets.
//!
//! See: <https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio>

use crate::color::{Color, ColorParseError};
use serde::{Deserialize, Serialize};

/// Default minimum ratio for normal-size text (WCAG 1.4.3, level AA).
pub const DEFAULT_MIN_RATIO: f64 = 4.5;

/// Largest ratio two sRGB colors can reach (black on white).
pub const MAX_RATIO: f64 = 21.0;

/// Linear-segment cutoff of the sRGB transfer function as written in WCAG.
const SRGB_LINEAR_CUTOFF: f64 = 0.03928;

/// Relative luminance of an sRGB color per WCAG 2.1.
///
/// Each channel is gamma-expanded before weighting; a plain average of the
/// channels would not match the standard.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Linearize one sRGB channel.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= SRGB_LINEAR_CUTOFF {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Color {
    /// Relative luminance in `[0.0, 1.0]`.
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }

    /// Contrast ratio against another color, in `[1.0, 21.0]`.
    #[must_use]
    pub fn contrast_ratio(&self, other: &Self) -> f64 {
        contrast_ratio(*self, *other)
    }
}

/// Contrast ratio between two colors.
///
/// Returns a value between 1.0 (no contrast) and 21.0 (maximum contrast).
/// The result does not depend on argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let l1 = a.relative_luminance();
    let l2 = b.relative_luminance();

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `fg` on `bg` reaches `min_ratio`.
#[must_use]
pub fn meets_threshold(fg: Color, bg: Color, min_ratio: f64) -> bool {
    contrast_ratio(fg, bg) >= min_ratio
}

/// Compute the ratio and the pass/fail verdict in one go.
#[must_use]
pub fn check_contrast(fg: Color, bg: Color, min_ratio: f64) -> ContrastResult {
    let ratio = contrast_ratio(fg, bg);
    ContrastResult {
        ratio,
        passes: ratio >= min_ratio,
    }
}

/// [`contrast_ratio`] over two hex strings.
///
/// # Errors
///
/// Returns the first [`ColorParseError`] encountered; no fallback color is
/// substituted.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64, ColorParseError> {
    Ok(contrast_ratio(Color::from_hex(a)?, Color::from_hex(b)?))
}

/// [`meets_threshold`] over two hex strings.
///
/// # Errors
///
/// Returns the first [`ColorParseError`] encountered.
pub fn meets_threshold_hex(fg: &str, bg: &str, min_ratio: f64) -> Result<bool, ColorParseError> {
    Ok(meets_threshold(
        Color::from_hex(fg)?,
        Color::from_hex(bg)?,
        min_ratio,
    ))
}

/// Pick black or white text for a background, whichever contrasts more.
///
/// Ties go to black.
#[must_use]
pub fn preferred_text_color(background: Color) -> Color {
    if contrast_ratio(Color::BLACK, background) >= contrast_ratio(Color::WHITE, background) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Result of a contrast check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    /// Calculated contrast ratio
    pub ratio: f64,
    /// Whether the ratio reached the requested threshold
    pub passes: bool,
}

impl ContrastResult {
    /// Grade the ratio against all WCAG levels.
    #[must_use]
    pub fn grade(&self) -> WcagGrade {
        WcagGrade::for_ratio(self.ratio)
    }
}

/// Standard WCAG thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastLevel {
    /// AA, normal text (4.5:1)
    #[default]
    AaNormal,
    /// AA, large or bold text (3:1)
    AaLarge,
    /// AAA, normal text (7:1)
    AaaNormal,
    /// AAA, large or bold text (4.5:1)
    AaaLarge,
}

impl ContrastLevel {
    /// Minimum ratio for this level.
    #[must_use]
    pub const fn min_ratio(self) -> f64 {
        match self {
            Self::AaNormal | Self::AaaLarge => 4.5,
            Self::AaLarge => 3.0,
            Self::AaaNormal => 7.0,
        }
    }

    /// Check a color pair against this level.
    #[must_use]
    pub fn check(self, fg: Color, bg: Color) -> ContrastResult {
        check_contrast(fg, bg, self.min_ratio())
    }
}

/// Highest WCAG level a ratio satisfies for normal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagGrade {
    /// Below 3:1
    Fail,
    /// At least 3:1; only usable for large text
    AaLarge,
    /// At least 4.5:1
    Aa,
    /// At least 7:1
    Aaa,
}

impl WcagGrade {
    /// Classify a contrast ratio.
    #[must_use]
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= ContrastLevel::AaaNormal.min_ratio() {
            Self::Aaa
        } else if ratio >= ContrastLevel::AaNormal.min_ratio() {
            Self::Aa
        } else if ratio >= ContrastLevel::AaLarge.min_ratio() {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    /// Short label such as `"AA"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::AaLarge => "AA large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}
