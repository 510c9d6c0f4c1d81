//! Settings supplied by the embedding application.
//!
//! All fields have defaults, so an empty document is a valid configuration:
//!
//! ```toml
//! direction = "rtl"
//!
//! [contrast]
//! normal_text = 4.5
//! large_text = 3.0
//! enhanced = 7.0
//!
//! [announcer]
//! ttl_ms = 1000
//! ```

use crate::announce::{Announcer, DEFAULT_ANNOUNCEMENT_TTL};
use crate::color::Color;
use crate::contrast::{check_contrast, ContrastLevel, ContrastResult, MAX_RATIO};
use crate::direction::{Direction, DirectionState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LodestarConfig {
    /// Direction the session starts in
    pub direction: Direction,
    /// Contrast thresholds
    pub contrast: ContrastConfig,
    /// Live-region settings
    pub announcer: AnnouncerConfig,
}

/// Contrast thresholds, usually sourced from design tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContrastConfig {
    /// Minimum ratio for normal text
    pub normal_text: f64,
    /// Minimum ratio for large or bold text
    pub large_text: f64,
    /// Minimum ratio for enhanced (AAA) checks
    pub enhanced: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            normal_text: ContrastLevel::AaNormal.min_ratio(),
            large_text: ContrastLevel::AaLarge.min_ratio(),
            enhanced: ContrastLevel::AaaNormal.min_ratio(),
        }
    }
}

impl ContrastConfig {
    /// Threshold for normal or large text.
    #[must_use]
    pub const fn min_ratio(&self, large_text: bool) -> f64 {
        if large_text {
            self.large_text
        } else {
            self.normal_text
        }
    }

    /// Check a pair against the configured threshold for its text size.
    #[must_use]
    pub fn check(&self, fg: Color, bg: Color, large_text: bool) -> ContrastResult {
        check_contrast(fg, bg, self.min_ratio(large_text))
    }
}

/// Live-region settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnouncerConfig {
    /// Milliseconds before a live-region node is removed
    pub ttl_ms: u64,
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_ANNOUNCEMENT_TTL.as_millis() as u64,
        }
    }
}

impl AnnouncerConfig {
    /// Time to live as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl LodestarConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// the validation errors of [`LodestarConfig::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(direction = %config.direction, "configuration loaded");
        Ok(config)
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if encoding fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check that thresholds lie in `[1, 21]` and the TTL is non-zero.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            (Threshold::NormalText, self.contrast.normal_text),
            (Threshold::LargeText, self.contrast.large_text),
            (Threshold::Enhanced, self.contrast.enhanced),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || !(1.0..=MAX_RATIO).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        if self.announcer.ttl_ms == 0 {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(())
    }

    /// Fresh direction state starting at the configured direction.
    #[must_use]
    pub fn direction_state(&self) -> DirectionState {
        DirectionState::new(self.direction)
    }

    /// Announcer using the configured time to live.
    #[must_use]
    pub fn build_announcer<N: Clone + PartialEq + fmt::Debug>(&self) -> Announcer<N> {
        Announcer::with_ttl(self.announcer.ttl())
    }
}

/// Which contrast threshold a [`ConfigError::InvalidThreshold`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// `contrast.normal_text`
    NormalText,
    /// `contrast.large_text`
    LargeText,
    /// `contrast.enhanced`
    Enhanced,
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NormalText => "contrast.normal_text",
            Self::LargeText => "contrast.large_text",
            Self::Enhanced => "contrast.enhanced",
        })
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed TOML or unknown keys
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// Encoding failure
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Threshold outside `[1, 21]`
    #[error("{name} must be between 1 and 21, got {value}")]
    InvalidThreshold {
        /// Offending setting
        name: Threshold,
        /// Offending value
        value: f64,
    },
    /// Announcement TTL of zero
    #[error("announcer.ttl_ms must be greater than zero")]
    ZeroTtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LodestarConfig::from_toml_str("").unwrap();
        assert_eq!(config, LodestarConfig::default());
        assert_eq!(config.direction, Direction::Ltr);
        assert_eq!(config.contrast.normal_text, 4.5);
        assert_eq!(config.contrast.large_text, 3.0);
        assert_eq!(config.contrast.enhanced, 7.0);
        assert_eq!(config.announcer.ttl(), Duration::from_secs(1));
    }

    #[test]
    fn test_full_document() {
        let config = LodestarConfig::from_toml_str(
            r#"
            direction = "rtl"

            [contrast]
            normal_text = 7.0
            large_text = 4.5

            [announcer]
            ttl_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.direction, Direction::Rtl);
        assert_eq!(config.contrast.min_ratio(false), 7.0);
        assert_eq!(config.contrast.min_ratio(true), 4.5);
        assert_eq!(config.contrast.enhanced, 7.0);
        assert_eq!(config.announcer.ttl(), Duration::from_millis(2500));
        assert_eq!(config.direction_state().direction(), Direction::Rtl);
        assert_eq!(config.build_announcer::<u32>().ttl(), Duration::from_millis(2500));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let err = LodestarConfig::from_toml_str("[contrast]\nnormal_text = 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold {
                name: Threshold::NormalText,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "contrast.normal_text must be between 1 and 21, got 0.5"
        );

        let err = LodestarConfig::from_toml_str("[contrast]\nenhanced = 22.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold {
                name: Threshold::Enhanced,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let err = LodestarConfig::from_toml_str("[contrast]\nlarge_text = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let err = LodestarConfig::from_toml_str("[announcer]\nttl_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTtl));
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_direction() {
        assert!(matches!(
            LodestarConfig::from_toml_str("colour = 1\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LodestarConfig::from_toml_str("direction = \"auto\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LodestarConfig {
            direction: Direction::Rtl,
            ..LodestarConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(LodestarConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_contrast_config_check() {
        let config = ContrastConfig::default();
        let gray = Color::rgb(0x94, 0x94, 0x94);
        assert!(config.check(gray, Color::WHITE, true).passes);
        assert!(!config.check(gray, Color::WHITE, false).passes);
    }
}
