//! Palette contrast audits.
//!
//! A palette is a list of named foreground/background pairs, usually kept
//! next to the design tokens as TOML:
//!
//! ```toml
//! [[pair]]
//! name = "body"
//! foreground = "#212121"
//! background = "#ffffff"
//!
//! [[pair]]
//! name = "banner"
//! foreground = "#949494"
//! background = "#ffffff"
//! large_text = true
//! ```

use lodestar_core::config::ContrastConfig;
use lodestar_core::{Color, WcagGrade};
use serde::{Deserialize, Serialize};

/// One foreground/background combination used by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    /// Token or component name
    pub name: String,
    /// Text color
    pub foreground: Color,
    /// Surface color
    pub background: Color,
    /// Whether the pair is only used for large or bold text
    #[serde(default)]
    pub large_text: bool,
}

/// Collection of pairs to audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Pairs in declaration order
    #[serde(rename = "pair", default)]
    pub pairs: Vec<ColorPair>,
}

impl Palette {
    /// Empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a palette from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, PaletteError> {
        Ok(toml::from_str(source)?)
    }

    /// Add a normal-text pair.
    #[must_use]
    pub fn pair(mut self, name: impl Into<String>, foreground: Color, background: Color) -> Self {
        self.pairs.push(ColorPair {
            name: name.into(),
            foreground,
            background,
            large_text: false,
        });
        self
    }

    /// Add a large-text pair.
    #[must_use]
    pub fn large_pair(
        mut self,
        name: impl Into<String>,
        foreground: Color,
        background: Color,
    ) -> Self {
        self.pairs.push(ColorPair {
            name: name.into(),
            foreground,
            background,
            large_text: true,
        });
        self
    }
}

/// Palette loading errors.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// Malformed TOML or an invalid color
    #[error("invalid palette: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Contrast auditor.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastAudit {
    thresholds: ContrastConfig,
    criterion: &'static str,
}

impl Default for ContrastAudit {
    fn default() -> Self {
        Self::new()
    }
}

impl ContrastAudit {
    /// AA thresholds: 4.5 for normal text, 3.0 for large text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            thresholds: ContrastConfig::default(),
            criterion: "1.4.3",
        }
    }

    /// AAA thresholds: 7.0 for normal text, 4.5 for large text.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            thresholds: ContrastConfig {
                normal_text: 7.0,
                large_text: 4.5,
                ..ContrastConfig::default()
            },
            criterion: "1.4.6",
        }
    }

    /// Thresholds taken from application configuration.
    #[must_use]
    pub fn with_thresholds(thresholds: ContrastConfig) -> Self {
        let criterion = if thresholds.normal_text >= thresholds.enhanced {
            "1.4.6"
        } else {
            "1.4.3"
        };
        Self {
            thresholds,
            criterion,
        }
    }

    /// Audit every pair in `palette`.
    #[must_use]
    pub fn check(&self, palette: &Palette) -> AuditReport {
        let violations: Vec<Violation> = palette
            .pairs
            .iter()
            .filter_map(|pair| self.check_pair(pair))
            .collect();
        tracing::debug!(
            pairs = palette.pairs.len(),
            violations = violations.len(),
            "contrast audit finished"
        );
        AuditReport { violations }
    }

    /// Audit one pair, returning its violation if it fails.
    #[must_use]
    pub fn check_pair(&self, pair: &ColorPair) -> Option<Violation> {
        let required = self.thresholds.min_ratio(pair.large_text);
        let result = self
            .thresholds
            .check(pair.foreground, pair.background, pair.large_text);
        if result.passes {
            return None;
        }

        let impact = match result.grade() {
            WcagGrade::Fail => Impact::Critical,
            WcagGrade::AaLarge => Impact::Serious,
            WcagGrade::Aa | WcagGrade::Aaa => Impact::Moderate,
        };
        Some(Violation {
            pair: pair.name.clone(),
            message: format!(
                "{} on {} has contrast {:.2}:1 (minimum {required}:1)",
                pair.foreground, pair.background, result.ratio
            ),
            ratio: result.ratio,
            required,
            wcag: self.criterion,
            impact,
        })
    }
}

/// Audit outcome.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    /// Failing pairs
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// No pair failed.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations that fail even the large-text minimum.
    #[must_use]
    pub fn critical(&self) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.impact == Impact::Critical)
            .collect()
    }

    /// Violation for the pair called `name`.
    #[must_use]
    pub fn for_pair(&self, name: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.pair == name)
    }

    /// Assert that every pair passed.
    ///
    /// # Panics
    ///
    /// Panics with one line per violation.
    pub fn assert_pass(&self) {
        if self.is_passing() {
            return;
        }
        let lines: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("  [{:?}] {}: {} (WCAG {})", v.impact, v.pair, v.message, v.wcag))
            .collect();
        panic!(
            "Contrast audit failed with {} violation(s):\n{}",
            self.violations.len(),
            lines.join("\n")
        );
    }
}

/// A failing pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Pair name
    pub pair: String,
    /// Human-readable message
    pub message: String,
    /// Measured ratio
    pub ratio: f64,
    /// Ratio the pair needed
    pub required: f64,
    /// WCAG success criterion
    pub wcag: &'static str,
    /// Severity
    pub impact: Impact,
}

/// Severity of a violation, from what the pair still achieves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Impact {
    /// Fails only a stricter-than-AA threshold
    Moderate,
    /// Good enough for large text only
    Serious,
    /// Below 3:1, unreadable for many users
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn test_black_on_white_passes() {
        let palette = Palette::new().pair("body", Color::BLACK, Color::WHITE);
        let report = ContrastAudit::new().check(&palette);
        assert!(report.is_passing());
        report.assert_pass();
    }

    #[test]
    fn test_large_text_uses_lower_threshold() {
        let gray = hex("#949494");
        let palette = Palette::new()
            .large_pair("banner", gray, Color::WHITE)
            .pair("caption", gray, Color::WHITE);
        let report = ContrastAudit::new().check(&palette);

        assert_eq!(report.violations.len(), 1);
        let v = report.for_pair("caption").unwrap();
        assert_eq!(v.impact, Impact::Serious);
        assert_eq!(v.required, 4.5);
        assert_eq!(v.wcag, "1.4.3");
    }

    #[test]
    fn test_critical_violation() {
        let palette = Palette::new().pair("ghost", hex("#777777"), hex("#808080"));
        let report = ContrastAudit::new().check(&palette);
        assert_eq!(report.critical().len(), 1);
        assert!(report.violations[0].message.contains("1.13:1"));
    }

    #[test]
    fn test_strict_audit() {
        // #767676 passes AA (4.54:1) but not AAA.
        let palette = Palette::new().pair("muted", hex("#767676"), Color::WHITE);
        assert!(ContrastAudit::new().check(&palette).is_passing());

        let report = ContrastAudit::strict().check(&palette);
        let v = report.for_pair("muted").unwrap();
        assert_eq!(v.impact, Impact::Moderate);
        assert_eq!(v.wcag, "1.4.6");
        assert_eq!(v.required, 7.0);
    }

    #[test]
    fn test_with_thresholds() {
        let audit = ContrastAudit::with_thresholds(ContrastConfig {
            normal_text: 7.0,
            ..ContrastConfig::default()
        });
        let expected = ContrastAudit {
            thresholds: ContrastConfig {
                normal_text: 7.0,
                ..ContrastConfig::default()
            },
            criterion: "1.4.6",
        };
        assert_eq!(audit, expected);
        assert_eq!(
            ContrastAudit::with_thresholds(ContrastConfig::default()),
            ContrastAudit::new()
        );
    }

    #[test]
    fn test_palette_from_toml() {
        let palette = Palette::from_toml_str(
            r##"
            [[pair]]
            name = "body"
            foreground = "#212121"
            background = "#ffffff"

            [[pair]]
            name = "banner"
            foreground = "949494"
            background = "#FFFFFF"
            large_text = true
            "##,
        )
        .unwrap();

        assert_eq!(palette.pairs.len(), 2);
        assert!(!palette.pairs[0].large_text);
        assert!(palette.pairs[1].large_text);
        assert_eq!(palette.pairs[1].background, Color::WHITE);
        ContrastAudit::new().check(&palette).assert_pass();
    }

    #[test]
    fn test_palette_rejects_bad_color() {
        let err = Palette::from_toml_str(
            "[[pair]]\nname = \"x\"\nforeground = \"#fff\"\nbackground = \"#000000\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid palette:"));
        assert!(matches!(err, PaletteError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_empty_palette_passes() {
        assert!(ContrastAudit::new().check(&Palette::from_toml_str("").unwrap()).is_passing());
    }

    #[test]
    #[should_panic(expected = "Contrast audit failed with 1 violation(s)")]
    fn test_assert_pass_panics() {
        let palette = Palette::new().pair("ghost", hex("#777777"), hex("#808080"));
        ContrastAudit::new().check(&palette).assert_pass();
    }
}
