//! Name-based type classification.
//!
//! Variables carry no explicit category; the category is derived from the
//! variable's name with a fixed keyword precedence. The precedence order
//! is load-bearing: a name matching several keyword sets must always
//! resolve the same way.

use serde::{Deserialize, Serialize};

/// Keywords that mark a variable as typographic.
const FONT_KEYWORDS: &[&str] = &["font", "typography", "letter", "leading", "tracking"];

/// Keywords that mark a variable as a shadow/elevation token.
const SHADOW_KEYWORDS: &[&str] = &["shadow", "elevation"];

/// Keywords that mark a variable as a gradient token.
const GRADIENT_KEYWORDS: &[&str] = &["gradient"];

/// Output category a resolved entry is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Color,
    Font,
    Shadow,
    Gradient,
    Measure,
}

impl Category {
    /// All categories in their fixed output order. Sections and files are
    /// always emitted in this order, never alphabetically.
    pub const ALL: [Self; 5] = [
        Self::Color,
        Self::Font,
        Self::Shadow,
        Self::Gradient,
        Self::Measure,
    ];

    /// Classify a variable name.
    ///
    /// Case-insensitive substring matching with fixed precedence:
    /// an explicit `color` substring wins; then font keywords, shadow
    /// keywords, gradient keywords; anything else is a measure.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("color") {
            return Self::Color;
        }
        if FONT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Self::Font;
        }
        if SHADOW_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Self::Shadow;
        }
        if GRADIENT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Self::Gradient;
        }
        Self::Measure
    }

    /// Singular prefix used in output property and file names.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Font => "font",
            Self::Shadow => "shadow",
            Self::Gradient => "gradient",
            Self::Measure => "measure",
        }
    }

    /// Fixed fallback value emitted when a value cannot be resolved.
    #[must_use]
    pub const fn fallback(&self) -> &'static str {
        match self {
            Self::Color => "hsl(0, 0%, 0%)",
            Self::Font | Self::Measure => "0",
            Self::Shadow | Self::Gradient => "none",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_substring_wins() {
        assert_eq!(Category::classify("borderColor"), Category::Color);
        assert_eq!(Category::classify("color/primary/500"), Category::Color);
        // "color" beats the font keyword set even when both match
        assert_eq!(Category::classify("fontColor"), Category::Color);
    }

    #[test]
    fn test_font_keywords() {
        assert_eq!(Category::classify("fontWeightBold"), Category::Font);
        assert_eq!(Category::classify("letterSpacingWide"), Category::Font);
        assert_eq!(Category::classify("typographyScale"), Category::Font);
        assert_eq!(Category::classify("leading-tight"), Category::Font);
    }

    #[test]
    fn test_shadow_and_gradient_keywords() {
        assert_eq!(Category::classify("shadowCard"), Category::Shadow);
        assert_eq!(Category::classify("elevation-2"), Category::Shadow);
        assert_eq!(Category::classify("heroGradient"), Category::Gradient);
        // shadow precedes gradient when both match
        assert_eq!(Category::classify("shadowGradient"), Category::Shadow);
    }

    #[test]
    fn test_default_is_measure() {
        assert_eq!(Category::classify("spacing-md"), Category::Measure);
        assert_eq!(Category::classify("radius-lg"), Category::Measure);
        assert_eq!(Category::classify("opacityHover"), Category::Measure);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(Category::classify("BORDERCOLOR"), Category::Color);
        assert_eq!(Category::classify("FontWeight"), Category::Font);
    }

    #[test]
    fn test_fixed_section_order() {
        assert_eq!(
            Category::ALL,
            [
                Category::Color,
                Category::Font,
                Category::Shadow,
                Category::Gradient,
                Category::Measure,
            ]
        );
    }
}
