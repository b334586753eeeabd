//! Type-directed conversion of literal values to stylesheet text.
//!
//! Conversion never fails: malformed input degrades to a deterministic
//! output plus a [`Diagnostic`].
//!
//! The canonical color syntax is comma-based HSL (`hsl(h, s%, l%)`, or
//! `hsla(h, s%, l%, a)` when the alpha channel is below 1). Exactly one
//! color format is emitted; changing it is a change to this module only.

use crate::diag::{Diagnostic, DiagnosticKind};
use crate::model::Color;

/// Pixels per rem for the default numeric conversion.
const REM_BASE_PX: f64 = 16.0;

/// Name keywords that select percentage output.
const OPACITY_KEYWORDS: &[&str] = &["opacity", "alpha"];

/// Name keywords that select millisecond output.
const DURATION_KEYWORDS: &[&str] = &["duration", "delay", "speed"];

/// Name keywords that select bare-integer stacking output.
const Z_INDEX_KEYWORDS: &[&str] = &["z-index", "zindex", "index"];

/// Convert a pixel quantity to rem text at 16px per rem.
///
/// Sign is ignored: the conversion always uses the absolute value, and
/// the caller is responsible for flagging negative input.
#[must_use]
pub fn px_to_rem(px: f64) -> String {
    format!("{}rem", fmt_decimal(px.abs() / REM_BASE_PX))
}

/// Convert a color to the canonical HSL syntax, clamping out-of-range
/// channels with a warning.
pub fn color_to_css(color: Color, variable: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let r = clamp_channel(color.r, "r", variable, diagnostics);
    let g = clamp_channel(color.g, "g", variable, diagnostics);
    let b = clamp_channel(color.b, "b", variable, diagnostics);
    let a = clamp_channel(color.a, "a", variable, diagnostics);

    let (h, s, l) = rgb_to_hsl(r, g, b);
    let h = h.round();
    let s = (s * 100.0).round();
    let l = (l * 100.0).round();

    if a < 1.0 {
        format!("hsla({h}, {s}%, {l}%, {})", fmt_decimal(a))
    } else {
        format!("hsl({h}, {s}%, {l}%)")
    }
}

/// Convert a numeric value, branching on keyword groups in the variable's
/// lower-cased name. Precedence is fixed: opacity, then weight, then
/// duration, then z-index, then the px-to-rem default.
pub fn number_to_css(variable: &str, value: f64, diagnostics: &mut Vec<Diagnostic>) -> String {
    let lower = variable.to_lowercase();

    if OPACITY_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        let clamped = value.clamp(0.0, 1.0);
        if (clamped - value).abs() > f64::EPSILON {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::OutOfRangeChannel,
                variable,
                format!("opacity {value} clamped to {clamped}"),
            ));
        }
        return format!("{}%", (clamped * 100.0).round());
    }

    if lower.contains("weight") {
        let rounded = value.round();
        if !(100.0..=900.0).contains(&rounded) {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::WeightOutOfRange,
                variable,
                format!("font weight {rounded} is outside 100-900"),
            ));
        }
        return format!("{rounded}");
    }

    if DURATION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        if value < 0.0 {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::NegativeDuration,
                variable,
                format!("negative duration {value} emitted as 0ms"),
            ));
            return "0ms".to_string();
        }
        return format!("{}ms", fmt_decimal(value));
    }

    if Z_INDEX_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return format!("{}", value.round());
    }

    if value < 0.0 {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::NegativeMeasure,
            variable,
            format!("negative value {value}, absolute value used"),
        ));
    }
    px_to_rem(value)
}

/// Trim a text value and flag characters that can break a stylesheet.
/// The result is returned unquoted; quoting is the caller's concern.
pub fn text_to_css(variable: &str, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    let trimmed = raw.trim();
    if trimmed.contains([';', '{', '}']) {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::SuspiciousText,
            variable,
            "value contains stylesheet delimiter characters",
        ));
    }
    trimmed.to_string()
}

fn clamp_channel(
    value: f64,
    channel: &str,
    variable: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> f64 {
    let clamped = value.clamp(0.0, 1.0);
    if (clamped - value).abs() > f64::EPSILON {
        diagnostics.push(Diagnostic::warning(
            DiagnosticKind::OutOfRangeChannel,
            variable,
            format!("channel {channel} = {value} clamped to {clamped}"),
        ));
    }
    clamped
}

/// Convert RGB in `[0, 1]` to (hue degrees, saturation, lightness).
fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if (max - r).abs() < f64::EPSILON {
        ((g - b) / d).rem_euclid(6.0)
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s, l)
}

/// Format a float with up to four decimal places and no trailing zeros.
pub(crate) fn fmt_decimal(value: f64) -> String {
    let mut text = format!("{value:.4}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}
