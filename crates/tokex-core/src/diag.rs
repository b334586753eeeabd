//! Resolution diagnostics.
//!
//! Malformed input never aborts a conversion; it degrades to a
//! deterministic fallback and is reported through one of these.

use std::fmt;

use serde::Serialize;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The value was emitted, possibly adjusted.
    Warning,
    /// The value could not be resolved; a fallback was emitted.
    Error,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A color channel was outside `[0, 1]` and was clamped.
    OutOfRangeChannel,
    /// A duration value was negative and was emitted as `0ms`.
    NegativeDuration,
    /// A measure value was negative; its absolute value was used.
    NegativeMeasure,
    /// A font weight was outside the 100-900 range.
    WeightOutOfRange,
    /// A text value contains characters that can break a stylesheet.
    SuspiciousText,
    /// An alias points at a variable the source does not know.
    UnresolvedAlias,
    /// A variable has no value for the requested mode.
    MissingModeValue,
    /// An alias chain revisited a variable id.
    CycleDetected,
    /// A scheduled variable id could not be fetched at all.
    UnknownVariable,
}

/// A single diagnostic attached to one variable's resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Name of the variable being resolved when this was raised.
    pub variable: String,
    pub message: String,
}

impl Diagnostic {
    /// Create a warning-level diagnostic.
    pub fn warning(kind: DiagnosticKind, variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create an error-level diagnostic.
    pub fn error(kind: DiagnosticKind, variable: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            variable: variable.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variable, self.message)
    }
}
