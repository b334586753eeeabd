//! Data model for design-tool variables, modes, and collections.
//!
//! All of these are read-only inputs fetched fresh per export; nothing
//! here is cached across invocations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// An RGBA color with channel components nominally in `[0, 1]`.
///
/// Out-of-range channels are accepted here and clamped (with a
/// diagnostic) during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha channel; defaults to fully opaque when absent.
    #[serde(default = "default_alpha")]
    pub a: f64,
}

impl Color {
    /// Create an opaque color from its RGB channels.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

const fn default_alpha() -> f64 {
    1.0
}

/// The declared type of a variable, as reported by the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedType {
    Color,
    Number,
    Text,
}

/// A literal variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Color(Color),
    Number(f64),
    Text(String),
}

/// A variable's value for one mode: either a literal or an alias to
/// another variable's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableValue {
    Literal(Scalar),
    /// Reference to another variable's id; carries no value itself.
    Alias(String),
}

/// A named design-tool variable with one value per mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Unique within the owning collection.
    pub id: String,

    /// Display name; unique within the owning collection.
    pub name: String,

    /// Declared value type.
    pub resolved_type: ResolvedType,

    /// Value (literal or alias) per mode id.
    pub values_by_mode: HashMap<String, VariableValue>,
}

impl Variable {
    /// Look up this variable's value for a mode id.
    #[must_use]
    pub fn value_for(&self, mode_id: &str) -> Option<&VariableValue> {
        self.values_by_mode.get(mode_id)
    }
}

/// One named value-set within a collection (a theme/variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,
    pub name: String,
}

/// A collection of variables sharing a set of modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableCollection {
    pub id: String,
    pub name: String,

    /// Variable ids in the collection's display order.
    pub variable_ids: Vec<String>,

    /// Modes in the collection's display order; the first is the default.
    pub modes: Vec<Mode>,
}

impl VariableCollection {
    /// The collection's default mode (its first), if any.
    #[must_use]
    pub fn default_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }
}

/// One resolved stylesheet entry.
///
/// `source_id` is a weak back-reference to the variable this entry came
/// from; it is used only to annotate the design tool's own developer
/// display and never for further computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    /// Output CSS custom property name (e.g. `--color-accent`).
    pub name: String,

    /// Resolved stylesheet-ready value text.
    pub value: String,

    /// Category the entry is grouped under.
    pub category: Category,

    /// Id of the source variable.
    pub source_id: String,
}
