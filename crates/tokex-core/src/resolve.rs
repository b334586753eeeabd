//! Variable graph resolution.
//!
//! Turns one variable's raw value for one mode into stylesheet-ready
//! text, following alias references through the source. Resolution never
//! fails: malformed graphs degrade to the category fallback plus
//! diagnostics, and an alias chain that revisits an id is reported as a
//! cycle instead of looping.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::classify::Category;
use crate::convert;
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::model::{Scalar, Variable, VariableValue};
use crate::source::VariableSource;

/// Outcome of resolving one variable for one mode.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Stylesheet-ready value text.
    pub value: String,

    /// Category derived from the originating variable's name.
    pub category: Category,

    /// Everything that went wrong (or was adjusted) along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves variables against a [`VariableSource`].
pub struct Resolver<'a, S> {
    source: &'a S,
}

impl<'a, S: VariableSource> Resolver<'a, S> {
    /// Create a resolver borrowing the given source.
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve `variable` for `mode_id`.
    ///
    /// Aliases are followed with the same mode id, carrying a visited-id
    /// set. The category (and therefore the fallback) comes from the
    /// originating variable's name; numeric keyword branching uses the
    /// name of the variable that holds the literal, so aliasing does not
    /// change the resolved text.
    pub async fn resolve(&self, variable: &Variable, mode_id: &str) -> Resolution {
        let category = Category::classify(&variable.name);
        let mut diagnostics = Vec::new();

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(variable.id.clone());
        let mut current: Cow<'_, Variable> = Cow::Borrowed(variable);

        loop {
            let Some(value) = current.value_for(mode_id).cloned() else {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::MissingModeValue,
                    &variable.name,
                    format!("'{}' has no value for mode '{mode_id}'", current.name),
                ));
                return Self::fallback(category, diagnostics);
            };

            match value {
                VariableValue::Literal(scalar) => {
                    let text = convert_scalar(&current.name, &scalar, &mut diagnostics);
                    return Resolution {
                        value: text,
                        category,
                        diagnostics,
                    };
                }
                VariableValue::Alias(target_id) => {
                    if !visited.insert(target_id.clone()) {
                        log::warn!(
                            "alias cycle at '{target_id}' while resolving '{}'",
                            variable.name
                        );
                        diagnostics.push(Diagnostic::error(
                            DiagnosticKind::CycleDetected,
                            &variable.name,
                            format!("alias chain revisits '{target_id}'"),
                        ));
                        return Self::fallback(category, diagnostics);
                    }
                    match self.source.get_variable(&target_id).await {
                        Some(target) => current = Cow::Owned(target),
                        None => {
                            diagnostics.push(Diagnostic::error(
                                DiagnosticKind::UnresolvedAlias,
                                &variable.name,
                                format!("alias target '{target_id}' not found"),
                            ));
                            return Self::fallback(category, diagnostics);
                        }
                    }
                }
            }
        }
    }

    fn fallback(category: Category, diagnostics: Vec<Diagnostic>) -> Resolution {
        Resolution {
            value: category.fallback().to_string(),
            category,
            diagnostics,
        }
    }
}

fn convert_scalar(name: &str, scalar: &Scalar, diagnostics: &mut Vec<Diagnostic>) -> String {
    match scalar {
        Scalar::Color(color) => convert::color_to_css(*color, name, diagnostics),
        Scalar::Number(value) => convert::number_to_css(name, *value, diagnostics),
        Scalar::Text(text) => convert::text_to_css(name, text, diagnostics),
    }
}
