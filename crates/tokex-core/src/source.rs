//! The design-tool variable API boundary.
//!
//! The host tool owns the variable graph; this trait is the only way the
//! pipeline reads it, which keeps the whole export testable against an
//! in-memory graph.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::{Variable, VariableCollection};

/// Trait over the design tool's variable API.
///
/// Fetches are read-only and per-invocation; nothing is cached across
/// exports. `annotate_syntax` exists purely for the host tool's own
/// developer-mode display and has no effect on the committed artifact.
pub trait VariableSource: Send + Sync {
    /// List all variable collections.
    fn list_collections(&self) -> impl Future<Output = Vec<VariableCollection>> + Send;

    /// Fetch one variable by id. `None` when the id is unknown.
    fn get_variable(&self, id: &str) -> impl Future<Output = Option<Variable>> + Send;

    /// Attach a resolved-syntax annotation to a variable in the host
    /// tool's UI. Failures are the implementation's problem; callers
    /// treat this as fire-and-forget.
    fn annotate_syntax(&self, id: &str, value: &str) -> impl Future<Output = ()> + Send;
}

/// In-memory [`VariableSource`] for tests and host-less callers.
#[derive(Debug, Default)]
pub struct InMemorySource {
    collections: Vec<VariableCollection>,
    variables: HashMap<String, Variable>,
    annotations: Mutex<HashMap<String, String>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection.
    #[must_use]
    pub fn with_collection(mut self, collection: VariableCollection) -> Self {
        self.collections.push(collection);
        self
    }

    /// Add a variable, keyed by its id.
    #[must_use]
    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.insert(variable.id.clone(), variable);
        self
    }

    /// Snapshot of the syntax annotations recorded so far.
    #[must_use]
    pub fn annotations(&self) -> HashMap<String, String> {
        self.annotations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl VariableSource for InMemorySource {
    async fn list_collections(&self) -> Vec<VariableCollection> {
        self.collections.clone()
    }

    async fn get_variable(&self, id: &str) -> Option<Variable> {
        self.variables.get(id).cloned()
    }

    async fn annotate_syntax(&self, id: &str, value: &str) {
        self.annotations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(id.to_string(), value.to_string());
    }
}
