//! # tokex-core
//!
//! Core library for tokex: the variable data model, name-based type
//! classification, alias-following value resolution, chunked batch
//! scheduling, and deterministic CSS assembly.
//!
//! The design tool's variable API is abstracted behind the
//! [`VariableSource`] trait so the whole pipeline can run against an
//! in-memory graph in tests.

pub mod assemble;
pub mod cancel;
pub mod classify;
pub mod config;
pub mod convert;
pub mod diag;
pub mod error;
pub mod model;
pub mod resolve;
pub mod schedule;
pub mod source;

pub use assemble::{ThemeDocument, ThemeFile, assemble, property_name, theme_slug};
pub use cancel::CancelToken;
pub use classify::Category;
pub use config::ExportConfig;
pub use convert::px_to_rem;
pub use diag::{Diagnostic, DiagnosticKind, Severity};
pub use error::{Error, Result};
pub use model::{
    Color, Mode, ResolvedEntry, ResolvedType, Scalar, Variable, VariableCollection, VariableValue,
};
pub use resolve::{Resolution, Resolver};
pub use schedule::{
    BatchScheduler, CollectionResolution, Progress, ThemeResolution, Tick, YieldTick,
};
pub use source::{InMemorySource, VariableSource};
// Re-export SecretString for constructing ExportConfig tokens
pub use secrecy::SecretString;
