//! # tokex-export
//!
//! Export orchestration: drives the tokex-core resolution pipeline over
//! the design tool's collections, assembles per-theme stylesheets, and
//! publishes them through the tokex-github commit protocol — one atomic
//! commit on a disposable branch per invocation.
//!
//! Each export is a fresh, self-contained transaction guarded by a
//! single-slot lock: a second export attempt while one is in flight is
//! rejected rather than queued.

mod error;
mod service;

pub use error::{Error, Result};
pub use service::{ExportJob, ExportOutcome, ExportReport, ExportService};
