//! Chunked batch scheduling over a collection's variable graph.
//!
//! Resolution is I/O-bound against the design tool's API, so the
//! scheduler fans a fixed-size chunk of variables out together, joins the
//! whole chunk, then ticks once before starting the next chunk. The tick
//! is an explicit suspension point: the default implementation yields to
//! the runtime so a host UI thread stays responsive, and tests substitute
//! recording ticks. Cancellation is checked at chunk boundaries only.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::assemble::property_name;
use crate::cancel::CancelToken;
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::error::{Error, Result};
use crate::model::{Mode, ResolvedEntry, Variable, VariableCollection};
use crate::resolve::{Resolution, Resolver};
use crate::source::VariableSource;

/// Number of variables resolved together per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Monotonic progress counter emitted after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

/// The scheduler-tick interface: one call per completed chunk.
///
/// Implementations decide what a suspension point means — yielding to the
/// current runtime, posting to a UI thread, or recording for a test.
pub trait Tick: Send + Sync {
    fn tick(&self, progress: Progress) -> impl Future<Output = ()> + Send;
}

/// Default tick: report nothing, yield to the runtime once.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldTick;

impl Tick for YieldTick {
    async fn tick(&self, _progress: Progress) {
        tokio::task::yield_now().await;
    }
}

/// Entries for one mode of one collection, in collection order.
#[derive(Debug, Clone)]
pub struct ThemeResolution {
    pub mode: Mode,
    pub entries: Vec<ResolvedEntry>,
}

/// Everything a collection resolved to: one entry list per mode, plus all
/// diagnostics raised along the way.
#[derive(Debug, Clone, Default)]
pub struct CollectionResolution {
    pub themes: Vec<ThemeResolution>,
    pub diagnostics: Vec<Diagnostic>,
}

struct VariableOutcome {
    variable: Variable,
    per_mode: Vec<Resolution>,
}

/// Drives resolution over a collection in bounded chunks.
pub struct BatchScheduler<S> {
    source: Arc<S>,
    chunk_size: usize,
}

impl<S: VariableSource + 'static> BatchScheduler<S> {
    /// Create a scheduler with the default chunk size.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk size (clamped to at least 1).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Resolve every variable of `collection` for every mode.
    ///
    /// All resolutions within a chunk start together and are joined
    /// before the next chunk begins; results are re-ordered to the
    /// collection's variable order so output is deterministic. After each
    /// chunk the `tick` runs once with updated progress.
    ///
    /// # Errors
    /// Returns [`Error::Cancelled`] when the token was cancelled at a
    /// chunk boundary, or [`Error::Join`] if a resolution task dies.
    pub async fn resolve_collection<T: Tick>(
        &self,
        collection: &VariableCollection,
        cancel: &CancelToken,
        tick: &T,
    ) -> Result<CollectionResolution> {
        let mut resolution = CollectionResolution {
            themes: collection
                .modes
                .iter()
                .map(|mode| ThemeResolution {
                    mode: mode.clone(),
                    entries: Vec::new(),
                })
                .collect(),
            diagnostics: Vec::new(),
        };

        if collection.modes.is_empty() {
            log::debug!("collection '{}' has no modes, nothing to resolve", collection.name);
            return Ok(resolution);
        }

        let total = collection.variable_ids.len();
        let mut processed = 0;

        for chunk in collection.variable_ids.chunks(self.chunk_size) {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let mut tasks: JoinSet<(usize, Option<VariableOutcome>)> = JoinSet::new();
            for (offset, variable_id) in chunk.iter().enumerate() {
                let source = Arc::clone(&self.source);
                let variable_id = variable_id.clone();
                let modes = collection.modes.clone();
                tasks.spawn(async move {
                    let Some(variable) = source.get_variable(&variable_id).await else {
                        return (offset, None);
                    };
                    let resolver = Resolver::new(source.as_ref());
                    let mut per_mode = Vec::with_capacity(modes.len());
                    for mode in &modes {
                        per_mode.push(resolver.resolve(&variable, &mode.id).await);
                    }
                    // The host tool shows one syntax string per variable;
                    // use the default (first) mode's value for it.
                    if let Some(first) = per_mode.first() {
                        source.annotate_syntax(&variable.id, &first.value).await;
                    }
                    (offset, Some(VariableOutcome { variable, per_mode }))
                });
            }

            // Join the whole chunk, then restore input order.
            let mut slots: Vec<Option<Option<VariableOutcome>>> =
                (0..chunk.len()).map(|_| None).collect();
            while let Some(joined) = tasks.join_next().await {
                let (offset, outcome) = joined?;
                slots[offset] = Some(outcome);
            }

            for (offset, slot) in slots.into_iter().enumerate() {
                match slot.flatten() {
                    Some(outcome) => {
                        for (theme, resolved) in
                            resolution.themes.iter_mut().zip(&outcome.per_mode)
                        {
                            resolution
                                .diagnostics
                                .extend(resolved.diagnostics.iter().cloned());
                            theme.entries.push(ResolvedEntry {
                                name: property_name(resolved.category, &outcome.variable.name),
                                value: resolved.value.clone(),
                                category: resolved.category,
                                source_id: outcome.variable.id.clone(),
                            });
                        }
                    }
                    None => resolution.diagnostics.push(Diagnostic::error(
                        DiagnosticKind::UnknownVariable,
                        chunk[offset].clone(),
                        format!("variable '{}' could not be fetched", chunk[offset]),
                    )),
                }
            }

            processed += chunk.len();
            tick.tick(Progress { processed, total }).await;
        }

        Ok(resolution)
    }
}
