//! The export service.
//!
//! One invocation: validate settings, resolve every collection in
//! chunks, assemble per-theme stylesheets, publish them as one atomic
//! commit. All state lives in a per-invocation [`ExportJob`]; nothing
//! survives between exports.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use tokex_core::{
    BatchScheduler, CancelToken, Diagnostic, ExportConfig, ThemeDocument, Tick, VariableSource,
    assemble,
};
use tokex_github::{CommitBuilder, CommitFile, CommitPlan, GitDataApi};

use crate::error::{Error, Result};

/// Identity of one export invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ExportJob {
    /// Fresh id per invocation.
    pub id: Uuid,

    /// Single timestamp shared by document headers, the branch slug, and
    /// the commit message.
    pub exported_at: DateTime<Utc>,
}

impl ExportJob {
    fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            exported_at: Utc::now(),
        }
    }
}

/// What a completed export produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub job_id: Uuid,
    pub exported_at: DateTime<Utc>,
    pub branch: String,
    pub commit_sha: String,
    pub plan: CommitPlan,
    pub diagnostics: Vec<Diagnostic>,
}

/// Caller-facing outcome; the host UI owns presentation.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub success: bool,
    pub message: String,
    pub branch: Option<String>,
    pub commit_sha: Option<String>,
}

impl ExportOutcome {
    fn success(report: &ExportReport) -> Self {
        Self {
            success: true,
            message: format!(
                "exported {} file(s) to branch {}",
                report.plan.files.len(),
                report.branch
            ),
            branch: Some(report.branch.clone()),
            commit_sha: Some(report.commit_sha.clone()),
        }
    }

    fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            branch: None,
            commit_sha: None,
        }
    }
}

/// Orchestrates one export at a time over injected source and API
/// implementations.
pub struct ExportService<S, G> {
    source: Arc<S>,
    api: G,
    guard: tokio::sync::Mutex<()>,
}

impl<S, G> ExportService<S, G>
where
    S: VariableSource + 'static,
    G: GitDataApi,
{
    /// Create a service over the given source and API.
    pub fn new(source: Arc<S>, api: G) -> Self {
        Self {
            source,
            api,
            guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one export and fold any failure into a `{success, message}`
    /// outcome for the host UI.
    pub async fn run(
        &self,
        config: &ExportConfig,
        cancel: &CancelToken,
        tick: &impl Tick,
    ) -> ExportOutcome {
        match self.execute(config, cancel, tick).await {
            Ok(report) => ExportOutcome::success(&report),
            Err(err) => {
                log::warn!("export failed: {err}");
                ExportOutcome::failure(err.to_string())
            }
        }
    }

    /// Run one export, returning the full report.
    ///
    /// # Errors
    /// - [`Error::Core`] with a config error before any network call when
    ///   a required setting is empty.
    /// - [`Error::ExportInProgress`] when another export holds the guard.
    /// - [`Error::DeadlineExceeded`] when the overall deadline elapses;
    ///   the remote branch is unchanged in that case.
    /// - Any pipeline or protocol error, with no partial publish.
    pub async fn execute(
        &self,
        config: &ExportConfig,
        cancel: &CancelToken,
        tick: &impl Tick,
    ) -> Result<ExportReport> {
        config.validate()?;

        let Ok(_slot) = self.guard.try_lock() else {
            return Err(Error::ExportInProgress);
        };

        let job = ExportJob::start();
        log::debug!("export job {} started", job.id);

        // Visibility only ever changes at the protocol's final ref
        // update, so cutting the pipeline off at the deadline can never
        // publish partially.
        let report = tokio::time::timeout(
            config.deadline(),
            self.pipeline(config, &job, cancel, tick),
        )
        .await
        .map_err(|_| Error::DeadlineExceeded(config.deadline_secs))??;

        log::debug!(
            "export job {} published {} file(s) on {}",
            job.id,
            report.plan.files.len(),
            report.branch
        );
        Ok(report)
    }

    async fn pipeline(
        &self,
        config: &ExportConfig,
        job: &ExportJob,
        cancel: &CancelToken,
        tick: &impl Tick,
    ) -> Result<ExportReport> {
        let collections = self.source.list_collections().await;
        if collections.is_empty() {
            return Err(Error::NothingToExport);
        }

        let scheduler = BatchScheduler::new(Arc::clone(&self.source));
        let mut resolutions = Vec::with_capacity(collections.len());
        for collection in &collections {
            resolutions.push(
                scheduler
                    .resolve_collection(collection, cancel, tick)
                    .await?,
            );
        }

        let documents = assemble(&resolutions, job.exported_at);
        let files = render_files(&documents, &config.path_prefix);
        if files.is_empty() {
            return Err(Error::NothingToExport);
        }
        let themes: Vec<String> = documents.keys().cloned().collect();

        let builder = CommitBuilder::new(&self.api, config.owner.clone(), config.repo.clone())
            .with_base_branches(config.base_branches.clone());
        let plan = builder
            .publish(&files, &themes, job.exported_at, cancel)
            .await?;

        Ok(ExportReport {
            job_id: job.id,
            exported_at: job.exported_at,
            branch: plan.feature_branch.clone(),
            commit_sha: plan.new_commit_sha.clone(),
            plan,
            diagnostics: resolutions
                .into_iter()
                .flat_map(|resolution| resolution.diagnostics)
                .collect(),
        })
    }
}

/// Map every theme's rendered section files under the path prefix.
fn render_files(documents: &BTreeMap<String, ThemeDocument>, path_prefix: &str) -> Vec<CommitFile> {
    let prefix = path_prefix.trim_matches('/');
    documents
        .values()
        .flat_map(|document| {
            document.render_files().into_iter().map(|file| CommitFile {
                path: format!("{prefix}/{}/{}", document.slug(), file.name),
                content: file.content,
            })
        })
        .collect()
}
