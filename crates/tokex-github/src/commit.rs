//! The atomic commit protocol.
//!
//! Publishes a set of generated files as exactly one commit on a fresh
//! feature branch, built from low-level Git object creations. The steps
//! run strictly in sequence because each step's input is the previous
//! step's output (tree needs blob shas, commit needs the tree sha, ref
//! update needs the commit sha).
//!
//! Atomicity: no branch references any new object until the final ref
//! update succeeds. A failure at any earlier step leaves the feature
//! branch (if it was created) pointed at the base commit; blobs, trees,
//! and commits created before the failure are unreachable garbage the
//! server will garbage-collect.

use chrono::{DateTime, SecondsFormat, Utc};
use tokex_core::CancelToken;

use crate::branch::{BranchName, feature_branch_name};
use crate::error::{Error, Result};
use crate::traits::GitDataApi;
use crate::types::{
    CommitFile, CommitPlan, CreateRef, NewBlob, NewCommit, NewTree, PlannedFile, TreeEntry,
    UpdateRef,
};

/// Candidate base branches tried in order when none are configured.
pub const DEFAULT_BASE_BRANCHES: &[&str] = &["master", "main"];

/// Bound on feature-branch creation attempts under name collisions.
pub const MAX_BRANCH_ATTEMPTS: u32 = 3;

/// Publishes generated files as one atomic commit.
pub struct CommitBuilder<'a, G> {
    api: &'a G,
    owner: String,
    repo: String,
    base_branches: Vec<String>,
}

impl<'a, G: GitDataApi> CommitBuilder<'a, G> {
    /// Create a builder with the default base-branch candidates.
    pub fn new(api: &'a G, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            api,
            owner: owner.into(),
            repo: repo.into(),
            base_branches: DEFAULT_BASE_BRANCHES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Override the candidate base branches (tried in order).
    #[must_use]
    pub fn with_base_branches(mut self, branches: Vec<String>) -> Self {
        if !branches.is_empty() {
            self.base_branches = branches;
        }
        self
    }

    /// Run the whole protocol: resolve base, create the feature ref,
    /// anchor the base tree, upload blobs, create the tree and commit,
    /// then move the feature ref.
    ///
    /// Cancellation is checked before each step, never mid-call.
    ///
    /// # Errors
    /// Any fatal API error aborts the publish; the feature branch, if it
    /// was created, still points at the base commit.
    pub async fn publish(
        &self,
        files: &[CommitFile],
        themes: &[String],
        exported_at: DateTime<Utc>,
        cancel: &CancelToken,
    ) -> Result<CommitPlan> {
        Self::checkpoint(cancel)?;
        let (base_branch, base_commit_sha) = self.resolve_base().await?;
        log::debug!("base branch '{base_branch}' at {base_commit_sha}");

        Self::checkpoint(cancel)?;
        let feature_branch = self
            .create_feature_ref(&base_commit_sha, exported_at)
            .await?;
        log::debug!("feature branch '{feature_branch}' created");

        Self::checkpoint(cancel)?;
        let base_tree_sha = self
            .api
            .get_commit(&self.owner, &self.repo, &base_commit_sha)
            .await?
            .tree
            .sha;

        Self::checkpoint(cancel)?;
        let mut planned = Vec::with_capacity(files.len());
        for file in files {
            let blob = self
                .api
                .create_blob(&self.owner, &self.repo, NewBlob::from_text(&file.content))
                .await?;
            planned.push(PlannedFile {
                path: file.path.clone(),
                blob_sha: blob.sha,
            });
        }

        Self::checkpoint(cancel)?;
        let entries = planned
            .iter()
            .map(|file| TreeEntry::file(file.path.clone(), file.blob_sha.clone()))
            .collect();
        let new_tree = self
            .api
            .create_tree(
                &self.owner,
                &self.repo,
                NewTree {
                    base_tree: base_tree_sha.clone(),
                    tree: entries,
                },
            )
            .await?;

        Self::checkpoint(cancel)?;
        let new_commit = self
            .api
            .create_commit(
                &self.owner,
                &self.repo,
                NewCommit {
                    message: commit_message(themes, exported_at),
                    tree: new_tree.sha.clone(),
                    parents: vec![base_commit_sha.clone()],
                },
            )
            .await?;

        // The single visibility step: everything above is inert until
        // this succeeds.
        Self::checkpoint(cancel)?;
        self.api
            .update_ref(
                &self.owner,
                &self.repo,
                feature_branch.as_str(),
                UpdateRef {
                    sha: new_commit.sha.clone(),
                    force: false,
                },
            )
            .await?;

        Ok(CommitPlan {
            base_branch,
            base_commit_sha,
            base_tree_sha,
            feature_branch: feature_branch.into_inner(),
            files: planned,
            new_tree_sha: new_tree.sha,
            new_commit_sha: new_commit.sha,
        })
    }

    fn checkpoint(cancel: &CancelToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Try candidate base branches in order; the first that resolves wins.
    async fn resolve_base(&self) -> Result<(String, String)> {
        for candidate in &self.base_branches {
            match self.api.get_ref(&self.owner, &self.repo, candidate).await {
                Ok(git_ref) => return Ok((candidate.clone(), git_ref.object.sha)),
                Err(Error::NotFound(_)) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(Error::BaseBranchNotFound {
            candidates: self.base_branches.clone(),
        })
    }

    /// Create the feature ref at the base commit, suffixing the name on
    /// collision, bounded by [`MAX_BRANCH_ATTEMPTS`].
    async fn create_feature_ref(
        &self,
        base_commit_sha: &str,
        exported_at: DateTime<Utc>,
    ) -> Result<BranchName> {
        for attempt in 1..=MAX_BRANCH_ATTEMPTS {
            let name = feature_branch_name(exported_at, attempt)?;
            let create = CreateRef {
                ref_name: format!("refs/heads/{name}"),
                sha: base_commit_sha.to_string(),
            };
            match self.api.create_ref(&self.owner, &self.repo, create).await {
                Ok(_) => return Ok(name),
                Err(Error::Unprocessable { message }) => {
                    log::warn!("branch '{name}' rejected ({message}), retrying with suffix");
                }
                Err(other) => return Err(other),
            }
        }
        Err(Error::BranchCollision {
            attempts: MAX_BRANCH_ATTEMPTS,
        })
    }
}

/// Commit message summarizing every exported theme and the timestamp.
fn commit_message(themes: &[String], exported_at: DateTime<Utc>) -> String {
    format!(
        "Update design tokens: {}\n\nExported at {}",
        themes.join(", "),
        exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
