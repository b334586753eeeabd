//! Git Data API wire types and the commit plan.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// A git reference as returned by the refs endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Fully qualified ref name (e.g. `refs/heads/main`).
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// The object the ref points at.
    pub object: RefObject,
}

/// Target of a reference.
#[derive(Debug, Clone, Deserialize)]
pub struct RefObject {
    pub sha: String,

    /// Object type (`commit` for branch refs).
    #[serde(rename = "type")]
    pub object_type: String,
}

/// Request to create a reference.
#[derive(Debug, Serialize)]
pub struct CreateRef {
    /// Fully qualified ref name to create.
    #[serde(rename = "ref")]
    pub ref_name: String,

    /// Commit sha the new ref points at.
    pub sha: String,
}

/// Request to move a reference. `force` stays `false` for the atomic
/// publish: a non-fast-forward update must fail rather than clobber.
#[derive(Debug, Serialize)]
pub struct UpdateRef {
    pub sha: String,
    pub force: bool,
}

/// A commit object read back from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub tree: TreeRef,
}

/// Reference to a tree by sha.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeRef {
    pub sha: String,
}

/// Request to create a blob.
#[derive(Debug, Serialize)]
pub struct NewBlob {
    /// Base64-encoded file content.
    pub content: String,
    pub encoding: String,
}

impl NewBlob {
    /// Build a base64-encoded blob from text content.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            content: BASE64.encode(text.as_bytes()),
            encoding: "base64".to_string(),
        }
    }
}

/// Response to blob creation.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobCreated {
    pub sha: String,
}

/// One entry of a new tree.
#[derive(Debug, Clone, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,

    #[serde(rename = "type")]
    pub entry_type: String,

    pub sha: String,
}

impl TreeEntry {
    /// A regular-file entry pointing at a blob.
    #[must_use]
    pub fn file(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            entry_type: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// Request to create a tree on top of a base tree.
///
/// Anchoring `base_tree` makes the tree incremental: files not listed in
/// `tree` are carried over from the base unchanged, without re-upload.
#[derive(Debug, Serialize)]
pub struct NewTree {
    pub base_tree: String,
    pub tree: Vec<TreeEntry>,
}

/// Response to tree creation.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeCreated {
    pub sha: String,
}

/// Request to create a commit object.
#[derive(Debug, Serialize)]
pub struct NewCommit {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// Response to commit creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitCreated {
    pub sha: String,
}

/// One generated file to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFile {
    /// Repository-relative path.
    pub path: String,
    pub content: String,
}

/// One file of a completed plan: its path and the blob it became.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub path: String,
    pub blob_sha: String,
}

/// Record of one completed atomic publish.
///
/// A plan only becomes visible to repository consumers once the final
/// ref update succeeds; every sha before that names an inert object.
#[derive(Debug, Clone, Serialize)]
pub struct CommitPlan {
    pub base_branch: String,
    pub base_commit_sha: String,
    pub base_tree_sha: String,
    pub feature_branch: String,
    pub files: Vec<PlannedFile>,
    pub new_tree_sha: String,
    pub new_commit_sha: String,
}
