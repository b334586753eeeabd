//! Trait abstraction for the Git Data API.
//!
//! One method per protocol step, enabling dependency injection and mock
//! implementations in [`CommitBuilder`](crate::CommitBuilder) tests.

use crate::error::Result;
use crate::types::{
    BlobCreated, CommitCreated, CommitInfo, CreateRef, GitRef, NewBlob, NewCommit, NewTree,
    TreeCreated, UpdateRef,
};

/// Low-level Git object operations against one hosted repository.
///
/// All methods take `owner` and `repo` as parameters; implementations
/// hold only transport state.
pub trait GitDataApi: Send + Sync {
    /// Look up a branch ref.
    fn get_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> impl Future<Output = Result<GitRef>> + Send;

    /// Create a new ref.
    fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        create: CreateRef,
    ) -> impl Future<Output = Result<GitRef>> + Send;

    /// Read a commit object (for its tree sha).
    fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> impl Future<Output = Result<CommitInfo>> + Send;

    /// Create a content-addressed blob.
    fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        blob: NewBlob,
    ) -> impl Future<Output = Result<BlobCreated>> + Send;

    /// Create a tree on top of a base tree.
    fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        tree: NewTree,
    ) -> impl Future<Output = Result<TreeCreated>> + Send;

    /// Create a commit object.
    fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        commit: NewCommit,
    ) -> impl Future<Output = Result<CommitCreated>> + Send;

    /// Move a branch ref (non-forcing for the atomic publish).
    fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: UpdateRef,
    ) -> impl Future<Output = Result<GitRef>> + Send;
}
