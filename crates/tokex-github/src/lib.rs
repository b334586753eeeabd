//! # tokex-github
//!
//! GitHub Git Data API integration for tokex: a thin REST client over the
//! low-level object endpoints (blobs, trees, commits, refs) and the
//! [`CommitBuilder`] state machine that publishes a set of generated
//! files as one atomic commit on a disposable branch.
//!
//! # Security
//!
//! Authentication tokens are stored using `SecretString` which
//! automatically zeroizes memory when dropped, reducing credential
//! exposure in memory dumps.

mod branch;
mod client;
mod commit;
mod error;
mod traits;
mod types;

pub use branch::{BranchName, FEATURE_PREFIX, feature_branch_name};
pub use client::GitHubClient;
pub use commit::{CommitBuilder, DEFAULT_BASE_BRANCHES, MAX_BRANCH_ATTEMPTS};
pub use error::{Error, Result};
// Re-export SecretString for constructing clients
pub use secrecy::SecretString;
pub use types::{
    BlobCreated, CommitCreated, CommitFile, CommitInfo, CommitPlan, CreateRef, GitRef, NewBlob,
    NewCommit, NewTree, PlannedFile, RefObject, TreeCreated, TreeEntry, TreeRef, UpdateRef,
};
pub use traits::GitDataApi;
