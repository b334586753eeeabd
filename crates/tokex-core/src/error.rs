//! Error types for tokex-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tokex-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required export setting is missing or empty.
    #[error("missing required setting: {field}")]
    Config {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The export was cancelled between chunks.
    #[error("export cancelled")]
    Cancelled,

    /// A resolution task panicked or was aborted.
    #[error("resolution task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
