//! Error types for tokex-export.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort an export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The single-slot guard is held by another export.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// The overall deadline elapsed; nothing was published.
    #[error("export deadline exceeded after {0} seconds - nothing was published")]
    DeadlineExceeded(u64),

    /// The source produced no collections or no resolvable entries.
    #[error("nothing to export - the design tool returned no variable collections")]
    NothingToExport,

    /// Resolution pipeline error.
    #[error(transparent)]
    Core(#[from] tokex_core::Error),

    /// Commit protocol error.
    #[error(transparent)]
    GitHub(#[from] tokex_github::Error),
}
