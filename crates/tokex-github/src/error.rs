//! Error types for tokex-github.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Git Data API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failed (401).
    #[error("GitHub authentication failed - check that the token is valid and has repo scope")]
    AuthenticationFailed,

    /// Authorization failed (403 without rate-limit exhaustion).
    #[error("permission denied - the token lacks write access to this repository")]
    PermissionDenied,

    /// API rate limit exceeded (403 with exhausted rate-limit budget).
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// Repository, ref, or object not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The API rejected the request as unprocessable (422).
    #[error("GitHub rejected the request: {message}")]
    Unprocessable { message: String },

    /// None of the candidate base branches exist.
    #[error(
        "no base branch found (tried {}) - check that the repository exists and the token can read it",
        .candidates.join(", ")
    )]
    BaseBranchNotFound { candidates: Vec<String> },

    /// Feature-branch creation kept colliding with existing refs.
    #[error("could not create a unique feature branch after {attempts} attempts")]
    BranchCollision { attempts: u32 },

    /// A generated branch name failed validation.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName {
        /// The invalid name.
        name: String,
        /// Why the name is invalid.
        reason: String,
    },

    /// The publish was cancelled between protocol steps.
    #[error("publish cancelled")]
    Cancelled,

    /// Any other API error with status code.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Whether retrying the same request may succeed.
    ///
    /// Server errors, throttling, and transient transport failures are
    /// retryable; everything else is not. Retrying object creation is
    /// safe because blobs, trees, and commits are content-addressed, and
    /// the non-forcing ref update is idempotent toward its target sha.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            Self::Network(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}
