//! Export configuration.
//!
//! All four required values (owner, repo, path prefix, token) are owned
//! by the host settings UI and arrive here as opaque values. The core
//! only checks that none of them is empty before any network call; it
//! never persists them.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Configuration for one export invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Directory prefix the generated files are committed under.
    pub path_prefix: String,

    /// API token with repository-write scope. Redacted in `Debug` output.
    pub token: SecretString,

    /// Candidate base branches, tried in order.
    #[serde(default = "default_base_branches")]
    pub base_branches: Vec<String>,

    /// Overall deadline for one export, in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

impl ExportConfig {
    /// Check that every required setting is present.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(Error::Config { field: "owner" });
        }
        if self.repo.trim().is_empty() {
            return Err(Error::Config { field: "repo" });
        }
        if self.path_prefix.trim().is_empty() {
            return Err(Error::Config { field: "path_prefix" });
        }
        if self.token.expose_secret().trim().is_empty() {
            return Err(Error::Config { field: "token" });
        }
        Ok(())
    }

    /// The export deadline as a [`Duration`].
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

fn default_base_branches() -> Vec<String> {
    vec!["master".into(), "main".into()]
}

const fn default_deadline_secs() -> u64 {
    120
}
