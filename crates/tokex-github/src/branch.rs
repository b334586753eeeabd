//! Branch name validation and feature-branch naming.
//!
//! Provides a [`BranchName`] type that enforces git branch name rules,
//! and the timestamped naming scheme for disposable export branches.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::error::Error;

/// Fixed prefix for disposable export branches.
pub const FEATURE_PREFIX: &str = "design-tokens/";

/// Offset of the civil timezone the branch timestamp slug is rendered
/// in (UTC-05:00). Deliberately not the host timezone: the same instant
/// yields the same branch name on every machine.
const SLUG_UTC_OFFSET_HOURS: i64 = -5;

/// A validated git branch name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBranchName`] if the name violates git's
    /// branch naming rules.
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        validate_branch_name(&name)?;
        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the `BranchName` and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive the feature-branch name for an export started at `at`.
///
/// The slug is `YYYYMMDD-HHMM` in the fixed civil timezone; `attempt`
/// values above 1 append a numeric suffix for collision retries.
///
/// # Errors
/// Returns [`Error::InvalidBranchName`] if the assembled name fails
/// validation (it cannot, for any real timestamp).
pub fn feature_branch_name(at: DateTime<Utc>, attempt: u32) -> Result<BranchName, Error> {
    let civil = at + Duration::hours(SLUG_UTC_OFFSET_HOURS);
    let mut name = format!("{FEATURE_PREFIX}{}", civil.format("%Y%m%d-%H%M"));
    if attempt > 1 {
        name.push_str(&format!("-{attempt}"));
    }
    BranchName::new(name)
}

/// Validate a branch name against git's rules.
fn validate_branch_name(name: &str) -> Result<(), Error> {
    let invalid = |reason: &str| Error::InvalidBranchName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("branch name cannot be empty"));
    }
    if name == "@" {
        return Err(invalid("branch name cannot be '@'"));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid("branch name cannot start or end with '.'"));
    }
    if name.ends_with(".lock") {
        return Err(invalid("branch name cannot end with '.lock'"));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid("branch name cannot start or end with '/'"));
    }
    if name.contains("..") {
        return Err(invalid("branch name cannot contain '..'"));
    }
    if name.contains("//") {
        return Err(invalid("branch name cannot contain '//'"));
    }
    if name.contains("@{") {
        return Err(invalid("branch name cannot contain '@{'"));
    }

    for c in name.chars() {
        if c.is_ascii_control() {
            return Err(invalid("branch name cannot contain control characters"));
        }
        if matches!(c, ' ' | '~' | '^' | ':' | '?' | '*' | '[' | '\\') {
            return Err(invalid("branch name cannot contain git-forbidden characters"));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_valid_branch_names() {
        assert!(BranchName::new("main").is_ok());
        assert!(BranchName::new("design-tokens/20250314-0430").is_ok());
        assert!(BranchName::new("feature/auth").is_ok());
    }

    #[test]
    fn test_invalid_branch_names() {
        for bad in [
            "",
            "@",
            ".hidden",
            "branch.",
            "branch.lock",
            "/branch",
            "branch/",
            "a..b",
            "a//b",
            "a@{1}",
            "has space",
            "has:colon",
            "has*glob",
        ] {
            assert!(
                matches!(BranchName::new(bad), Err(Error::InvalidBranchName { .. })),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn test_slug_uses_fixed_civil_timezone() {
        // 03:04 UTC is 22:04 the previous day at UTC-05:00.
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap();
        let name = feature_branch_name(at, 1).unwrap();
        assert_eq!(name.as_str(), "design-tokens/20250101-2204");
    }

    #[test]
    fn test_attempt_suffix() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        assert_eq!(
            feature_branch_name(at, 1).unwrap().as_str(),
            "design-tokens/20250314-0430"
        );
        assert_eq!(
            feature_branch_name(at, 2).unwrap().as_str(),
            "design-tokens/20250314-0430-2"
        );
        assert_eq!(
            feature_branch_name(at, 3).unwrap().as_str(),
            "design-tokens/20250314-0430-3"
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let name = BranchName::new("design-tokens/20250314-0430").unwrap();
        assert_eq!(format!("{name}"), "design-tokens/20250314-0430");
        assert_eq!(name.clone().into_inner(), name.as_str());
    }
}
