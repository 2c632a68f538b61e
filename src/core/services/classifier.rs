//! Feature classifier - decides which features a commit belongs to
//!
//! Classification is multi-label: every taxonomy entry is tested on its own,
//! so one commit can land in several features. For a single feature the
//! checks run cheapest first and stop at the first hit:
//!
//! 1. the conventional scope, when present
//! 2. the conventional description, then body
//! 3. every changed path, normalized to `/` separators

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::ownership::OwnershipAttributor;
use crate::core::models::{Bug, CommitRecord, ConventionalCommit, Feature, FeatureMatcher};

/// Which part of a commit matched a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchSource {
    /// Conventional commit scope
    Scope,
    /// Conventional commit description
    Description,
    /// Conventional commit body
    Body,
    /// A changed file path
    Path,
}

/// Test one commit against one feature
///
/// Returns the check that matched, or `None` when the commit does not belong
/// to the feature.
#[must_use]
pub fn classify(
    feature: &FeatureMatcher,
    commit: &CommitRecord,
    parsed: Option<&ConventionalCommit>,
) -> Option<MatchSource> {
    if let Some(conventional) = parsed {
        if conventional.scope.as_deref().is_some_and(|scope| feature.is_match(scope)) {
            return Some(MatchSource::Scope);
        }
        if feature.is_match(&conventional.description) {
            return Some(MatchSource::Description);
        }
        if feature.is_match(&conventional.body) {
            return Some(MatchSource::Body);
        }
    }

    commit
        .files
        .iter()
        .any(|file| feature.is_match(&normalize_path(file)))
        .then_some(MatchSource::Path)
}

/// Convert platform separators to `/`
fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Accumulating state for one feature while commits are classified
///
/// Owned by a single worker; nothing here is shared between features.
#[derive(Debug, Clone)]
pub struct FeatureAccumulator {
    name: String,
    created_at: Option<DateTime<Utc>>,
    last_updated: Option<DateTime<Utc>>,
    commits: Vec<Arc<CommitRecord>>,
    bugs: Vec<Bug>,
}

impl FeatureAccumulator {
    /// Start accumulating for a feature
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: None,
            last_updated: None,
            commits: Vec::new(),
            bugs: Vec::new(),
        }
    }

    /// Record a matching commit
    pub fn record(&mut self, commit: impl Into<Arc<CommitRecord>>, is_bug_fix: bool) {
        let commit = commit.into();
        let when = commit.timestamp;
        if self.created_at.is_none_or(|created| when < created) {
            self.created_at = Some(when);
        }
        if self.last_updated.is_none_or(|updated| when > updated) {
            self.last_updated = Some(when);
        }

        if is_bug_fix {
            self.bugs.push(Bug::from(commit.as_ref()));
        }

        self.commits.push(commit);
    }

    /// Number of commits recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether no commit has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Finalize the feature, computing ownership from the full commit list
    #[must_use]
    pub fn finish(self, attributor: &OwnershipAttributor) -> Feature {
        let ownership = attributor.attribute(&self.commits);
        Feature {
            name: self.name,
            created_at: self.created_at,
            last_updated: self.last_updated,
            commits: self.commits,
            owners: ownership.owners,
            backup_owners: ownership.backups,
            bugs: self.bugs,
        }
    }
}
