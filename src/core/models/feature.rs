//! Feature and bug models
//!
//! A [`Feature`] is the finalized record for one taxonomy entry: the commits
//! that touched it, its lifetime, who owns it and which commits fixed bugs.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::CommitRecord;

/// Finalized features keyed by name
pub type FeatureSet = BTreeMap<String, Feature>;

/// A software feature and the history attributed to it
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Taxonomy name
    pub name: String,

    /// Earliest matching commit timestamp (`None` when no commit matched)
    pub created_at: Option<DateTime<Utc>>,

    /// Latest matching commit timestamp (`None` when no commit matched)
    pub last_updated: Option<DateTime<Utc>>,

    /// Matching commits, in input order, shared with every other feature they matched
    pub commits: Vec<Arc<CommitRecord>>,

    /// Primary owners: email -> share of commits
    pub owners: BTreeMap<String, f64>,

    /// Backup owners: email -> share of commits
    pub backup_owners: BTreeMap<String, f64>,

    /// Bug-fix commits attributed to this feature
    pub bugs: Vec<Bug>,
}

impl Feature {
    /// An empty feature with no history
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: None,
            last_updated: None,
            commits: Vec::new(),
            owners: BTreeMap::new(),
            backup_owners: BTreeMap::new(),
            bugs: Vec::new(),
        }
    }

    /// Whether no commit was attributed to this feature
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A bug fix recorded against a feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    /// Hash of the fixing commit
    pub commit_hash: String,

    /// Full message of the fixing commit
    pub description: String,

    /// When the fix was authored
    pub fixed_at: DateTime<Utc>,

    /// Files touched by the fix
    pub affected_files: Vec<String>,

    /// Author of the fix
    pub author_email: String,
}

impl From<&CommitRecord> for Bug {
    fn from(commit: &CommitRecord) -> Self {
        Self {
            commit_hash: commit.hash.clone(),
            description: commit.message.clone(),
            fixed_at: commit.timestamp,
            affected_files: commit.files.clone(),
            author_email: commit.author_email.clone(),
        }
    }
}
