//! Commit record model
//!
//! A single entry of a repository's history, as handed to the pipeline by
//! whatever adapter walked the history.

use chrono::{DateTime, Utc};

/// A commit as seen by the classification pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Content hash (hex object id)
    pub hash: String,

    /// Author display name
    pub author_name: String,

    /// Author email, used as the identity for ownership
    pub author_email: String,

    /// Author timestamp
    pub timestamp: DateTime<Utc>,

    /// Full commit message, header and body
    pub message: String,

    /// Paths changed relative to the first parent (every path for a root commit).
    /// Rename pairs contribute both sides; no deduplication is applied.
    pub files: Vec<String>,
}

impl CommitRecord {
    /// Create a commit record with no changed files
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            author_name: author_name.into(),
            author_email: author_email.into(),
            timestamp,
            message: message.into(),
            files: Vec::new(),
        }
    }

    /// Attach the changed-file list
    #[must_use]
    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// First line of the message
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Abbreviated hash for display
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}
