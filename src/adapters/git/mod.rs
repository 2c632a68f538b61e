//! Git integration adapter
//!
//! Implements the `CommitHistory` port with libgit2. A history is either an
//! existing local repository or a remote one cloned into a temporary
//! directory that lives as long as the adapter.

use std::path::{Path, PathBuf};

use chrono::DateTime;
use git2::{Commit, Delta, ObjectType, Repository, Sort, TreeWalkMode, TreeWalkResult};
use log::{debug, info};
use tempfile::TempDir;
use thiserror::Error;

use crate::core::models::CommitRecord;
use crate::core::ports::CommitHistory;

/// Errors raised while acquiring or walking a git history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Cloning the remote failed
    #[error("failed to clone {url}: {source}")]
    Clone {
        /// Remote URL
        url: String,
        /// libgit2 error
        #[source]
        source: git2::Error,
    },

    /// The local path is not (inside) a git repository
    #[error("failed to open repository at {path}: {source}")]
    Open {
        /// Path that was opened
        path: PathBuf,
        /// libgit2 error
        #[source]
        source: git2::Error,
    },

    /// Could not create the clone directory
    #[error("failed to create clone directory: {0}")]
    TempDir(#[from] std::io::Error),

    /// Reading commits, trees or diffs failed
    #[error("failed to walk history: {0}")]
    Walk(#[from] git2::Error),

    /// Author time cannot be represented
    #[error("commit {hash} has an out-of-range author time ({seconds}s)")]
    InvalidTimestamp {
        /// Commit id
        hash: String,
        /// Seconds since the epoch, as stored
        seconds: i64,
    },
}

/// Git-backed commit history
///
/// Holds the repository location rather than an open handle, so the adapter
/// can be shared across threads; the repository is opened per walk.
#[derive(Debug)]
pub struct GitHistory {
    git_dir: PathBuf,
    source: String,
    _clone_dir: Option<TempDir>,
}

impl GitHistory {
    /// Open a local repository (any path inside its work tree)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|source| HistoryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened repository at {}", repo.path().display());

        Ok(Self {
            git_dir: repo.path().to_path_buf(),
            source: path.display().to_string(),
            _clone_dir: None,
        })
    }

    /// Clone a remote repository into a temporary directory
    pub fn clone_remote(url: &str) -> Result<Self, HistoryError> {
        let dir = TempDir::new()?;
        info!("Cloning {url}");
        let repo = Repository::clone(url, dir.path()).map_err(|source| HistoryError::Clone {
            url: url.to_string(),
            source,
        })?;

        Ok(Self {
            git_dir: repo.path().to_path_buf(),
            source: url.to_string(),
            _clone_dir: Some(dir),
        })
    }

    /// Open `source` if it is an existing local path, clone it otherwise
    pub fn from_source(source: &str) -> Result<Self, HistoryError> {
        if Path::new(source).exists() {
            Self::open(source)
        } else {
            Self::clone_remote(source)
        }
    }

    /// Walk every commit reachable from `HEAD`
    pub fn load(&self) -> Result<Vec<CommitRecord>, HistoryError> {
        let repo = Repository::open(&self.git_dir).map_err(|source| HistoryError::Open {
            path: self.git_dir.clone(),
            source,
        })?;

        let mut walk = repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push_head()?;

        let mut commits = Vec::new();
        for oid in walk {
            let commit = repo.find_commit(oid?)?;
            commits.push(to_record(&repo, &commit)?);
        }

        debug!("Walked {} commit(s) in {}", commits.len(), self.source);
        Ok(commits)
    }
}

impl CommitHistory for GitHistory {
    fn commits(&self) -> anyhow::Result<Vec<CommitRecord>> {
        Ok(self.load()?)
    }

    fn source(&self) -> String {
        self.source.clone()
    }
}

fn to_record(repo: &Repository, commit: &Commit<'_>) -> Result<CommitRecord, HistoryError> {
    let hash = commit.id().to_string();
    let author = commit.author();
    let seconds = author.when().seconds();
    let timestamp = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| HistoryError::InvalidTimestamp {
            hash: hash.clone(),
            seconds,
        })?;

    Ok(CommitRecord {
        files: changed_files(repo, commit)?,
        hash,
        author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
        timestamp,
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
    })
}

/// Paths changed against the first parent; every path for a root commit
fn changed_files(repo: &Repository, commit: &Commit<'_>) -> Result<Vec<String>, HistoryError> {
    let tree = commit.tree()?;
    let mut files = Vec::new();

    if commit.parent_count() == 0 {
        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                files.push(format!("{root}{}", String::from_utf8_lossy(entry.name_bytes())));
            }
            TreeWalkResult::Ok
        })?;
        return Ok(files);
    }

    let parent_tree = commit.parent(0)?.tree()?;
    let mut diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;
    diff.find_similar(None)?;

    for delta in diff.deltas() {
        let old = delta.old_file().path().map(|p| p.to_string_lossy().into_owned());
        let new = delta.new_file().path().map(|p| p.to_string_lossy().into_owned());
        match delta.status() {
            Delta::Added => files.extend(new),
            Delta::Deleted => files.extend(old),
            _ => {
                let renamed = new.filter(|n| old.as_ref() != Some(n));
                files.extend(old);
                files.extend(renamed);
            },
        }
    }

    Ok(files)
}
