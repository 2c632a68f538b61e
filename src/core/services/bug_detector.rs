//! Bug-fix heuristic
//!
//! A commit fixes a bug when its conventional type is `fix`, or when its
//! message mentions one of a handful of keywords.

use crate::core::models::ConventionalCommit;

const BUG_KEYWORDS: &[&str] = &["fix", "bug", "issue", "resolve", "patch"];

/// Decide whether a commit is a bug fix
#[must_use]
pub fn is_bug_fix(message: &str, parsed: Option<&ConventionalCommit>) -> bool {
    if parsed.is_some_and(ConventionalCommit::is_fix) {
        return true;
    }

    let message = message.to_lowercase();
    BUG_KEYWORDS.iter().any(|keyword| message.contains(keyword))
}
