//! Conventional commit header parsing
//!
//! Recognizes `<type>[(<scope>)][!]: <description>` on the first line of a
//! message, with an optional body and `BREAKING CHANGE:` footer. Anything else
//! is simply not conventional; callers fall back to unstructured matching.

use std::sync::LazyLock;

use regex::Regex;

// Type and scope tokens are ASCII word characters only
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<type>[A-Za-z0-9_]+)",
        r"(?:\((?P<scope>[A-Za-z0-9_-]+)\))?",
        r"(?P<breaking>!)?:\s*(?P<description>.+)",
    ))
    .expect("conventional header regex is valid")
});

const BREAKING_FOOTER: &str = "BREAKING CHANGE:";

/// Structured view of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConventionalCommit {
    /// Type token (`feat`, `fix`, ...)
    pub kind: String,

    /// Scope token, when the header has one
    pub scope: Option<String>,

    /// Remainder of the header after the colon
    pub description: String,

    /// Remaining lines, trimmed, without the breaking-change footer
    pub body: String,

    /// Set by `!` in the header or a `BREAKING CHANGE:` line
    pub breaking: bool,
}

impl ConventionalCommit {
    /// Parse a raw commit message.
    ///
    /// Returns `None` for an empty message or a header that does not follow
    /// the conventional grammar.
    #[must_use]
    pub fn parse(message: &str) -> Option<Self> {
        let mut lines = message.lines();
        let header = lines.next().filter(|line| !line.is_empty())?;
        let caps = HEADER.captures(header)?;

        let mut commit = Self {
            kind: caps["type"].to_string(),
            scope: caps.name("scope").map(|m| m.as_str().to_string()),
            description: caps["description"].to_string(),
            body: String::new(),
            breaking: caps.name("breaking").is_some(),
        };

        let mut body = Vec::new();
        for line in lines {
            if line.starts_with(BREAKING_FOOTER) {
                commit.breaking = true;
                continue;
            }
            body.push(line);
        }
        commit.body = body.join("\n").trim().to_string();

        Some(commit)
    }

    /// Whether the type token marks a fix
    #[must_use]
    pub fn is_fix(&self) -> bool {
        self.kind == "fix"
    }
}
