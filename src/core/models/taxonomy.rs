//! Feature taxonomy
//!
//! A taxonomy maps feature names to case-insensitive regex patterns. Patterns
//! are compiled once, when the taxonomy is built; a pattern that fails to
//! compile is a configuration error and the taxonomy is never created.
//!
//! # Examples
//!
//! ```
//! use featmap::core::models::Taxonomy;
//!
//! let taxonomy = Taxonomy::new([("Payments", vec!["billing", "invoice"])]).unwrap();
//! let payments = taxonomy.get("Payments").unwrap();
//! assert!(payments.is_match("src/Billing/mod.rs"));
//! ```

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Built-in feature table
const BUILTIN: &[(&str, &[&str])] = &[
    ("Authentication", &["auth", "login", "oauth", "sign[ui][pn]", "signout"]),
    (
        "User Profile",
        &["profile", "user[-_]?(?:profile|settings|management|dashboard)?", "account"],
    ),
    ("API", &["api(?:[-_](?:gateway|client|server|docs|documentation))?", "graphql", "rest"]),
    ("Database", &["db", "database", "storage", "sql", "nosql", "orm", "migration"]),
    (
        "UI",
        &[
            "ui",
            "interface",
            "component",
            "theme",
            "style",
            "css",
            "html",
            "javascript",
            "react",
            "vue",
            "angular",
            "svelte",
            "tailwind",
            "bootstrap",
        ],
    ),
    ("Tests", &["test", "spec", r"_test\.go$"]),
    (
        "Security",
        &[
            "auth",
            "security",
            "authentication",
            "authorization",
            "encrypt(?:ion)?",
            "hash(?:ing)?",
            "password",
            "token",
            "jwt",
            "api[-_](?:key|token|secret)",
        ],
    ),
    ("Notifications", &["notification", "notifier", "notify", "alert", "toast", "snackbar"]),
    (
        "Analytics",
        &["analytics", "tracking", "telemetry", "metrics", "stats", "logger", "logging"],
    ),
    ("Cache", &["cache", "memcached", "redis", "caching"]),
    ("Search", &["search", "indexing", "fulltext", "autocomplete", "filter", "sort"]),
    ("Payment", &["payment", "billing", "subscription", "invoice", "purchase"]),
    ("Admin", &["admin", "dashboard", "management", "control", "panel"]),
    ("Monitoring", &["monitor", "observe", "stats", "metrics", "logging", "tracing"]),
    ("Logging", &["log", "logger", "logging", "syslog", "journald"]),
    ("Configuration", &["config", "configuration", "settings", "properties"]),
    ("Scheduling", &["schedule", "scheduler", "cron", "job", "task"]),
    ("Caching", &["cache", "memcached", "redis", "caching"]),
    ("Rate Limiting", &["rate", "limit", "limiter", "throttle"]),
    (
        "Documentation",
        &["docs", "documentation", "readme", "changelog", "release", "upgrade", "migration"],
    ),
];

/// Errors raised while building a taxonomy
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// A pattern is not a valid regular expression
    #[error("feature '{feature}': invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Feature the pattern belongs to
        feature: String,
        /// The offending pattern text
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The same feature name was declared twice
    #[error("duplicate feature: {0}")]
    DuplicateFeature(String),

    /// A feature name was empty or whitespace
    #[error("feature name must not be empty")]
    EmptyName,
}

/// One taxonomy entry: a feature name and its compiled patterns
#[derive(Debug, Clone)]
pub struct FeatureMatcher {
    name: String,
    patterns: Vec<Regex>,
}

impl FeatureMatcher {
    /// Compile the patterns for a single feature
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        patterns: impl IntoIterator<Item = S>,
    ) -> Result<Self, TaxonomyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaxonomyError::EmptyName);
        }

        let patterns = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                RegexBuilder::new(pattern).case_insensitive(true).build().map_err(|source| {
                    TaxonomyError::InvalidPattern {
                        feature: name.clone(),
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, patterns })
    }

    /// Feature name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiled patterns, in declaration order
    #[must_use]
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Whether any pattern is found anywhere in `text`
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// An immutable set of feature matchers
///
/// Built once and shared read-only (usually behind an `Arc`) by every
/// pipeline that uses it.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    features: Vec<FeatureMatcher>,
}

impl Taxonomy {
    /// Build a taxonomy from `(name, patterns)` pairs
    pub fn new<N, P, S>(entries: impl IntoIterator<Item = (N, P)>) -> Result<Self, TaxonomyError>
    where
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut features = Vec::new();

        for (name, patterns) in entries {
            let matcher = FeatureMatcher::new(name, patterns)?;
            if !seen.insert(matcher.name.clone()) {
                return Err(TaxonomyError::DuplicateFeature(matcher.name));
            }
            features.push(matcher);
        }

        Ok(Self { features })
    }

    /// The built-in taxonomy
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::new(Self::builtin_entries())
    }

    /// Raw `(name, patterns)` pairs of the built-in taxonomy
    #[must_use]
    pub fn builtin_entries() -> Vec<(String, Vec<String>)> {
        BUILTIN
            .iter()
            .map(|(name, patterns)| {
                ((*name).to_string(), patterns.iter().map(|p| (*p).to_string()).collect())
            })
            .collect()
    }

    /// Look up a feature by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureMatcher> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Feature names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(FeatureMatcher::name)
    }

    /// Feature matchers, in declaration order
    #[must_use]
    pub fn features(&self) -> &[FeatureMatcher] {
        &self.features
    }

    /// Iterate over the feature matchers
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureMatcher> {
        self.features.iter()
    }

    /// Number of features
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the taxonomy has no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<'a> IntoIterator for &'a Taxonomy {
    type Item = &'a FeatureMatcher;
    type IntoIter = std::slice::Iter<'a, FeatureMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
