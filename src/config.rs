//! Analyzer configuration
//!
//! Optional TOML file tuning ownership thresholds and the feature taxonomy.
//! Looked up at `--config <path>` or `.featmap.toml` in the working directory.
//!
//! ```toml
//! [ownership]
//! primary_threshold = 0.2
//! backup_threshold = 0.1
//!
//! [taxonomy]
//! builtin = true
//!
//! [taxonomy.features]
//! "Billing" = ["invoice", "stripe"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{Taxonomy, TaxonomyError};
use crate::core::services::ownership::{
    DEFAULT_BACKUP_THRESHOLD, DEFAULT_PRIMARY_THRESHOLD, ThresholdError, Thresholds,
};

/// Project configuration filename
pub const CONFIG_FILE: &str = ".featmap.toml";

/// Errors raised while loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A threshold is out of range
    #[error(transparent)]
    Threshold(#[from] ThresholdError),

    /// A taxonomy pattern or name is invalid
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// Built-ins disabled and nothing declared
    #[error("taxonomy is empty: enable the built-in features or declare [taxonomy.features]")]
    EmptyTaxonomy,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyzerConfig {
    /// Ownership thresholds
    #[serde(default)]
    pub ownership: OwnershipConfig,
    /// Taxonomy overrides
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
}

/// Ownership thresholds as written in the file
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OwnershipConfig {
    /// Share needed to be a primary owner
    #[serde(default = "default_primary")]
    pub primary_threshold: f64,
    /// Share needed to be a backup owner
    #[serde(default = "default_backup")]
    pub backup_threshold: f64,
}

const fn default_primary() -> f64 {
    DEFAULT_PRIMARY_THRESHOLD
}

const fn default_backup() -> f64 {
    DEFAULT_BACKUP_THRESHOLD
}

impl Default for OwnershipConfig {
    fn default() -> Self {
        Self {
            primary_threshold: default_primary(),
            backup_threshold: default_backup(),
        }
    }
}

/// Taxonomy overrides
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxonomyConfig {
    /// Start from the built-in features
    #[serde(default = "default_builtin")]
    pub builtin: bool,
    /// Extra features; a built-in name replaces that feature's patterns
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
}

const fn default_builtin() -> bool {
    true
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            builtin: default_builtin(),
            features: BTreeMap::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the configuration to use
    ///
    /// An explicit path must exist. Without one, `.featmap.toml` in `dir` is
    /// used when present, and defaults otherwise.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::load_file(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            debug!("Loading config from {}", candidate.display());
            Self::load_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace thresholds with values given on the command line
    #[must_use]
    pub fn with_threshold_overrides(mut self, primary: Option<f64>, backup: Option<f64>) -> Self {
        if let Some(primary) = primary {
            self.ownership.primary_threshold = primary;
        }
        if let Some(backup) = backup {
            self.ownership.backup_threshold = backup;
        }
        self
    }

    /// Validated ownership thresholds
    pub fn thresholds(&self) -> Result<Thresholds, ThresholdError> {
        Thresholds::new(self.ownership.primary_threshold, self.ownership.backup_threshold)
    }

    /// Build the taxonomy: built-ins (if enabled) merged with declared features
    pub fn taxonomy(&self) -> Result<Taxonomy, ConfigError> {
        let mut entries = if self.taxonomy.builtin {
            Taxonomy::builtin_entries()
        } else {
            Vec::new()
        };

        for (name, patterns) in &self.taxonomy.features {
            if patterns.is_empty() {
                warn!("Feature '{name}' has no patterns and will never match");
            }
            if let Some(entry) = entries.iter_mut().find(|(existing, _)| existing == name) {
                debug!("Replacing patterns of built-in feature '{name}'");
                entry.1.clone_from(patterns);
            } else {
                entries.push((name.clone(), patterns.clone()));
            }
        }

        if entries.is_empty() {
            return Err(ConfigError::EmptyTaxonomy);
        }

        Ok(Taxonomy::new(entries)?)
    }
}
