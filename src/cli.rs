//! CLI definitions and entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::debug;

use featmap::adapters::GitHistory;
use featmap::config::AnalyzerConfig;
use featmap::core::services::{OwnershipAttributor, Pipeline, analyze};
use featmap::output::{FeatureReport, OutputMode, ReportOptions};

/// featmap - Feature ownership and bug history from git
#[derive(Parser, Debug)]
#[command(
    name = "featmap",
    version,
    about = "Map a repository's history onto features, owners and bug fixes",
    long_about = "Classify every commit of a repository into a taxonomy of features.\n\n\
                  Commits are matched by conventional-commit scope, message text and\n\
                  changed paths. Each feature reports its owners by commit share and\n\
                  the bug fixes that touched it.\n\n\
                  Dates are author dates, shown in UTC."
)]
pub struct Cli {
    /// Repository to analyze: a local path or a URL to clone
    #[arg(short, long, value_name = "SOURCE")]
    pub repo: String,

    /// Configuration file (defaults to ./.featmap.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Share of commits needed to be a primary owner, in (0, 1]
    #[arg(long, value_name = "SHARE")]
    pub primary_threshold: Option<f64>,

    /// Share of commits needed to be a backup owner, in (0, 1]
    #[arg(long, value_name = "SHARE")]
    pub backup_threshold: Option<f64>,

    /// List the N busiest contributors of each feature
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub top: usize,

    /// Hide features no commit matched
    #[arg(long)]
    pub skip_empty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = AnalyzerConfig::discover(cli.config.as_deref(), &cwd)?
        .with_threshold_overrides(cli.primary_threshold, cli.backup_threshold);
    debug!("Effective config: {config:?}");

    let attributor = OwnershipAttributor::new(config.thresholds()?);
    let pipeline = Pipeline::new(Arc::new(config.taxonomy()?), attributor);

    let history = GitHistory::from_source(&cli.repo)
        .with_context(|| format!("Failed to acquire repository {}", cli.repo))?;
    let analysis = analyze(&history, &pipeline)?;

    let options = ReportOptions {
        top: cli.top,
        skip_empty: cli.skip_empty,
    };
    FeatureReport::new(analysis.commit_count, &analysis.features, &attributor, options)
        .render(output_mode);

    Ok(())
}
