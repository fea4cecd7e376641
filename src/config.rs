//! Configuration file handling.
//!
//! Settings come from `rusty-reel.toml` (or `--config FILE`), with command-line
//! flags taking precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::ReelError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "rusty-reel.toml";

/// Written by the `generate_sample` binary with the required column layout.
///
/// The public IMDb export at
/// `https://raw.githubusercontent.com/mhanstudio/NicCageMadKudu/refs/heads/main/imdb-movies-dataset.csv`
/// names its runtime column `Duration (min)`; rename that header to
/// `Duration` before pointing `--source` at a copy of it.
pub const DEFAULT_SOURCE: &str = "sample_movies.csv";

pub const DEFAULT_ACTOR: &str = "Nicolas Cage";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local path (`.csv`, `.json`, `.parquet`) or `http(s)://` URL to CSV.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

fn default_location() -> String {
    DEFAULT_SOURCE.to_string()
}

/// What to compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Actor whose filmography is summarised.
    #[serde(default = "default_actor")]
    pub actor: String,

    /// How many co-stars to list.
    #[serde(default = "default_top_co_stars")]
    pub top_co_stars: usize,

    /// Number of buckets in the duration histogram.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            actor: default_actor(),
            top_co_stars: default_top_co_stars(),
            duration_buckets: default_duration_buckets(),
        }
    }
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

fn default_top_co_stars() -> usize {
    10
}

fn default_duration_buckets() -> usize {
    10
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How the report is emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Config file (explicit or default) merged with CLI flags, validated.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_default()?.unwrap_or_default(),
        };
        config.merge_with_args(args);
        config.validate()?;
        Ok(config)
    }

    /// CLI arguments take precedence, but only when explicitly given.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref source) = args.source {
            self.source.location = source.clone();
        }
        if let Some(ref actor) = args.actor {
            self.analysis.actor = actor.clone();
        }
        if let Some(n) = args.top_co_stars {
            self.analysis.top_co_stars = n;
        }
        if let Some(n) = args.duration_buckets {
            self.analysis.duration_buckets = n;
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref output) = args.output {
            self.report.output = Some(output.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ReelError> {
        if self.source.location.trim().is_empty() {
            return Err(ReelError::InvalidConfig(
                "source location must not be empty".to_string(),
            ));
        }
        if self.analysis.actor.trim().is_empty() {
            return Err(ReelError::InvalidConfig(
                "actor name must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        let config = Config::default();
        toml::to_string_pretty(&config).context("serialising default config")
    }
}
