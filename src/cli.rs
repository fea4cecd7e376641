//! Command-line interface argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::OutputFormat;

/// Rusty Reel - filmography facts for one actor
///
/// Loads a movie dataset, keeps the movies whose cast mentions the actor,
/// and prints counts, ratings, genres, co-stars, votes and runtimes.
///
/// Examples:
///   rusty-reel
///   rusty-reel --source movies.csv --actor "Meryl Streep"
///   rusty-reel --source movies.parquet --format json --output report.json
///   rusty-reel --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dataset path (.csv, .json, .parquet) or http(s) URL to CSV.
    /// Defaults to sample_movies.csv from `generate_sample`. The public IMDb
    /// CSV needs its `Duration (min)` header renamed to `Duration`.
    #[arg(short, long, value_name = "PATH|URL", env = "RUSTY_REEL_SOURCE")]
    pub source: Option<String>,

    /// Actor whose filmography is analysed (case-insensitive substring of the cast)
    #[arg(short, long, value_name = "NAME")]
    pub actor: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for rusty-reel.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of co-stars to list
    #[arg(long, value_name = "COUNT")]
    pub top_co_stars: Option<usize>,

    /// Number of buckets in the runtime histogram
    #[arg(long, value_name = "COUNT")]
    pub duration_buckets: Option<usize>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write a default rusty-reel.toml and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }
        if let Some(actor) = &self.actor {
            if actor.trim().is_empty() {
                return Err("--actor must not be blank".to_string());
            }
        }
        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "rusty-reel",
            "--source",
            "movies.csv",
            "-a",
            "Meryl Streep",
            "--format",
            "json",
            "--top-co-stars",
            "5",
        ]);
        assert_eq!(args.source.as_deref(), Some("movies.csv"));
        assert_eq!(args.actor.as_deref(), Some("Meryl Streep"));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.top_co_stars, Some(5));
        assert_eq!(args.duration_buckets, None);
    }

    #[test]
    fn test_validation_conflicting_options() {
        let args = Args {
            verbose: true,
            quiet: true,
            ..Args::default()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_blank_actor() {
        let args = Args {
            actor: Some("  ".to_string()),
            ..Args::default()
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = Args::default();
        assert_eq!(args.log_level(), LevelFilter::Info);

        args.verbose = true;
        assert_eq!(args.log_level(), LevelFilter::Debug);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), LevelFilter::Error);
    }
}
