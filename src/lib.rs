//! Filmography statistics for one actor over a tabular movie dataset.
//!
//! Pipeline: [`data::loader`] produces an immutable [`data::model::MovieDataset`],
//! [`data::filter`] derives the actor's corpus, [`analysis::FilmographyAnalyzer`]
//! computes aggregates over it, and [`report::FilmographyReport`] hands them to
//! whatever renders them.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod report;

use anyhow::Result;

use analysis::FilmographyAnalyzer;
use config::Config;
use report::FilmographyReport;

/// Load the configured source and build the report for the configured actor.
pub fn run(config: &Config) -> Result<FilmographyReport> {
    let dataset = data::loader::load_source(&config.source.location)?;
    let analyzer = FilmographyAnalyzer::for_actor(&dataset, &config.analysis.actor);
    if analyzer.count() == 0 {
        log::warn!(
            "no movies in {} mention {}",
            dataset.source,
            config.analysis.actor
        );
    }
    Ok(FilmographyReport::build(
        &analyzer,
        &dataset.source,
        &config.analysis,
    ))
}
