//! Aggregates over an actor's filmography.
//!
//! The analyzer only produces cleaned, typed values. Charting, image grids,
//! word clouds and sentiment scoring belong to whoever consumes them.

pub mod analyzer;
pub mod histogram;
pub mod reviews;

pub use analyzer::{Extremum, FilmographyAnalyzer, PosterLink, RankedCounts, VoteTally};
pub use histogram::DurationBucket;
pub use reviews::ReviewCorpus;
