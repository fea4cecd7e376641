//! Report assembly for presentation collaborators.
//!
//! [`FilmographyReport`] gathers every aggregate into one serialisable value.
//! JSON is meant for charting and word-cloud tooling; the text form is a plain
//! summary for terminals.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::analysis::{DurationBucket, Extremum, FilmographyAnalyzer, PosterLink, VoteTally};
use crate::config::AnalysisConfig;
use crate::data::model::{MovieRecord, RatedTitle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// One line of the filmography table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmographyRow {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
}

impl From<&MovieRecord> for FilmographyRow {
    fn from(rec: &MovieRecord) -> Self {
        FilmographyRow {
            title: rec.title.clone(),
            year: rec.year.value().copied(),
            rating: rec.rating.value().copied(),
            votes: rec.votes.value().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmographyReport {
    pub actor: String,
    pub source: String,
    pub status: MatchStatus,
    pub count: usize,
    /// `null` when no movie has a rating.
    pub average_rating: Option<f64>,
    pub average_metascore: Option<f64>,
    pub highest_rated: Option<RatedTitle>,
    pub lowest_rated: Option<RatedTitle>,
    pub genres: Vec<NamedCount>,
    pub co_stars: Vec<NamedCount>,
    pub votes: VoteTally,
    pub durations: Vec<DurationBucket>,
    pub movies_per_year: Vec<YearCount>,
    pub posters: Vec<PosterLink>,
    pub filmography: Vec<FilmographyRow>,
    pub reviews: Vec<String>,
}

fn named(counts: Vec<(String, usize)>) -> Vec<NamedCount> {
    counts
        .into_iter()
        .map(|(name, count)| NamedCount { name, count })
        .collect()
}

fn rated_title(analyzer: &FilmographyAnalyzer<'_>, direction: Extremum) -> Option<RatedTitle> {
    match analyzer.extremal_rated(direction) {
        Ok(rec) => rec.rating.value().map(|&rating| RatedTitle {
            title: rec.title.clone(),
            year: rec.year.value().copied(),
            rating,
        }),
        Err(err) => {
            debug!("{direction:?} rated: {err}");
            None
        }
    }
}

impl FilmographyReport {
    pub fn build(
        analyzer: &FilmographyAnalyzer<'_>,
        source: &str,
        settings: &AnalysisConfig,
    ) -> Self {
        let count = analyzer.count();
        FilmographyReport {
            actor: analyzer.actor().to_string(),
            source: source.to_string(),
            status: if count == 0 {
                MatchStatus::NoMatches
            } else {
                MatchStatus::Matched
            },
            count,
            average_rating: analyzer.average_rating(),
            average_metascore: analyzer.average_metascore(),
            highest_rated: rated_title(analyzer, Extremum::Max),
            lowest_rated: rated_title(analyzer, Extremum::Min),
            genres: named(analyzer.genre_distribution()),
            co_stars: named(analyzer.co_star_frequency(settings.top_co_stars)),
            votes: analyzer.vote_tally(),
            durations: analyzer.duration_distribution(settings.duration_buckets),
            movies_per_year: analyzer
                .movies_per_year()
                .into_iter()
                .map(|(year, count)| YearCount { year, count })
                .collect(),
            posters: analyzer.posters(),
            filmography: analyzer
                .corpus()
                .records
                .iter()
                .map(|&rec| FilmographyRow::from(rec))
                .collect(),
            reviews: analyzer
                .review_corpus()
                .iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

fn year_suffix(year: Option<i32>) -> String {
    year.map(|y| format!(" ({y})")).unwrap_or_default()
}

impl fmt::Display for FilmographyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filmography of {}", self.actor)?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f)?;

        if self.status == MatchStatus::NoMatches {
            return writeln!(f, "No movies found whose cast mentions {}.", self.actor);
        }

        writeln!(f, "Total movies: {}", self.count)?;
        match self.average_rating {
            Some(avg) => writeln!(f, "Average rating: {avg:.2}")?,
            None => writeln!(f, "Average rating: n/a")?,
        }
        if let Some(avg) = self.average_metascore {
            writeln!(f, "Average metascore: {avg:.1}")?;
        }
        if let Some(best) = &self.highest_rated {
            writeln!(
                f,
                "Highest rated: {}{} with {}",
                best.title,
                year_suffix(best.year),
                best.rating
            )?;
        }
        if let Some(worst) = &self.lowest_rated {
            writeln!(
                f,
                "Lowest rated: {}{} with {}",
                worst.title,
                year_suffix(worst.year),
                worst.rating
            )?;
        }
        writeln!(
            f,
            "Total votes: {} ({} movies without a usable count)",
            self.votes.total, self.votes.skipped
        )?;

        if !self.genres.is_empty() {
            writeln!(f, "\nGenres:")?;
            for g in &self.genres {
                writeln!(f, "  {:<24} {}", g.name, g.count)?;
            }
        }

        if !self.movies_per_year.is_empty() {
            writeln!(f, "\nMovies per year:")?;
            for y in &self.movies_per_year {
                writeln!(f, "  {}  {}", y.year, y.count)?;
            }
        }

        if !self.co_stars.is_empty() {
            writeln!(f, "\nFrequent co-stars:")?;
            for c in &self.co_stars {
                writeln!(f, "  {:<24} {}", c.name, c.count)?;
            }
        }

        if !self.durations.is_empty() {
            writeln!(f, "\nRuntime (minutes):")?;
            for b in &self.durations {
                writeln!(f, "  {:>6.1} - {:<6.1} {}", b.start, b.end, b.count)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Posters: {}", self.posters.len())?;
        writeln!(f, "Reviews: {}", self.reviews.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilteredCorpus;
    use crate::data::model::Field;

    fn movie(title: &str, year: i32, rating: f64, genres: &[&str], cast: &[&str]) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            year: Field::Present(year),
            rating: Field::Present(rating),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            cast: Some(cast.iter().map(|s| s.to_string()).collect()),
            review_text: Some(format!("{title} review")),
            ..MovieRecord::default()
        }
    }

    #[test]
    fn report_collects_every_aggregate() {
        let recs = vec![
            movie("Face/Off", 1997, 7.3, &["Action"], &["Nicolas Cage", "John Travolta"]),
            movie("Mandy", 2018, 6.5, &["Horror", "Action"], &["Nicolas Cage", "Andrea Riseborough"]),
        ];
        let analyzer =
            FilmographyAnalyzer::new(FilteredCorpus::new("Nicolas Cage", recs.iter().collect()));
        let report = FilmographyReport::build(&analyzer, "test.csv", &AnalysisConfig::default());

        assert_eq!(report.status, MatchStatus::Matched);
        assert_eq!(report.count, 2);
        assert_eq!(report.highest_rated.as_ref().unwrap().title, "Face/Off");
        assert_eq!(report.lowest_rated.as_ref().unwrap().title, "Mandy");
        assert_eq!(report.genres[0], NamedCount { name: "Action".into(), count: 2 });
        assert_eq!(report.co_stars.len(), 2);
        assert_eq!(report.movies_per_year.len(), 2);
        assert_eq!(report.filmography[1].title, "Mandy");
        assert_eq!(report.reviews, vec!["Face/Off review", "Mandy review"]);

        let text = report.render_text();
        assert!(text.contains("Total movies: 2"));
        assert!(text.contains("Highest rated: Face/Off (1997) with 7.3"));
    }

    #[test]
    fn empty_corpus_reports_no_matches() {
        let analyzer = FilmographyAnalyzer::new(FilteredCorpus::new("Keanu Reeves", Vec::new()));
        let report = FilmographyReport::build(&analyzer, "test.csv", &AnalysisConfig::default());

        assert_eq!(report.status, MatchStatus::NoMatches);
        assert_eq!(report.average_rating, None);
        assert_eq!(report.highest_rated, None);
        assert!(report.co_stars.is_empty());

        let text = report.render_text();
        assert!(text.contains("No movies found whose cast mentions Keanu Reeves."));
        assert!(!text.contains("Total movies"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "no_matches");
        assert!(json["average_rating"].is_null());
        assert_eq!(json["count"], 0);
    }
}
