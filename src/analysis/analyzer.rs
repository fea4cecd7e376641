use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use serde::Serialize;

use super::histogram::{self, DurationBucket};
use super::reviews::ReviewCorpus;
use crate::data::filter::{filter_by_actor, FilteredCorpus};
use crate::data::model::{Field, MovieDataset, MovieRecord};
use crate::error::{ReelError, ReelResult};

/// Which end of the rating scale [`FilmographyAnalyzer::extremal_rated`] looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Sum of normalised vote counts plus how many records took part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub total: u64,
    pub counted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterLink {
    pub title: String,
    pub url: String,
}

/// Name → count pairs, highest count first, ties in first-seen order.
pub type RankedCounts = Vec<(String, usize)>;

fn ranked_counts<I, S>(items: I) -> RankedCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut slot: HashMap<String, usize> = HashMap::new();
    let mut counts: RankedCounts = Vec::new();
    for item in items {
        let key = item.as_ref();
        match slot.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(key.to_string(), counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// FilmographyAnalyzer
// ---------------------------------------------------------------------------

/// Aggregates over one actor's corpus. Every method is a pure function of the
/// corpus; calling one twice gives identical results.
#[derive(Debug, Clone)]
pub struct FilmographyAnalyzer<'a> {
    corpus: FilteredCorpus<'a>,
}

impl<'a> FilmographyAnalyzer<'a> {
    pub fn new(corpus: FilteredCorpus<'a>) -> Self {
        FilmographyAnalyzer { corpus }
    }

    /// Filter `dataset` down to `actor` and wrap the result.
    pub fn for_actor(dataset: &'a MovieDataset, actor: &str) -> Self {
        Self::new(filter_by_actor(dataset, actor))
    }

    pub fn corpus(&self) -> &FilteredCorpus<'a> {
        &self.corpus
    }

    pub fn actor(&self) -> &str {
        &self.corpus.actor
    }

    pub fn count(&self) -> usize {
        self.corpus.len()
    }

    /// Mean over present ratings; `None` when there are none.
    pub fn average_rating(&self) -> Option<f64> {
        mean(self.corpus.records.iter().filter_map(|r| r.rating.value().copied()))
    }

    /// Mean over present metascores; `None` when there are none.
    pub fn average_metascore(&self) -> Option<f64> {
        mean(
            self.corpus
                .records
                .iter()
                .filter_map(|r| r.metascore.value().copied()),
        )
    }

    /// The highest or lowest rated record; the earliest one wins a tie.
    pub fn extremal_rated(&self, direction: Extremum) -> ReelResult<&'a MovieRecord> {
        let mut best: Option<(&'a MovieRecord, f64)> = None;
        for &rec in &self.corpus.records {
            let Some(&rating) = rec.rating.value() else {
                continue;
            };
            let replaces = match best {
                None => true,
                Some((_, current)) => match direction {
                    Extremum::Max => rating > current,
                    Extremum::Min => rating < current,
                },
            };
            if replaces {
                best = Some((rec, rating));
            }
        }
        best.map(|(rec, _)| rec).ok_or_else(|| ReelError::EmptyCorpus {
            actor: self.corpus.actor.clone(),
        })
    }

    /// Movies per genre; a multi-genre movie counts once for each genre.
    pub fn genre_distribution(&self) -> RankedCounts {
        ranked_counts(
            self.corpus
                .records
                .iter()
                .flat_map(|r| r.genres.iter()),
        )
    }

    pub fn total_votes(&self) -> u64 {
        self.vote_tally().total
    }

    /// Sum votes; unreadable and missing counts contribute nothing.
    pub fn vote_tally(&self) -> VoteTally {
        let mut tally = VoteTally::default();
        for rec in &self.corpus.records {
            match &rec.votes {
                Field::Present(v) => {
                    tally.total = tally.total.saturating_add(*v);
                    tally.counted += 1;
                }
                Field::Unparsable { raw } => {
                    warn!(
                        "row {}: votes for `{}` is not a number ({raw:?}), counted as 0",
                        rec.row, rec.title
                    );
                    tally.skipped += 1;
                }
                Field::Missing => {
                    debug!("row {}: `{}` has no vote count", rec.row, rec.title);
                    tally.skipped += 1;
                }
            }
        }
        tally
    }

    /// The `top_n` most frequent co-stars. Cast entries the actor filter
    /// matched on are the actor themself and are excluded.
    pub fn co_star_frequency(&self, top_n: usize) -> RankedCounts {
        let own_name = self.corpus.actor.trim().to_lowercase();
        let is_self =
            |name: &str| !own_name.is_empty() && name.to_lowercase().contains(&own_name);
        let mut ranked = ranked_counts(
            self.corpus
                .records
                .iter()
                .flat_map(|r| r.cast_members().iter())
                .map(|name| name.trim())
                .filter(|name| !name.is_empty() && !is_self(name)),
        );
        ranked.truncate(top_n);
        ranked
    }

    /// Histogram over present durations; missing ones are not bucketed.
    pub fn duration_distribution(&self, bucket_count: usize) -> Vec<DurationBucket> {
        let durations: Vec<f64> = self
            .corpus
            .records
            .iter()
            .filter_map(|r| r.duration_minutes.value().copied())
            .collect();
        histogram::equal_width(&durations, bucket_count)
    }

    /// Movie count per release year, ascending.
    pub fn movies_per_year(&self) -> Vec<(i32, usize)> {
        let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
        for rec in &self.corpus.records {
            if let Some(&year) = rec.year.value() {
                *per_year.entry(year).or_default() += 1;
            }
        }
        per_year.into_iter().collect()
    }

    /// Poster URLs for the image grid, corpus order.
    pub fn posters(&self) -> Vec<PosterLink> {
        self.corpus
            .records
            .iter()
            .filter_map(|r| {
                r.poster_url.as_ref().map(|url| PosterLink {
                    title: r.title.clone(),
                    url: url.clone(),
                })
            })
            .collect()
    }

    pub fn review_corpus(&self) -> ReviewCorpus<'_> {
        ReviewCorpus::new(&self.corpus.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rated(row: usize, title: &str, rating: Option<f64>) -> MovieRecord {
        MovieRecord {
            row,
            title: title.to_string(),
            rating: rating.map(Field::Present).unwrap_or(Field::Missing),
            cast: Some(vec!["Nicolas Cage".to_string()]),
            ..MovieRecord::default()
        }
    }

    fn analyzer(records: &[MovieRecord]) -> FilmographyAnalyzer<'_> {
        FilmographyAnalyzer::new(FilteredCorpus::new("Nicolas Cage", records.iter().collect()))
    }

    #[test]
    fn average_ignores_missing_ratings() {
        let recs = vec![
            rated(0, "a", Some(7.0)),
            rated(1, "b", Some(8.0)),
            rated(2, "c", None),
        ];
        assert_eq!(analyzer(&recs).average_rating(), Some(7.5));
    }

    #[test]
    fn average_is_undefined_without_ratings() {
        let recs = vec![rated(0, "a", None)];
        assert_eq!(analyzer(&recs).average_rating(), None);
        assert_eq!(analyzer(&[]).average_rating(), None);
    }

    #[test]
    fn true_zero_average_is_defined() {
        let recs = vec![rated(0, "a", Some(0.0))];
        assert_eq!(analyzer(&recs).average_rating(), Some(0.0));
    }

    #[test]
    fn extremal_prefers_first_occurrence() {
        let recs = vec![
            rated(0, "low", Some(6.0)),
            rated(1, "first nine", Some(9.0)),
            rated(2, "second nine", Some(9.0)),
        ];
        let a = analyzer(&recs);
        assert_eq!(a.extremal_rated(Extremum::Max).unwrap().row, 1);
        assert_eq!(a.extremal_rated(Extremum::Min).unwrap().row, 0);
    }

    #[test]
    fn extremal_skips_unrated_records() {
        let recs = vec![rated(0, "none", None), rated(1, "five", Some(5.0))];
        assert_eq!(
            analyzer(&recs).extremal_rated(Extremum::Min).unwrap().title,
            "five"
        );
    }

    #[test]
    fn extremal_without_ratings_is_empty_corpus() {
        let recs = vec![rated(0, "none", None)];
        assert_eq!(
            analyzer(&recs).extremal_rated(Extremum::Max),
            Err(ReelError::EmptyCorpus {
                actor: "Nicolas Cage".to_string()
            })
        );
    }

    #[test]
    fn votes_skip_unparsable_values() {
        let votes = [
            Field::Present(1000),
            Field::Unparsable {
                raw: "bad".to_string(),
            },
            Field::Present(500),
            Field::Missing,
        ];
        let recs: Vec<MovieRecord> = votes
            .into_iter()
            .enumerate()
            .map(|(row, votes)| MovieRecord {
                row,
                votes,
                ..MovieRecord::default()
            })
            .collect();
        let a = analyzer(&recs);
        assert_eq!(a.total_votes(), 1500);
        assert_eq!(
            a.vote_tally(),
            VoteTally {
                total: 1500,
                counted: 2,
                skipped: 2
            }
        );
    }

    #[test]
    fn co_stars_exclude_target_and_blanks() {
        let cast = |names: &[&str]| MovieRecord {
            cast: Some(names.iter().map(|s| s.to_string()).collect()),
            ..MovieRecord::default()
        };
        let recs = vec![
            cast(&["A", "B"]),
            cast(&["a", "C", "  "]),
            cast(&["A", "B"]),
            MovieRecord::default(),
        ];
        let a = FilmographyAnalyzer::new(FilteredCorpus::new("A", recs.iter().collect()));
        assert_eq!(
            a.co_star_frequency(2),
            vec![("B".to_string(), 2), ("C".to_string(), 1)]
        );
        assert_eq!(a.co_star_frequency(0), vec![]);
    }

    #[test]
    fn partial_actor_name_is_not_its_own_co_star() {
        let recs = vec![
            MovieRecord {
                cast: Some(vec!["Nicolas Cage".into(), "John Cusack".into()]),
                ..MovieRecord::default()
            },
            MovieRecord {
                cast: Some(vec!["NICOLAS CAGE".into(), "Sean Connery".into()]),
                ..MovieRecord::default()
            },
        ];
        let a = FilmographyAnalyzer::new(FilteredCorpus::new("cage", recs.iter().collect()));
        assert_eq!(
            a.co_star_frequency(5),
            vec![("John Cusack".to_string(), 1), ("Sean Connery".to_string(), 1)]
        );
    }

    #[test]
    fn co_star_ties_keep_first_seen_order() {
        let recs = vec![MovieRecord {
            cast: Some(vec!["Zed".into(), "Amy".into(), "Nicolas Cage".into()]),
            ..MovieRecord::default()
        }];
        assert_eq!(
            analyzer(&recs).co_star_frequency(10),
            vec![("Zed".to_string(), 1), ("Amy".to_string(), 1)]
        );
    }

    #[test]
    fn genres_count_every_label() {
        let genre = |g: &[&str]| MovieRecord {
            genres: g.iter().map(|s| s.to_string()).collect(),
            ..MovieRecord::default()
        };
        let recs = vec![genre(&["Action", "Drama"]), genre(&["Drama"])];
        assert_eq!(
            analyzer(&recs).genre_distribution(),
            vec![("Drama".to_string(), 2), ("Action".to_string(), 1)]
        );

        let tied = vec![genre(&["Action", "Drama"]), genre(&["Drama", "Action"])];
        assert_eq!(
            analyzer(&tied).genre_distribution(),
            vec![("Action".to_string(), 2), ("Drama".to_string(), 2)]
        );
    }

    #[test]
    fn durations_exclude_missing_values() {
        let dur = |d: Field<f64>| MovieRecord {
            duration_minutes: d,
            ..MovieRecord::default()
        };
        let recs = vec![
            dur(Field::Present(90.0)),
            dur(Field::Missing),
            dur(Field::Unparsable { raw: "?".into() }),
            dur(Field::Present(150.0)),
        ];
        let h = analyzer(&recs).duration_distribution(2);
        assert_eq!(h.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(h[0].start, 90.0);
        assert_eq!(h[1].end, 150.0);
    }

    #[test]
    fn movies_per_year_is_sorted_by_year() {
        let year = |y: i32| MovieRecord {
            year: Field::Present(y),
            ..MovieRecord::default()
        };
        let recs = vec![year(2001), year(1997), year(2001), MovieRecord::default()];
        assert_eq!(
            analyzer(&recs).movies_per_year(),
            vec![(1997, 1), (2001, 2)]
        );
    }

    #[test]
    fn posters_skip_records_without_url() {
        let recs = vec![
            MovieRecord {
                title: "Mandy".into(),
                poster_url: Some("http://p/mandy.jpg".into()),
                ..MovieRecord::default()
            },
            MovieRecord::default(),
        ];
        assert_eq!(
            analyzer(&recs).posters(),
            vec![PosterLink {
                title: "Mandy".into(),
                url: "http://p/mandy.jpg".into()
            }]
        );
    }

    #[test]
    fn aggregates_are_idempotent() {
        let recs = vec![
            rated(0, "a", Some(6.1)),
            rated(1, "b", Some(7.3)),
            rated(2, "c", Some(8.9)),
        ];
        let a = analyzer(&recs);
        assert_eq!(
            a.average_rating().map(f64::to_bits),
            a.average_rating().map(f64::to_bits)
        );
        assert_eq!(a.co_star_frequency(5), a.co_star_frequency(5));
        assert_eq!(a.genre_distribution(), a.genre_distribution());
        assert_eq!(a.duration_distribution(3), a.duration_distribution(3));
        assert_eq!(a.vote_tally(), a.vote_tally());
        assert_eq!(
            a.review_corpus().iter().collect::<Vec<_>>(),
            a.review_corpus().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_corpus_aggregates_are_total() {
        let a = analyzer(&[]);
        assert_eq!(a.count(), 0);
        assert_eq!(a.average_rating(), None);
        assert!(matches!(
            a.extremal_rated(Extremum::Max),
            Err(ReelError::EmptyCorpus { .. })
        ));
        assert!(a.co_star_frequency(10).is_empty());
        assert!(a.genre_distribution().is_empty());
        assert_eq!(a.total_votes(), 0);
        assert!(a.duration_distribution(10).is_empty());
        assert!(a.movies_per_year().is_empty());
        assert!(a.review_corpus().is_empty());
    }
}
