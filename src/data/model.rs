use serde::Serialize;

// ---------------------------------------------------------------------------
// Field – the outcome of parsing a single typed cell
// ---------------------------------------------------------------------------

/// A parsed cell. Keeps "the cell was empty" apart from "the cell had text we
/// could not read", so aggregates can skip both while data-quality logging
/// can still tell them apart.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field<T> {
    Present(T),
    #[default]
    Missing,
    Unparsable { raw: String },
}

impl<T> Field<T> {
    /// Parse `raw` with `parse`, mapping blank input to [`Field::Missing`].
    pub fn parse_with(raw: Option<&str>, parse: impl FnOnce(&str) -> Option<T>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Field::Missing,
            Some(text) => match parse(text) {
                Some(v) => Field::Present(v),
                None => Field::Unparsable {
                    raw: text.to_string(),
                },
            },
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_unparsable(&self) -> bool {
        matches!(self, Field::Unparsable { .. })
    }
}

// -- Cell normalisers used by every loader --

/// `"1,234,567"` → `1234567`.
pub fn parse_votes(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    digits.parse::<u64>().ok()
}

pub fn parse_score(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `"123"`, `"123.0"` and `"123 min"`.
pub fn parse_duration(text: &str) -> Option<f64> {
    let number = text.strip_suffix("min").unwrap_or(text).trim();
    parse_score(number).filter(|v| *v >= 0.0)
}

/// Accepts `"2019"` and `"(2019)"`; a float-encoded `"2019.0"` is also accepted
/// because columnar writers often widen integer columns containing nulls.
pub fn parse_year(text: &str) -> Option<i32> {
    let inner = text.trim_start_matches('(').trim_end_matches(')').trim();
    if let Ok(y) = inner.parse::<i32>() {
        return Some(y);
    }
    inner
        .parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && v.abs() < i32::MAX as f64)
        .map(|v| v as i32)
}

/// Split a comma-delimited list cell into trimmed, non-blank tokens.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`split_list`] but drops repeats, keeping first-seen order.
pub fn split_genres(text: &str) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for g in split_list(text) {
        if !genres.contains(&g) {
            genres.push(g);
        }
    }
    genres
}

// ---------------------------------------------------------------------------
// MovieRecord – one row of the source dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieRecord {
    /// 0-based position in the source dataset.
    pub row: usize,
    pub title: String,
    pub year: Field<i32>,
    /// Parsed once at ingestion, de-duplicated, first-seen order.
    pub genres: Vec<String>,
    pub rating: Field<f64>,
    pub metascore: Field<f64>,
    pub votes: Field<u64>,
    pub duration_minutes: Field<f64>,
    /// `None` when the source cell is absent or blank.
    pub cast: Option<Vec<String>>,
    pub poster_url: Option<String>,
    pub review_text: Option<String>,
}

/// Raw text cells for one row, keyed by the required column names.
/// Every loader reduces its native row shape to this before parsing.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
    pub metascore: Option<String>,
    pub votes: Option<String>,
    pub cast: Option<String>,
    pub poster: Option<String>,
    pub review: Option<String>,
    pub duration: Option<String>,
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl MovieRecord {
    /// Normalise a raw row. Never fails: unreadable cells become
    /// [`Field::Unparsable`] and only affect the aggregates that use them.
    pub fn from_raw(row: usize, raw: RawRow) -> Self {
        let cast = raw
            .cast
            .as_deref()
            .map(split_list)
            .filter(|names| !names.is_empty());

        MovieRecord {
            row,
            title: raw.title.map(|t| t.trim().to_string()).unwrap_or_default(),
            year: Field::parse_with(raw.year.as_deref(), parse_year),
            genres: raw.genre.as_deref().map(split_genres).unwrap_or_default(),
            rating: Field::parse_with(raw.rating.as_deref(), parse_score),
            metascore: Field::parse_with(raw.metascore.as_deref(), parse_score),
            votes: Field::parse_with(raw.votes.as_deref(), parse_votes),
            duration_minutes: Field::parse_with(raw.duration.as_deref(), parse_duration),
            cast,
            poster_url: non_blank(raw.poster),
            review_text: non_blank(raw.review),
        }
    }

    pub fn cast_members(&self) -> &[String] {
        self.cast.as_deref().unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Immutable snapshot produced by the loader and handed to the analyzer.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    pub records: Vec<MovieRecord>,
    /// Where the rows came from (path or URL), for messages.
    pub source: String,
}

impl MovieDataset {
    pub fn from_records(source: impl Into<String>, records: Vec<MovieRecord>) -> Self {
        MovieDataset {
            records,
            source: source.into(),
        }
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Title plus the score that put it on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedTitle {
    pub title: String,
    pub year: Option<i32>,
    pub rating: f64,
}
