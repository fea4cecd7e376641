use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray, LargeListArray, ListArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, Schema};
use arrow::util::display::array_value_to_string;
use log::{debug, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{MovieDataset, MovieRecord, RawRow};
use crate::error::ReelError;

/// Column names every source must provide (case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Title", "Year", "Genre", "Rating", "Metascore", "Votes", "Cast", "Poster", "Review",
    "Duration",
];

type Cells = [Option<String>; 10];

fn raw_row(cells: Cells) -> RawRow {
    let [title, year, genre, rating, metascore, votes, cast, poster, review, duration] = cells;
    RawRow {
        title,
        year,
        genre,
        rating,
        metascore,
        votes,
        cast,
        poster,
        review,
        duration,
    }
}

/// Resolve every required column through `lookup`, reporting all absent
/// columns in one error.
fn locate_columns(lookup: impl Fn(&str) -> Option<usize>) -> Result<[usize; 10]> {
    let mut positions = [0usize; 10];
    let mut missing = Vec::new();
    for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        match lookup(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(ReelError::MissingColumn { columns: missing }.into());
    }
    Ok(positions)
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a movie dataset from a local path or an `http(s)://` URL.
pub fn load_source(source: &str) -> Result<MovieDataset> {
    let dataset = if is_remote(source) {
        load_url(source)?
    } else {
        load_file(Path::new(source))?
    };
    info!("loaded {} movies from {}", dataset.len(), dataset.source);
    log_data_quality(&dataset);
    Ok(dataset)
}

/// One summary line per numeric column with unreadable cells. The cells stay
/// in the dataset as `Unparsable` and are skipped by the aggregates.
fn log_data_quality(dataset: &MovieDataset) {
    let columns: [(&str, fn(&MovieRecord) -> bool); 5] = [
        ("Year", |r| r.year.is_unparsable()),
        ("Rating", |r| r.rating.is_unparsable()),
        ("Metascore", |r| r.metascore.is_unparsable()),
        ("Votes", |r| r.votes.is_unparsable()),
        ("Duration", |r| r.duration_minutes.is_unparsable()),
    ];
    for (name, unparsable) in columns {
        let bad = dataset.records.iter().filter(|r| unparsable(r)).count();
        if bad > 0 {
            warn!("{bad} of {} rows have an unreadable {name} value", dataset.len());
        }
    }
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Load a movie dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required column names
/// * `.json`    – `[{ "Title": ..., "Cast": ..., ... }, ...]`
/// * `.parquet` – one column per required name
pub fn load_file(path: &Path) -> Result<MovieDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            load_csv_reader(file, &path.display().to_string())
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(ReelError::UnsupportedFormat(format!(".{other}")).into()),
    }
}

// ---------------------------------------------------------------------------
// Remote CSV
// ---------------------------------------------------------------------------

fn load_url(url: &str) -> Result<MovieDataset> {
    info!("fetching {url}");
    let body = reqwest::blocking::get(url)
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?
        .text()
        .with_context(|| format!("reading response body from {url}"))?;
    debug!("fetched {} bytes", body.len());
    load_csv_reader(body.as_bytes(), url)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text with a header row. Extra columns are ignored.
///
/// Only the header is structural. Short or long rows are kept with whatever
/// cells they carry, and cells that are not valid UTF-8 are decoded lossily.
pub fn load_csv_reader<R: Read>(input: R, source: &str) -> Result<MovieDataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let columns = locate_columns(|name| headers.iter().position(|h| h == name))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            warn!(
                "{source}: row {row_no} has {} fields, expected {}",
                record.len(),
                headers.len()
            );
        }
        let cells = columns.map(|idx| record.get(idx).map(decode_cell));
        if columns
            .iter()
            .filter_map(|&idx| record.get(idx))
            .any(|bytes| std::str::from_utf8(bytes).is_err())
        {
            warn!("{source}: row {row_no} contains invalid UTF-8, replaced lossily");
        }
        records.push(MovieRecord::from_raw(row_no, raw_row(cells)));
    }

    Ok(MovieDataset::from_records(source, records))
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// List-valued `Genre` / `Cast` cells are accepted and joined.
fn load_json(path: &Path) -> Result<MovieDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let objects = rows
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect::<Result<Vec<_>>>()?;

    // `[]` has no keys to check and loads as an empty dataset. A header-only
    // CSV is the counterpart, and its header is still validated.
    if !objects.is_empty() {
        // A column counts as present when any row carries the key.
        locate_columns(|name| objects.iter().any(|o| o.contains_key(name)).then_some(0))?;
    }

    let records = objects
        .iter()
        .enumerate()
        .map(|(i, obj)| {
            let cells = REQUIRED_COLUMNS.map(|name| obj.get(name).and_then(json_to_cell));
            MovieRecord::from_raw(i, raw_row(cells))
        })
        .collect();

    Ok(MovieDataset::from_records(path.display().to_string(), records))
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(json_to_cell)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per required name. String, integer,
/// float and list-of-string columns are all accepted; files written by both
/// **Pandas** and **Polars** work.
fn load_parquet(path: &Path) -> Result<MovieDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let schema: Arc<Schema> = builder.schema().clone();
    let columns = locate_columns(|name| schema.index_of(name).ok())?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let mut cells = Cells::default();
            for (cell, &idx) in cells.iter_mut().zip(&columns) {
                *cell = extract_cell(batch.column(idx), row)?;
            }
            let row_no = records.len();
            records.push(MovieRecord::from_raw(row_no, raw_row(cells)));
        }
    }

    Ok(MovieDataset::from_records(path.display().to_string(), records))
}

// -- Parquet / Arrow helpers --

/// Render one Arrow cell as text for the shared normalisers.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        DataType::List(_) => {
            let list = col
                .as_any()
                .downcast_ref::<ListArray>()
                .context("expected ListArray")?;
            join_list_items(&list.value(row))?
        }
        DataType::LargeList(_) => {
            let list = col
                .as_any()
                .downcast_ref::<LargeListArray>()
                .context("expected LargeListArray")?;
            join_list_items(&list.value(row))?
        }
        _ => array_value_to_string(col, row).context("formatting parquet cell")?,
    };
    Ok(Some(text))
}

fn join_list_items(items: &Arc<dyn Array>) -> Result<String> {
    let mut parts = Vec::with_capacity(items.len());
    for i in 0..items.len() {
        if let Some(part) = extract_cell(items, i)? {
            parts.push(part);
        }
    }
    Ok(parts.join(", "))
}
