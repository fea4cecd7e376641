/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → MovieDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ MovieDataset │  Vec<MovieRecord>, immutable snapshot
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  cast mentions actor → FilteredCorpus
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
