use log::debug;

use super::model::{MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// Actor filter: which records belong to the target actor's filmography
// ---------------------------------------------------------------------------

/// Read-only view over the records of one actor, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredCorpus<'a> {
    pub actor: String,
    pub records: Vec<&'a MovieRecord>,
}

impl<'a> FilteredCorpus<'a> {
    pub fn new(actor: impl Into<String>, records: Vec<&'a MovieRecord>) -> Self {
        FilteredCorpus {
            actor: actor.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether any cast member's name contains `needle_lower`.
/// `needle_lower` must already be lowercased. An absent cast never matches.
pub fn cast_mentions(record: &MovieRecord, needle_lower: &str) -> bool {
    match &record.cast {
        Some(names) => names
            .iter()
            .any(|name| name.to_lowercase().contains(needle_lower)),
        None => false,
    }
}

/// Derive the corpus for `actor`.
///
/// A record is included when its cast contains the actor's name as a
/// case-insensitive substring of some cast entry.
pub fn filter_by_actor<'a>(dataset: &'a MovieDataset, actor: &str) -> FilteredCorpus<'a> {
    let actor = actor.trim();
    let needle = actor.to_lowercase();
    let records: Vec<&MovieRecord> = dataset
        .records
        .iter()
        .filter(|rec| cast_mentions(rec, &needle))
        .collect();
    debug!(
        "{} of {} movies mention {actor}",
        records.len(),
        dataset.len()
    );
    FilteredCorpus::new(actor, records)
}
