use crate::data::model::MovieRecord;

/// Review texts of a corpus, handed to word-cloud and sentiment consumers.
///
/// Nothing is copied or tokenised here. Every call to [`ReviewCorpus::iter`]
/// starts a fresh pass, so a consumer can walk the corpus as often as it needs.
#[derive(Debug, Clone, Copy)]
pub struct ReviewCorpus<'a> {
    records: &'a [&'a MovieRecord],
}

impl<'a> ReviewCorpus<'a> {
    pub fn new(records: &'a [&'a MovieRecord]) -> Self {
        ReviewCorpus { records }
    }

    pub fn iter(&self) -> Reviews<'a> {
        Reviews {
            inner: self.records.iter(),
        }
    }

    /// Number of non-empty reviews.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for &ReviewCorpus<'a> {
    type Item = &'a str;
    type IntoIter = Reviews<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy pass over a [`ReviewCorpus`]; skips records without review text.
#[derive(Debug, Clone)]
pub struct Reviews<'a> {
    inner: std::slice::Iter<'a, &'a MovieRecord>,
}

impl<'a> Iterator for Reviews<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|rec| {
            rec.review_text
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
        })
    }
}
