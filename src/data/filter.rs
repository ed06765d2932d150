use std::collections::BTreeSet;

use url::form_urlencoded;

use super::model::{Record, RecordStore};

// ---------------------------------------------------------------------------
// Filter predicate: which industries / countries are selected
// ---------------------------------------------------------------------------

/// Inclusion filters for one request.
///
/// An empty set means "no constraint" on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub industries: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl RecordFilter {
    /// Build a filter from a raw URL query string such as
    /// `industry=Tech&industry=Finance&country=USA`.
    ///
    /// Keys other than `industry` and `country` are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut filter = RecordFilter::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "industry" => {
                    filter.industries.insert(value.into_owned());
                }
                "country" => {
                    filter.countries.insert(value.into_owned());
                }
                _ => {}
            }
        }
        filter
    }

    /// Whether a single record passes every active dimension.
    pub fn matches(&self, record: &Record) -> bool {
        let industry_ok = self.industries.is_empty()
            || record
                .industry
                .as_ref()
                .is_some_and(|ind| self.industries.contains(ind));
        let country_ok = self.countries.is_empty() || self.countries.contains(&record.country);
        industry_ok && country_ok
    }

    pub fn is_empty(&self) -> bool {
        self.industries.is_empty() && self.countries.is_empty()
    }
}

/// Return indices of records that pass all active filters, in store order.
pub fn filtered_indices(store: &RecordStore, filter: &RecordFilter) -> Vec<usize> {
    store
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – request-scoped selection over the store
// ---------------------------------------------------------------------------

/// The records of a [`RecordStore`] that passed a [`RecordFilter`].
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    store: &'a RecordStore,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(store: &'a RecordStore, filter: &RecordFilter) -> Self {
        FilteredView {
            store,
            indices: filtered_indices(store, filter),
        }
    }

    /// A view over every record in the store.
    pub fn all(store: &'a RecordStore) -> Self {
        FilteredView {
            store,
            indices: (0..store.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let store = self.store;
        self.indices.iter().map(move |&i| &store.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
