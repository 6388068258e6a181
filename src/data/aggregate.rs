use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::filter::FilteredView;
use super::model::{LabelField, Record};

/// Number of articles listed under the charts.
pub const DEFAULT_ARTICLE_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Headline numbers for a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryMetrics {
    pub count: usize,
    pub distinct_source_count: usize,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Compute record count, distinct sources and the date span of `view`.
pub fn summarize(view: &FilteredView<'_>) -> SummaryMetrics {
    let mut sources: BTreeSet<&str> = BTreeSet::new();
    let mut min_date: Option<NaiveDate> = None;
    let mut max_date: Option<NaiveDate> = None;

    for record in view.iter() {
        if let Some(source) = record.source.as_deref() {
            sources.insert(source);
        }
        if let Some(date) = record.publication_date {
            min_date = Some(min_date.map_or(date, |d| d.min(date)));
            max_date = Some(max_date.map_or(date, |d| d.max(date)));
        }
    }

    SummaryMetrics {
        count: view.len(),
        distinct_source_count: sources.len(),
        min_date,
        max_date,
    }
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Histogram of one categorical field. Every count is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryCounts(BTreeMap<String, usize>);

impl CategoryCounts {
    pub fn get(&self, label: &str) -> Option<usize> {
        self.0.get(label).copied()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Entries in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries by descending count, ties broken by label.
    pub fn by_count_desc(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Count records per value of `field`. Records without a value are skipped.
pub fn count_by(view: &FilteredView<'_>, field: LabelField) -> CategoryCounts {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in view.iter().filter_map(|r| field.value_of(r)) {
        *counts.entry(value.to_string()).or_default() += 1;
    }
    CategoryCounts(counts)
}

// ---------------------------------------------------------------------------
// Article list
// ---------------------------------------------------------------------------

/// The first `n` records of `view`, in order.
pub fn top_n<'a>(view: &FilteredView<'a>, n: usize) -> Vec<&'a Record> {
    view.iter().take(n).collect()
}
