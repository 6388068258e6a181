use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// LabelField – the categorical columns a user can filter on
// ---------------------------------------------------------------------------

/// A categorical column of the article table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LabelField {
    Emotion,
    Theme,
    Source,
}

impl LabelField {
    /// All filterable fields, in sidebar order.
    pub const ALL: [LabelField; 3] = [LabelField::Emotion, LabelField::Theme, LabelField::Source];

    /// The record's value for this field, if any.
    pub fn value_of<'a>(&self, record: &'a Record) -> Option<&'a str> {
        match self {
            LabelField::Emotion => record.emotion_label.as_deref(),
            LabelField::Theme => record.thematic_label.as_deref(),
            LabelField::Source => record.source.as_deref(),
        }
    }

    /// Column name as it appears in the input file.
    pub fn column_name(&self) -> &'static str {
        match self {
            LabelField::Emotion => "Emotion Label",
            LabelField::Theme => "Thematic Label",
            LabelField::Source => "Source",
        }
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the article table
// ---------------------------------------------------------------------------

/// A single news or testimony entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub title: String,
    pub source: Option<String>,
    /// `None` when the input value was missing or could not be parsed.
    pub publication_date: Option<NaiveDate>,
    pub emotion_label: Option<String>,
    pub thematic_label: Option<String>,
    pub summary: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full article table. Immutable once built; filtering produces views
/// over it rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest publication date, or `None` if no record has a
    /// valid date.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.publication_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Sorted set of the non-null values of `field`.
    pub fn distinct_values(&self, field: LabelField) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| field.value_of(r))
            .map(str::to_string)
            .collect()
    }
}

/// Sorted distinct non-null values of `field`, for populating filter widgets.
pub fn distinct_values(dataset: &Dataset, field: LabelField) -> BTreeSet<String> {
    dataset.distinct_values(field)
}
