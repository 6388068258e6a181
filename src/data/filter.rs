use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{Dataset, LabelField, Record};

// ---------------------------------------------------------------------------
// Filter selection: the active constraints
// ---------------------------------------------------------------------------

/// Inclusive publication-date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The combined filter constraints.
///
/// For each label set, an empty set means "no filter" on that field. A
/// non-empty set keeps only records whose value is in it, so records with
/// no value for that field are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub date_range: Option<DateRange>,
    pub emotions: BTreeSet<String>,
    pub themes: BTreeSet<String>,
    pub sources: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection with every value selected and the full date span, i.e. the
    /// dashboard's initial state.
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection {
            date_range: dataset
                .date_bounds()
                .map(|(start, end)| DateRange::new(start, end)),
            emotions: dataset.distinct_values(LabelField::Emotion),
            themes: dataset.distinct_values(LabelField::Theme),
            sources: dataset.distinct_values(LabelField::Source),
        }
    }

    pub fn labels(&self, field: LabelField) -> &BTreeSet<String> {
        match field {
            LabelField::Emotion => &self.emotions,
            LabelField::Theme => &self.themes,
            LabelField::Source => &self.sources,
        }
    }

    pub fn labels_mut(&mut self, field: LabelField) -> &mut BTreeSet<String> {
        match field {
            LabelField::Emotion => &mut self.emotions,
            LabelField::Theme => &mut self.themes,
            LabelField::Source => &mut self.sources,
        }
    }

    /// Whether `record` passes every active constraint.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(range) = &self.date_range {
            match record.publication_date {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }
        LabelField::ALL.iter().all(|&field| {
            let selected = self.labels(field);
            if selected.is_empty() {
                return true;
            }
            field
                .value_of(record)
                .is_some_and(|value| selected.contains(value))
        })
    }
}

// ---------------------------------------------------------------------------
// FilteredView – ordered subset of a dataset
// ---------------------------------------------------------------------------

/// The records of a [`Dataset`] that passed a selection, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every record.
    pub fn full(dataset: &'a Dataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Rebuild a view from previously computed row indices. Out-of-range and
    /// duplicate indices are dropped and order is normalised.
    pub fn from_indices(dataset: &'a Dataset, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut indices: Vec<usize> = indices
            .into_iter()
            .filter(|&i| i < dataset.len())
            .collect();
        indices.sort_unstable();
        indices.dedup();
        FilteredView { dataset, indices }
    }

    /// Re-apply `selection` to the records already in this view.
    pub fn refine(&self, selection: &FilterSelection) -> FilteredView<'a> {
        let records = self.dataset.records();
        FilteredView {
            dataset: self.dataset,
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| selection.matches(&records[i]))
                .collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row indices into the underlying dataset, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

impl PartialEq for FilteredView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.indices == other.indices
    }
}

impl Eq for FilteredView<'_> {}

/// Return the records of `dataset` that pass all active filters.
pub fn apply_filters<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    FilteredView::full(dataset).refine(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(
        d: Option<NaiveDate>,
        emotion: Option<&str>,
        theme: Option<&str>,
        source: Option<&str>,
    ) -> Record {
        Record {
            publication_date: d,
            emotion_label: emotion.map(str::to_string),
            thematic_label: theme.map(str::to_string),
            source: source.map(str::to_string),
            ..Record::default()
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            record(Some(date(2024, 1, 1)), Some("Fear"), Some("Raids"), Some("A")),
            record(Some(date(2024, 2, 1)), Some("Anger"), None, Some("B")),
            record(None, Some("Fear"), Some("Courts"), Some("A")),
            record(Some(date(2024, 1, 15)), None, Some("Raids"), None),
        ])
    }

    #[test]
    fn default_selection_passes_everything() {
        let ds = sample();
        let view = apply_filters(&ds, &FilterSelection::default());
        assert_eq!(view.indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_null_dates() {
        let ds = sample();
        let sel = FilterSelection {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 15))),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&ds, &sel).indices(), &[0, 3]);
    }

    #[test]
    fn inverted_range_yields_empty_view() {
        let ds = sample();
        let sel = FilterSelection {
            date_range: Some(DateRange::new(date(2024, 2, 1), date(2024, 1, 1))),
            ..FilterSelection::default()
        };
        assert!(apply_filters(&ds, &sel).is_empty());
    }

    #[test]
    fn non_empty_label_set_drops_nulls() {
        let ds = sample();
        let sel = FilterSelection {
            themes: set(&["Raids", "Courts"]),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&ds, &sel).indices(), &[0, 2, 3]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let ds = sample();
        let sel = FilterSelection {
            emotions: set(&["Fear"]),
            sources: set(&["A"]),
            themes: set(&["Raids"]),
            ..FilterSelection::default()
        };
        assert_eq!(apply_filters(&ds, &sel).indices(), &[0]);
    }

    #[test]
    fn all_selection_excludes_records_with_missing_labels() {
        let ds = sample();
        let sel = FilterSelection::all(&ds);
        assert_eq!(sel.date_range, Some(DateRange::new(date(2024, 1, 1), date(2024, 2, 1))));
        // Row 1 has no theme, row 2 no date, row 3 no emotion.
        assert_eq!(apply_filters(&ds, &sel).indices(), &[0]);
    }

    #[test]
    fn refine_is_idempotent() {
        let ds = sample();
        let sel = FilterSelection {
            emotions: set(&["Fear"]),
            ..FilterSelection::default()
        };
        let view = apply_filters(&ds, &sel);
        assert_eq!(view.refine(&sel), view);
    }

    #[test]
    fn from_indices_normalises() {
        let ds = sample();
        let view = FilteredView::from_indices(&ds, [3, 1, 1, 42]);
        assert_eq!(view.indices(), &[1, 3]);
        assert_eq!(view.iter().count(), 2);
    }

    #[test]
    fn empty_dataset_gives_empty_view() {
        let ds = Dataset::default();
        assert!(apply_filters(&ds, &FilterSelection::all(&ds)).is_empty());
    }
}
