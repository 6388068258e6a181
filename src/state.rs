use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use witness_dashboard::config::DashboardConfig;
use witness_dashboard::data::filter::{apply_filters, DateRange, FilterSelection, FilteredView};
use witness_dashboard::data::loader::load_file;
use witness_dashboard::data::model::{Dataset, LabelField};

use crate::color::CategoryColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Every value of each label field, for the filter widgets.
    pub label_options: BTreeMap<LabelField, BTreeSet<String>>,

    /// Earliest and latest valid publication date in the dataset.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,

    /// Current filter constraints.
    pub selection: FilterSelection,

    /// Rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Slice colours for the emotion chart.
    pub emotion_colors: CategoryColors,

    /// Bar colours for the theme chart.
    pub theme_colors: CategoryColors,

    /// Number of articles listed under the charts.
    pub article_limit: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            label_options: BTreeMap::new(),
            date_bounds: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            emotion_colors: CategoryColors::default(),
            theme_colors: CategoryColors::default(),
            article_limit: config.article_limit,
            status_message: None,
        }
    }

    /// Load `path` and make it the current dataset. On failure the previous
    /// dataset stays and the error is shown in the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path).with_context(|| format!("loading {}", path.display())) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and reset filters to "everything".
    pub fn set_dataset(&mut self, dataset: Dataset) {
        log::info!("Showing {} articles", dataset.len());
        self.label_options = LabelField::ALL
            .iter()
            .map(|&field| (field, dataset.distinct_values(field)))
            .collect();
        self.date_bounds = dataset.date_bounds();
        self.selection = FilterSelection::all(&dataset);
        self.emotion_colors = CategoryColors::new(self.selection.labels(LabelField::Emotion));
        self.theme_colors = CategoryColors::new(self.selection.labels(LabelField::Theme));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let view = apply_filters(ds, &self.selection);
            log::debug!("{} of {} articles pass the filters", view.len(), ds.len());
            self.visible_indices = view.indices().to_vec();
        }
    }

    /// The cached filtered view, if a dataset is loaded.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        let ds = self.dataset.as_ref()?;
        Some(FilteredView::from_indices(ds, self.visible_indices.iter().copied()))
    }

    /// Restore the initial "everything selected" filters.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = FilterSelection::all(ds);
            self.refilter();
        }
    }

    /// Set the date filter, clamped to the dataset's date span.
    pub fn set_date_range(&mut self, range: DateRange) {
        let range = match self.date_bounds {
            Some((min, max)) => DateRange::new(range.start.clamp(min, max), range.end.clamp(min, max)),
            None => return,
        };
        self.selection.date_range = Some(range);
        self.refilter();
    }

    /// Toggle a single label in a field's selection.
    pub fn toggle_label(&mut self, field: LabelField, label: &str) {
        let selected = self.selection.labels_mut(field);
        if !selected.remove(label) {
            selected.insert(label.to_string());
        }
        self.refilter();
    }

    /// Select every value of `field`.
    pub fn select_all(&mut self, field: LabelField) {
        let all = self.label_options.get(&field).cloned().unwrap_or_default();
        *self.selection.labels_mut(field) = all;
        self.refilter();
    }

    /// Clear the selection of `field`, which lifts that filter.
    pub fn select_none(&mut self, field: LabelField) {
        self.selection.labels_mut(field).clear();
        self.refilter();
    }
}
