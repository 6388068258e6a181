use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use witness_dashboard::data::filter::DateRange;
use witness_dashboard::data::model::LabelField;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            date_filter(ui, state);

            for field in LabelField::ALL {
                label_filter(ui, state, field);
            }

            ui.add_space(8.0);
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

/// Two date pickers bounding the publication date. Hidden when the dataset
/// has no valid dates.
fn date_filter(ui: &mut Ui, state: &mut AppState) {
    let (Some(_), Some(range)) = (state.date_bounds, state.selection.date_range) else {
        return;
    };

    ui.strong("Publication date range");
    let mut start = range.start;
    let mut end = range.end;
    egui::Grid::new("date_range_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            ui.add(DatePickerButton::new(&mut start).id_salt("date_start"));
            ui.end_row();
            ui.label("To");
            ui.add(DatePickerButton::new(&mut end).id_salt("date_end"));
            ui.end_row();
        });

    if start != range.start || end != range.end {
        state.set_date_range(DateRange::new(start, end));
    }
    ui.separator();
}

/// Collapsible multi-select for one label field.
fn label_filter(ui: &mut Ui, state: &mut AppState, field: LabelField) {
    let Some(options) = state.label_options.get(&field).cloned() else {
        return;
    };
    if options.is_empty() {
        return;
    }

    // Show count of selected / total in the header
    let n_selected = state.selection.labels(field).len();
    let header_text = if n_selected == 0 {
        format!("{field}  (no filter)")
    } else {
        format!("{field}  ({n_selected}/{})", options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(field.column_name())
        .default_open(field != LabelField::Source)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(field);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(field);
                }
            });

            for label in &options {
                let mut checked = state.selection.labels(field).contains(label);

                let mut text = RichText::new(label.as_str());
                match field {
                    LabelField::Emotion => text = text.color(state.emotion_colors.color_for(label)),
                    LabelField::Theme => text = text.color(state.theme_colors.color_for(label)),
                    LabelField::Source => {}
                }

                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_label(field, label);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} articles loaded, {} after filter",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open article table")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
