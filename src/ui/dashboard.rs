use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use witness_dashboard::data::aggregate::{count_by, summarize, top_n, SummaryMetrics};
use witness_dashboard::data::model::LabelField;

use crate::state::AppState;
use crate::ui::{articles, charts};

const DESCRIPTION: &str = "This dashboard explores real news and testimony data about ICE-related \
events in Chicago. Use the filters in the sidebar to focus on specific dates, emotions, themes, \
or sources.";

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render metrics, charts and the article list for the current filters.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.view() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Witness Archive: Emotion & Theme Dashboard");
            ui.label(DESCRIPTION);
            ui.add_space(8.0);
            ui.label(RichText::new(format!("Total Articles after filter: {}", view.len())).strong());

            if view.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("No articles match the selected filters. Try widening your filters.")
                        .color(Color32::from_rgb(230, 160, 0)),
                );
                return;
            }

            metrics_row(ui, &summarize(&view));
            ui.separator();

            let emotions = count_by(&view, LabelField::Emotion);
            let themes = count_by(&view, LabelField::Theme);
            ui.columns(2, |cols: &mut [Ui]| {
                charts::emotion_chart(&mut cols[0], &emotions, &state.emotion_colors);
                charts::theme_chart(&mut cols[1], &themes, &state.theme_colors);
            });
            ui.separator();

            articles::article_list(ui, &top_n(&view, state.article_limit), state.article_limit);
        });
}

fn metrics_row(ui: &mut Ui, summary: &SummaryMetrics) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Articles", summary.count.to_string());
        metric(&mut cols[1], "Sources", summary.distinct_source_count.to_string());
        metric(&mut cols[2], "Date Range", date_span(summary));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(24.0));
}

fn date_span(summary: &SummaryMetrics) -> String {
    match (summary.min_date, summary.max_date) {
        (Some(min), Some(max)) => format!("{min} → {max}"),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn date_span_needs_both_ends() {
        let mut summary = SummaryMetrics {
            count: 2,
            distinct_source_count: 1,
            min_date: NaiveDate::from_ymd_opt(2025, 1, 2),
            max_date: NaiveDate::from_ymd_opt(2025, 3, 4),
        };
        assert_eq!(date_span(&summary), "2025-01-02 → 2025-03-04");

        summary.max_date = None;
        assert_eq!(date_span(&summary), "N/A");
    }
}
