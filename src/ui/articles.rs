use eframe::egui::{RichText, Ui};

use witness_dashboard::data::model::Record;

/// Render the article snippets under the charts.
pub fn article_list(ui: &mut Ui, records: &[&Record], limit: usize) {
    ui.heading(format!("Articles (Top {limit})"));
    ui.add_space(4.0);

    for record in records {
        ui.label(RichText::new(record.title.as_str()).strong());
        ui.label(RichText::new(byline(record)).italics().weak());
        if !record.summary.is_empty() {
            ui.label(record.summary.as_str());
        }
        if !record.url.is_empty() {
            ui.hyperlink_to("Open article", &record.url);
        }
        ui.separator();
    }
}

/// `source · date`, with "N/A" for a missing date.
fn byline(record: &Record) -> String {
    let source = record.source.as_deref().unwrap_or("");
    let date = record
        .publication_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!("{source} · {date}")
}
