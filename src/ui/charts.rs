use std::f64::consts::TAU;

use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Polygon};

use witness_dashboard::data::aggregate::CategoryCounts;

use crate::color::CategoryColors;

const CHART_HEIGHT: f32 = 320.0;
/// Inner radius of the donut, relative to the outer radius.
const HOLE: f64 = 0.3;
/// Angular step of one donut segment.
const SEGMENT: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Emotion distribution (donut chart)
// ---------------------------------------------------------------------------

/// Render `counts` as a donut chart, largest slice first.
pub fn emotion_chart(ui: &mut Ui, counts: &CategoryCounts, colors: &CategoryColors) {
    ui.heading("Emotion Distribution");
    if counts.is_empty() {
        ui.label("No emotion data available for the current filter.");
        return;
    }

    let total = counts.total() as f64;
    let entries = counts.by_count_desc();

    Plot::new("emotion_chart")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_background(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (label, count) in entries {
                let sweep = count as f64 / total * TAU;
                let name = format!("{label}  {count} ({:.1}%)", 100.0 * count as f64 / total);
                let color = colors.color_for(label);

                // Egui fills polygons as convex shapes, so each slice is
                // drawn as a run of thin ring segments sharing one name.
                for (a, b) in slice_segments(start, start + sweep) {
                    let polygon = Polygon::new(ring_segment(a, b))
                        .name(&name)
                        .fill_color(color)
                        .stroke(Stroke::new(0.0, color));
                    plot_ui.polygon(polygon);
                }
                start += sweep;
            }
        });
}

/// Split the angle interval `[start, end]` into steps no wider than
/// [`SEGMENT`].
fn slice_segments(start: f64, end: f64) -> Vec<(f64, f64)> {
    let steps = ((end - start) / SEGMENT - 1e-9).ceil().max(1.0) as usize;
    let step = (end - start) / steps as f64;
    (0..steps)
        .map(|i| (start + i as f64 * step, start + (i + 1) as f64 * step))
        .collect()
}

/// Quad between the inner and outer radius, clockwise from 12 o'clock.
fn ring_segment(a: f64, b: f64) -> Vec<[f64; 2]> {
    let point = |angle: f64, radius: f64| [radius * angle.sin(), radius * angle.cos()];
    vec![point(a, 1.0), point(b, 1.0), point(b, HOLE), point(a, HOLE)]
}

// ---------------------------------------------------------------------------
// Theme distribution (bar chart)
// ---------------------------------------------------------------------------

/// Render `counts` as a bar chart, tallest bar first.
pub fn theme_chart(ui: &mut Ui, counts: &CategoryCounts, colors: &CategoryColors) {
    ui.heading("Theme Distribution");
    if counts.is_empty() {
        ui.label("No theme data available for the current filter.");
        return;
    }

    let entries = counts.by_count_desc();
    let labels: Vec<String> = entries.iter().map(|(label, _)| label.to_string()).collect();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(*label)
                .fill(colors.color_for(label))
                .width(0.7)
        })
        .collect();

    Plot::new("theme_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Thematic Label")
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Count"));
        });
}

/// Tick label for bar position `value`; blank between bars.
fn axis_label(labels: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}
