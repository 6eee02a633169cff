use chrono::{DateTime, Datelike};
use eframe::egui::Ui;
use egui_plot::{Line, Plot, Points};

use crate::data::aggregate::observed_range;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Monthly trend chart (central panel)
// ---------------------------------------------------------------------------

/// Render the monthly-mean trend chart for the selected pollutant.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view air quality  (File → Open…)");
        });
        return;
    };

    let pollutant = state.selected_pollutant;

    ui.heading("Temporal analysis");
    if let Some((min, max)) = observed_range(dataset) {
        ui.label(format!(
            "{} trend ({}–{})",
            pollutant.label(),
            min.year(),
            max.year()
        ));
    }

    if state.monthly.is_empty() {
        ui.label(format!("No valid {} observations to plot.", pollutant.label()));
        return;
    }

    let color = state.colors.color_for(pollutant);
    let coords: Vec<[f64; 2]> = state
        .monthly
        .iter()
        .map(|p| [p.bucket.and_utc().timestamp() as f64, p.mean])
        .collect();

    Plot::new("trend_plot")
        .x_axis_label("Date")
        .y_axis_label(format!("{} concentration (µg/m³)", pollutant.label()))
        .x_axis_formatter(|mark, _range| format_month(mark.value))
        .label_formatter(move |_name, value| {
            format!("{}\n{:.1} µg/m³", format_month(value.x), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(coords.clone())
                    .name(pollutant.label())
                    .color(color)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(coords)
                    .name(pollutant.label())
                    .color(color)
                    .radius(2.5),
            );
        });
}

/// Format a unix-epoch x coordinate as `YYYY-MM`.
fn format_month(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m").to_string())
        .unwrap_or_default()
}
