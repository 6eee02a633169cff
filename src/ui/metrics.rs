use eframe::egui::{RichText, Ui};

use crate::data::model::Pollutant;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metric cards – per-station pollutant means
// ---------------------------------------------------------------------------

/// Render the six mean-value cards for the selected station, three per row.
pub fn summary_cards(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.summary else {
        return;
    };

    ui.heading(format!("Station summary – {}", summary.station));
    ui.add_space(4.0);

    for row in summary.means.chunks(3) {
        ui.columns(row.len(), |cols| {
            for (col, (pollutant, mean)) in cols.iter_mut().zip(row) {
                metric_card(col, state, *pollutant, *mean);
            }
        });
        ui.add_space(4.0);
    }
    ui.separator();
}

fn metric_card(ui: &mut Ui, state: &AppState, pollutant: Pollutant, mean: Option<f64>) {
    ui.group(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("Mean {}", pollutant.label()))
                .color(state.colors.color_for(pollutant))
                .strong(),
        );
        let value = match mean {
            Some(v) => format!("{v:.1} µg/m³"),
            None => "–".to_string(),
        };
        ui.label(RichText::new(value).heading());
        if pollutant == Pollutant::Pm25 {
            ui.small("WHO guideline: 25 µg/m³");
        }
    });
}
