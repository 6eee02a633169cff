use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::{conversion_gaps, observed_range};
use crate::data::model::Pollutant;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets and dataset info
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Station selector ----
            ui.strong("Monitoring station");
            let current_station = state.selected_station.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("station")
                .selected_text(&current_station)
                .show_ui(ui, |ui: &mut Ui| {
                    for station in &dataset.stations {
                        if ui
                            .selectable_label(current_station == *station, station)
                            .clicked()
                        {
                            state.select_station(station.clone());
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Pollutant selector ----
            ui.strong("Pollutant");
            let current = state.selected_pollutant;
            egui::ComboBox::from_id_salt("pollutant")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for pollutant in Pollutant::ALL {
                        let text = RichText::new(pollutant.label())
                            .color(state.colors.color_for(pollutant));
                        if ui
                            .selectable_label(current == pollutant, text)
                            .clicked()
                        {
                            state.select_pollutant(pollutant);
                        }
                    }
                });
            ui.separator();

            // ---- Dataset info (debug readout) ----
            egui::CollapsingHeader::new(RichText::new("Dataset info").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    if let Some(path) = &state.source_path {
                        ui.label(format!("Source: {}", path.display()));
                    }
                    ui.label(format!("Rows: {}", dataset.len()));
                    ui.label(format!("Stations: {}", dataset.stations.len()));
                    if let Some((min, max)) = observed_range(&dataset) {
                        ui.label(format!(
                            "Range: {} – {}",
                            min.format("%Y-%m-%d %H:%M"),
                            max.format("%Y-%m-%d %H:%M")
                        ));
                    }

                    ui.add_space(4.0);
                    ui.strong("Null cells");
                    egui::Grid::new("null_cells").striped(true).show(ui, |ui: &mut Ui| {
                        for (field, nulls) in conversion_gaps(&dataset) {
                            ui.label(field);
                            ui.label(nulls.to_string());
                            ui.end_row();
                        }
                    });
                });
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
            let can_reload = state.source_path.is_some();
            if ui
                .add_enabled(can_reload, egui::Button::new("Reload"))
                .clicked()
            {
                if let Some(path) = state.source_path.clone() {
                    state.load_from_path(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} observations · {} stations",
                ds.len(),
                ds.stations.len()
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air-quality data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
