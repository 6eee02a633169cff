use eframe::egui;

use crate::state::AppState;
use crate::ui::{metrics, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SmogViewApp {
    pub state: AppState,
}

impl Default for SmogViewApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for SmogViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: station / pollutant selection ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metric cards + trend chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            metrics::summary_cards(ui, &self.state);
            plot::trend_plot(ui, &self.state);
        });
    }
}
