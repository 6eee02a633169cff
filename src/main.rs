use std::path::PathBuf;

use eframe::egui;
use smogview::app::SmogViewApp;

fn main() -> eframe::Result {
    env_logger::init();

    let data_path = startup_data_path();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SmogView – Air Quality Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = SmogViewApp::default();
            if let Some(path) = &data_path {
                app.state.load_from_path(path);
            }
            Ok(Box::new(app))
        }),
    )
}

/// Dataset location: first CLI argument, else the `SMOGVIEW_DATA` environment
/// variable. Without either the app starts empty and the user opens a file
/// through the menu.
fn startup_data_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("SMOGVIEW_DATA").map(PathBuf::from))
}
