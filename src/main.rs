mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::UfoScopeApp;
use eframe::egui;
use state::AppState;

/// Dataset read when no path is given on the command line.
const DEFAULT_DATASET: &str = "ufo-sightings-transformed.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET.to_string());

    // The dashboard never opens without its dataset.
    let dataset = match data::loader::load(Path::new(&path)) {
        Ok(dataset) => {
            if dataset.is_empty() {
                log::warn!("{path} contains no sightings");
            }
            log::info!("loaded {} sightings from {path}", dataset.len());
            dataset
        }
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "UFO Sightings Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(UfoScopeApp::new(AppState::new(dataset))))),
    )
}
