mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use app::SchoolDashboardApp;
use chrono::Local;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let base = config::program_dir();
    let config = Config::load(&base).unwrap_or_else(|e| {
        log::warn!("Using default configuration: {e:#}");
        Config::default()
    });
    let data_dir = config.resolve_data_dir(&base);
    log::info!("Reading resources from {}", data_dir.display());

    let state = AppState::new(data_dir, config.default_range_days, Local::now().date_naive());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "School Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SchoolDashboardApp::new(state)))),
    )
}
