mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::BikeDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args().skip(1));

    // A missing or malformed dataset is a startup failure.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("cannot start without {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} records from {}",
        dataset.len(),
        config.data_path.display()
    );

    let mut state = AppState::default();
    state.set_dataset(dataset, Some(config.data_path.clone()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BikeDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
