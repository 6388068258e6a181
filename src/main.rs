mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Result};
use app::DashboardApp;
use eframe::egui;

use witness_dashboard::config::{DashboardConfig, CONFIG_FILE_NAME};

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?
        .with_args(std::env::args().skip(1));
    log::info!("Dataset: {}", config.dataset_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(&config)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
