mod app;
mod config;
mod data;
mod error;
mod headless;
mod pipeline;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::SheetSiftApp;
use clap::Parser;
use config::Cli;
use eframe::egui;
use pipeline::Pipeline;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.is_headless() {
        return headless::run(&cli);
    }

    let pipeline = Pipeline::from_config(&cli.config).context("building HTTP client")?;
    let state = AppState::new(pipeline, cli.config.download_name.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 520.0])
            .with_min_inner_size([600.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sheet Sift – Google Sheet Filter",
        options,
        Box::new(move |_cc| Ok(Box::new(SheetSiftApp::new(state)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}
