//! MBTI Atlas - MBTI distribution dashboard
//!
//! Reads a country-by-type CSV and opens the interactive dashboard.

use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use env_logger::Env;
use mbti_atlas::{DashboardConfig, MbtiAtlasApp};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "MBTI distribution by country, as a dashboard")]
struct Args {
    /// CSV file with a Country column and one column per MBTI type
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON file overriding dashboard defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = args.data {
        config.data_path = data;
    }
    log::info!("Starting with data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("MBTI Atlas"),
        ..Default::default()
    };

    eframe::run_native(
        "MBTI Atlas",
        options,
        Box::new(move |cc| Ok(Box::new(MbtiAtlasApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
