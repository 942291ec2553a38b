#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Daily pallet delivery log with per-supplier totals and an undoable history.
#[derive(Parser, Debug)]
#[command(name = "pallet-log", version, about)]
struct Cli {
    /// Directory holding the delivery database.
    #[arg(long = "data-dir", value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the one next to the executable.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep deliveries in memory; nothing is saved.
    #[arg(long = "in-memory", conflicts_with = "data_dir")]
    in_memory: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting pallet-log");

    let startup_args = pallet_log_ui::StartupArgs {
        config_path: cli.config,
        data_dir: cli.data_dir,
        in_memory: cli.in_memory,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pallet Log")
            .with_inner_size([560.0, 780.0])
            .with_min_inner_size([380.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "pallet-log",
        native_options,
        Box::new(move |cc| Ok(Box::new(pallet_log_ui::App::new(cc, startup_args)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
