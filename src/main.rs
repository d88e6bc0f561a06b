//! Recruit Kiosk - recruitment fair check-in kiosk.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use recruit_kiosk as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::client::CheckInClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::{KioskApp, fonts};

/// Recruitment fair check-in kiosk.
#[derive(Parser)]
#[command(name = "recruit-kiosk")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a config file with default values and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging();

    tracing::info!("Recruit Kiosk starting...");

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("config.toml")
        }
        (None, false) => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    if cli.write_default_config {
        AppConfig::default()
            .save(&config_path)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        tracing::info!("Default config written");
        return Ok(());
    }

    let (config, startup_error) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            (config, None)
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, using built-in defaults");
            (AppConfig::default(), None)
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            (AppConfig::default(), Some(e.to_string()))
        }
    };

    run_kiosk(config, startup_error)
}

/// Console logging plus a daily log file when a data directory is available.
fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let file = log_dir().and_then(|dir| match std::fs::create_dir_all(&dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&dir, "recruit-kiosk.log");
            Some(tracing_appender::non_blocking(appender))
        }
        Err(e) => {
            eprintln!("Log directory {} unavailable: {e}", dir.display());
            None
        }
    });
    let (file_layer, guard) = match file {
        Some((writer, guard)) => (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("edu", "ABC Department", "Recruit Kiosk").map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Run the kiosk window.
fn run_kiosk(config: AppConfig, startup_error: Option<String>) -> anyhow::Result<()> {
    let title = format!("{} - Recruitment {}", config.kiosk.department_name, config.kiosk.year);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_fullscreen(config.ui.fullscreen),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    let client = CheckInClient::new(&config.server).context("failed to build HTTP client")?;
    tracing::info!("Backend: {}", client.base_url());

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            fonts::install(&cc.egui_ctx, config.ui.font_path.as_deref());
            Ok(Box::new(KioskApp::new(config, rt, client, startup_error)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
