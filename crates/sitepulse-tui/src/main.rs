//! `sitepulse-tui`: live terminal dashboard for site status.
//!
//! Two screens, Status (paginated table of the current cycle) and
//! Locations (per-location counts), fed by a background data bridge that
//! forwards [`Monitor`](sitepulse_core::Monitor) board writes as actions.
//!
//! Logs go to a file (default `<temp dir>/sitepulse-tui.log`) so they never
//! corrupt the terminal.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod overlay;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sitepulse_core::Monitor;

use crate::app::App;

/// Terminal dashboard for site status.
#[derive(Parser, Debug)]
#[command(name = "sitepulse-tui", version, about)]
struct Cli {
    /// Backend base URL (overrides config)
    #[arg(short = 'b', long, env = "SITEPULSE_BACKEND_URL")]
    backend_url: Option<String>,

    /// Config file path
    #[arg(long, env = "SITEPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Accept invalid TLS certificates
    #[arg(short = 'k', long, env = "SITEPULSE_INSECURE")]
    insecure: bool,

    /// Log file path (defaults to <temp dir>/sitepulse-tui.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Hold the guard for the app's lifetime so the
/// writer flushes.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("sitepulse_tui={level},sitepulse_core={level},sitepulse_api={level}"))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("sitepulse-tui.log"));
    let log_dir = log_file
        .parent()
        .map_or_else(std::env::temp_dir, std::path::Path::to_path_buf);
    let log_name = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("sitepulse-tui.log"))
        .to_owned();

    let appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Config file + env, then flag overrides.
fn load_config(cli: &Cli) -> Result<sitepulse_config::Config> {
    let mut cfg = sitepulse_config::load_config(cli.config.as_deref())?;
    if let Some(ref url) = cli.backend_url {
        cfg.backend_url = Some(url.clone());
    }
    if cli.insecure {
        cfg.insecure = true;
    }
    if cfg.backend_url.as_deref().is_none_or(|u| u.trim().is_empty()) {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(sitepulse_config::config_path);
        return Err(eyre!(
            "no backend URL configured; set backend_url in {}, export SITEPULSE_BACKEND_URL, or pass --backend-url",
            path.display()
        ));
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let cfg = load_config(&cli)?;
    let monitor = Monitor::new(sitepulse_config::to_monitor_config(&cfg)?)?;
    info!(
        backend = %monitor.config().backend_url,
        strategy = %monitor.config().strategy,
        "starting sitepulse-tui"
    );

    let mut app = App::new(monitor, cfg.page_size);
    app.run().await?;

    Ok(())
}
