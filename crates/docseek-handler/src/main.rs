//! Docseek handler entry point.
//!
//! Runs as a stdio plugin of the launcher: one JSON request per line on
//! stdin, one JSON response per line on stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use docseek_core::backend::{RecollqBackend, SearchBackend};
use docseek_core::config::{Config, Directories};
use docseek_core::{RecollPlugin, manifest};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod stdio;

const LOG_FILE: &str = "docseek-handler.log";

/// Docseek - Recoll document search for the launcher
#[derive(Parser, Debug)]
#[command(name = "docseek-handler")]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (defaults to `~/.config/docseek/config.json`)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run a single search, print the response and exit
    #[arg(long, value_name = "QUERY", conflicts_with = "manifest")]
    query: Option<String>,

    /// Print the plugin manifest and exit
    #[arg(long)]
    manifest: bool,
}

/// Set up logging to a daily rolling file in the cache directory.
/// In debug builds, defaults to debug level; in release builds, info.
/// Stdout carries protocol frames, so nothing is ever logged there.
fn setup_logging(log_dir: &std::path::Path) -> WorkerGuard {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("docseek={default_level}")));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .init();

    if cfg!(debug_assertions) {
        let started = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        eprintln!(
            "Logging to: {} (started {started})",
            log_dir.join(LOG_FILE).display()
        );
    }

    guard
}

fn load_config(args: &Args, dirs: &Directories) -> Config {
    let path = args.config.as_deref().unwrap_or(dirs.config_file.as_path());
    match Config::load(path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}, using defaults", path.display(), e);
            Config::default()
        }
    }
}

fn handler_command() -> String {
    std::env::current_exe()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "docseek-handler".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let dirs = Directories::new()?;
    dirs.ensure_exists()
        .with_context(|| format!("Failed to create {}", dirs.config.display()))?;
    let _guard = setup_logging(&dirs.cache);

    let config = load_config(&args, &dirs);

    if args.manifest {
        let manifest = manifest(&config, &handler_command());
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    let backend = RecollqBackend::from_config(&config.backend);
    info!(
        "Starting docseek handler (backend {}, available: {})",
        backend.name(),
        backend.is_available()
    );
    let plugin = RecollPlugin::new(config, backend);

    if let Some(query) = args.query {
        let response = plugin.search(&query).await;
        let mut stdout = tokio::io::stdout();
        stdio::write_response(&mut stdout, &response).await?;
        return Ok(());
    }

    stdio::run(&plugin).await?;

    info!("Docseek handler stopped");
    Ok(())
}
