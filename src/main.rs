#![allow(non_snake_case)]

mod app;
mod components;
mod context;
mod pages;
mod theme;

use std::path::PathBuf;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use trapihaus_core::logging::LoggingBuilder;
use trapihaus_core::SessionConfig;

/// TrapiHaus - find your next stay
#[derive(Parser, Debug)]
#[command(name = "trapihaus-desktop")]
#[command(about = "TrapiHaus property listings")]
struct Args {
    /// Data directory for the session store and logs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log only to the JSONL file, not the console
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.data_dir {
        Some(dir) => SessionConfig::new(dir),
        None => SessionConfig::from_env(),
    };

    let mut logging = LoggingBuilder::new(config.logs_dir(), "desktop")
        .with_filter("trapihaus=info,trapihaus_core=info");
    if args.quiet {
        logging = logging.no_console();
    }
    match logging.init() {
        Ok(path) => tracing::info!("Logging to {}", path.display()),
        Err(e) => {
            tracing_subscriber::fmt().try_init().map_err(anyhow::Error::msg)?;
            tracing::warn!("JSONL logging unavailable: {}", e);
        }
    }

    tracing::info!("Starting TrapiHaus with data dir: {:?}", config.data_dir);

    // Phone-shaped window
    let window = Config::new().with_window(
        WindowBuilder::new()
            .with_title("TrapiHaus")
            .with_inner_size(LogicalSize::new(430.0, 900.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .with_context(config)
        .launch(app::App);

    Ok(())
}
