//! spatial-pointer - pointer interaction showcase
//!
//! Runs the reference scene either headless (scripted pointer playback) or in
//! a window driven by the mouse and touch screen.

mod config;
mod headless;
mod scripted_input;
mod showcase;
mod windowed;

use anyhow::Result;
use clap::Parser;
use config::ShowcaseConfig;
use headless::HeadlessOptions;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "spatial-pointer", version, about = "Spatial pointer interaction showcase")]
struct Cli {
    /// Showcase configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without a window, playing a pointer script.
    #[arg(long)]
    headless: bool,

    /// Pointer script (JSON) for headless runs. Plays a built-in demo when omitted.
    #[arg(long, requires = "headless")]
    script: Option<PathBuf>,

    /// Write a JSONL transition trace of the headless run.
    #[arg(long, requires = "headless")]
    trace: Option<PathBuf>,

    /// Maximum number of frames for headless runs.
    #[arg(long, requires = "headless")]
    frames: Option<u64>,

    /// Write the effective configuration to this path and exit.
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    info!("Starting spatial-pointer v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => ShowcaseConfig::load_from_path(path),
        None => ShowcaseConfig::load(),
    };

    if let Some(path) = &cli.save_config {
        config.save_to_path(path)?;
        info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    if cli.headless {
        let summary = headless::run(
            &config,
            HeadlessOptions {
                script: cli.script,
                trace: cli.trace,
                frames: cli.frames,
            },
        )?;
        println!(
            "frames={} state_changes={} selected_frames={} primitive={}",
            summary.frames, summary.state_changes, summary.selected_frames, summary.primitive
        );
    } else {
        windowed::run(&config)?;
    }

    info!("spatial-pointer shutting down");
    Ok(())
}
