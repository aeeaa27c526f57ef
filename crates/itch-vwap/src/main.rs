//! ITCH 5.0 hourly VWAP - Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use itch_persistence::ExportFormat;
use itch_vwap::{AppConfig, Application};
use std::path::PathBuf;
use tracing::info;

/// Compute hourly VWAP per instrument from a NASDAQ ITCH 5.0 feed file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// ITCH 5.0 feed file
    input: PathBuf,

    /// Configuration file path (can also be set via ITCH_VWAP_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Output file (default: <input>.csv or <input>.jsonl)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: csv or jsonl
    #[arg(short, long)]
    format: Option<ExportFormat>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    itch_telemetry::init_logging()?;

    info!("Starting itch-vwap v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > ITCH_VWAP_CONFIG env var > built-in defaults
    let config_path = args
        .config
        .or_else(|| std::env::var("ITCH_VWAP_CONFIG").ok());

    let mut config = match &config_path {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(output) = args.output {
        config.output.path = Some(output);
    }
    info!(
        start_event = %config.session.start_event_code,
        close_event = %config.session.close_event_code,
        window_secs = config.session.window_secs,
        format = %config.output.format,
        "Configuration loaded"
    );

    let app = Application::new(config)?;
    let report = app
        .run(&args.input)
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    info!(
        output = %report.output_path.display(),
        windows = report.windows,
        termination = ?report.termination,
        "Done"
    );
    Ok(())
}
