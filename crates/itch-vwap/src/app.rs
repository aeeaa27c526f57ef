//! Application runner.
//!
//! One run reads one feed file: open the input, drive the session to its
//! close (or end of stream), export the snapshots, then report.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use itch_core::format_nanos;
use itch_persistence::{default_output_path, export_to_path};
use itch_session::{SessionDriver, Termination};
use itch_telemetry::{Metrics, RunSummary};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Read buffer for the input feed.
const INPUT_BUFFER_SIZE: usize = 1 << 20;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub windows: usize,
    pub records_written: usize,
    pub termination: Termination,
    pub messages_decoded: u64,
    pub bytes_consumed: u64,
}

/// Main application.
pub struct Application {
    config: AppConfig,
}

impl Application {
    /// Create an application from a validated configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Output path for `input`: the configured path, else next to the input.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        self.config
            .output
            .path
            .clone()
            .unwrap_or_else(|| default_output_path(input, self.config.output.format))
    }

    /// Process one feed file.
    pub fn run(&self, input: &Path) -> AppResult<RunReport> {
        let started = Instant::now();
        let counters_before = RunSummary::collect();
        let file = File::open(input).map_err(|source| AppError::Input {
            path: input.to_path_buf(),
            source,
        })?;
        info!(input = %input.display(), "Processing feed");

        let mut driver = SessionDriver::new(self.config.session.clone())?;
        let outcome = driver.run(BufReader::with_capacity(INPUT_BUFFER_SIZE, file))?;

        if let (Some(first), Some(last)) = (outcome.snapshots.first(), outcome.snapshots.last()) {
            info!(
                windows = outcome.snapshots.len(),
                from = %format_nanos(first.start_ns),
                to = %format_nanos(last.end_ns),
                "Session windows"
            );
        }

        let output_path = self.output_path(input);
        let records_written =
            export_to_path(&outcome.snapshots, self.config.output.format, &output_path)?;

        RunSummary::collect().since(&counters_before).log();
        if let Some(metrics_path) = &self.config.output.metrics_path {
            std::fs::write(metrics_path, Metrics::encode_text()?)?;
            info!(path = %metrics_path.display(), "Wrote metrics");
        }

        info!(
            output = %output_path.display(),
            messages = outcome.messages_decoded,
            bytes = outcome.bytes_consumed,
            windows = outcome.snapshots.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Run complete"
        );

        Ok(RunReport {
            output_path,
            windows: outcome.snapshots.len(),
            records_written,
            termination: outcome.termination,
            messages_decoded: outcome.messages_decoded,
            bytes_consumed: outcome.bytes_consumed,
        })
    }
}
