//! Export entry point.

use crate::error::{PersistenceError, PersistenceResult};
use crate::jsonl::JsonLinesWriter;
use crate::table::write_vwap_table;
use itch_session::HourlyVwapSnapshot;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Output layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Wide table, one column per window.
    #[default]
    Csv,
    /// One snapshot per line.
    Jsonl,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" | "json" => Ok(Self::Jsonl),
            _ => Err(PersistenceError::UnknownFormat(s.to_string())),
        }
    }
}

/// Output path next to the input: `feed.bin` becomes `feed.bin.csv`.
pub fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Write `snapshots` to `path` in the given format.
///
/// Returns the number of records written: instrument rows for CSV,
/// snapshots for JSON Lines.
pub fn export_to_path(
    snapshots: &[HourlyVwapSnapshot],
    format: ExportFormat,
    path: &Path,
) -> PersistenceResult<usize> {
    let written = match format {
        ExportFormat::Csv => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            write_vwap_table(snapshots, BufWriter::new(file))?
        }
        ExportFormat::Jsonl => {
            let mut writer = JsonLinesWriter::create(path, snapshots.len().max(1))?;
            for snapshot in snapshots {
                writer.add_snapshot(snapshot.clone())?;
            }
            writer.close()?;
            writer.records_written()
        }
    };

    info!(
        path = %path.display(),
        %format,
        windows = snapshots.len(),
        records = written,
        "Exported VWAP snapshots"
    );
    Ok(written)
}
