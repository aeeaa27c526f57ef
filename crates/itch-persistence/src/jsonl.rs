//! JSON Lines snapshot writer.
//!
//! Each line is one complete `HourlyVwapSnapshot`, so a file cut short by
//! an interrupted run still parses up to the last full line.

use crate::error::PersistenceResult;
use itch_session::HourlyVwapSnapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Buffered JSON Lines writer for snapshots.
pub struct JsonLinesWriter {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    /// Snapshots not yet written.
    buffer: Vec<HourlyVwapSnapshot>,
    max_buffer_size: usize,
    records_written: usize,
}

impl JsonLinesWriter {
    /// Create (or truncate) `path` for writing.
    pub fn create(path: impl AsRef<Path>, max_buffer_size: usize) -> PersistenceResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;

        info!(path = %path.display(), "Opened JSON Lines writer");

        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
            buffer: Vec::with_capacity(max_buffer_size),
            max_buffer_size: max_buffer_size.max(1),
            records_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshots flushed to the file so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Queue a snapshot, flushing when the buffer is full.
    pub fn add_snapshot(&mut self, snapshot: HourlyVwapSnapshot) -> PersistenceResult<()> {
        self.buffer.push(snapshot);
        if self.buffer.len() >= self.max_buffer_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write buffered snapshots to the file.
    pub fn flush(&mut self) -> PersistenceResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        if self.buffer.is_empty() {
            return Ok(());
        }

        let count = self.buffer.len();
        for snapshot in self.buffer.drain(..) {
            let json = serde_json::to_string(&snapshot)?;
            writeln!(writer, "{}", json)?;
        }
        writer.flush()?;
        self.records_written += count;

        debug!(records = count, "Flushed snapshots to JSON Lines");
        Ok(())
    }

    /// Flush and close the file.
    pub fn close(&mut self) -> PersistenceResult<()> {
        self.flush()?;
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            info!(
                path = %self.path.display(),
                records = self.records_written,
                "Closed JSON Lines writer"
            );
        }
        Ok(())
    }
}

impl Drop for JsonLinesWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(?e, "Failed to close JSON Lines writer on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::{BufRead, BufReader};
    use tempfile::TempDir;

    fn make_snapshot(window_index: u32) -> HourlyVwapSnapshot {
        HourlyVwapSnapshot {
            window_index,
            start_ns: u64::from(window_index) * 10,
            end_ns: u64::from(window_index + 1) * 10,
            vwap_by_instrument: [("AAPL".to_string(), dec!(150.25))].into_iter().collect(),
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        let file = File::open(path).unwrap();
        BufReader::new(file).lines().map_while(Result::ok).collect()
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vwap.jsonl");
        let mut writer = JsonLinesWriter::create(&path, 100).unwrap();

        for i in 0..3 {
            writer.add_snapshot(make_snapshot(i)).unwrap();
        }
        writer.close().unwrap();
        assert_eq!(writer.records_written(), 3);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        let first: HourlyVwapSnapshot = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first, make_snapshot(0));
    }

    #[test]
    fn test_buffer_flushes_when_full() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vwap.jsonl");
        let mut writer = JsonLinesWriter::create(&path, 2).unwrap();

        writer.add_snapshot(make_snapshot(0)).unwrap();
        assert_eq!(writer.records_written(), 0);
        writer.add_snapshot(make_snapshot(1)).unwrap();
        assert_eq!(writer.records_written(), 2);
        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_create_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vwap.jsonl");

        {
            let mut writer = JsonLinesWriter::create(&path, 10).unwrap();
            writer.add_snapshot(make_snapshot(0)).unwrap();
            writer.add_snapshot(make_snapshot(1)).unwrap();
        }
        assert_eq!(read_lines(&path).len(), 2, "drop flushes");

        {
            let mut writer = JsonLinesWriter::create(&path, 10).unwrap();
            writer.add_snapshot(make_snapshot(2)).unwrap();
        }
        assert_eq!(read_lines(&path).len(), 1);
    }

    #[test]
    fn test_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.jsonl");
        let mut writer = JsonLinesWriter::create(&path, 10).unwrap();
        writer.close().unwrap();
        assert!(path.exists());
    }
}
