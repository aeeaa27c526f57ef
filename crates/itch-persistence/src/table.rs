//! Wide CSV table of VWAPs.
//!
//! Snapshots are outer-joined on instrument: every instrument that has a
//! VWAP in any window gets a row, and a window where it did not trade is
//! left as an empty cell.
//!
//! ```text
//! stock,VWAP1,VWAP2,VWAP3
//! AAPL,150.0000,,151.2500
//! MSFT,175.0000,176.1000,
//! ```

use crate::error::PersistenceResult;
use itch_session::HourlyVwapSnapshot;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Decimal places written for each VWAP cell.
const VWAP_DECIMALS: u32 = 4;

/// Instrument-by-window VWAP matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VwapTable {
    columns: Vec<String>,
    rows: BTreeMap<String, Vec<Option<Decimal>>>,
}

impl VwapTable {
    /// Outer-join snapshots into one table, in snapshot order.
    pub fn from_snapshots(snapshots: &[HourlyVwapSnapshot]) -> Self {
        let columns = snapshots
            .iter()
            .map(|s| format!("VWAP{}", s.window_index + 1))
            .collect();

        let mut rows: BTreeMap<String, Vec<Option<Decimal>>> = BTreeMap::new();
        for (col, snapshot) in snapshots.iter().enumerate() {
            for (instrument, vwap) in &snapshot.vwap_by_instrument {
                let row = rows
                    .entry(instrument.clone())
                    .or_insert_with(|| vec![None; snapshots.len()]);
                row[col] = Some(*vwap);
            }
        }

        Self { columns, rows }
    }

    /// Window column labels (`VWAP1`, `VWAP2`, ...).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// VWAP cell for an instrument and zero-based column.
    pub fn cell(&self, instrument: &str, column: usize) -> Option<Decimal> {
        self.rows.get(instrument)?.get(column).copied().flatten()
    }

    pub fn instruments(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Write the table as CSV. Returns the number of instrument rows.
    pub fn write<W: Write>(&self, writer: W) -> PersistenceResult<usize> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("stock");
        header.extend(self.columns.iter().map(String::as_str));
        wtr.write_record(&header)?;

        for (instrument, cells) in &self.rows {
            let mut record = Vec::with_capacity(cells.len() + 1);
            record.push(instrument.clone());
            record.extend(cells.iter().map(|cell| match cell {
                Some(vwap) => format_vwap(*vwap),
                None => String::new(),
            }));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;

        debug!(
            rows = self.rows.len(),
            windows = self.columns.len(),
            "Wrote VWAP table"
        );
        Ok(self.rows.len())
    }
}

/// Round half away from zero to [`VWAP_DECIMALS`] places, zero-padded.
fn format_vwap(vwap: Decimal) -> String {
    let rounded =
        vwap.round_dp_with_strategy(VWAP_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", VWAP_DECIMALS as usize, rounded)
}

/// Write `snapshots` as a wide CSV table.
pub fn write_vwap_table<W: Write>(
    snapshots: &[HourlyVwapSnapshot],
    writer: W,
) -> PersistenceResult<usize> {
    VwapTable::from_snapshots(snapshots).write(writer)
}
