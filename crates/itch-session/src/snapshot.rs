//! Hourly VWAP snapshot.

use crate::aggregator::StockAggregate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// VWAP per instrument for one window.
///
/// Instruments with no printable volume in the window are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyVwapSnapshot {
    /// Zero-based window index within the session.
    pub window_index: u32,
    /// Window start, nanoseconds since midnight (inclusive).
    pub start_ns: u64,
    /// Window end, nanoseconds since midnight (exclusive).
    pub end_ns: u64,
    pub vwap_by_instrument: BTreeMap<String, Decimal>,
}

impl HourlyVwapSnapshot {
    /// Build a snapshot from per-instrument aggregates.
    pub fn from_aggregates(
        window_index: u32,
        start_ns: u64,
        end_ns: u64,
        aggregates: BTreeMap<String, StockAggregate>,
    ) -> Self {
        let vwap_by_instrument = aggregates
            .into_iter()
            .filter_map(|(instrument, agg)| match agg.vwap() {
                Some(vwap) => Some((instrument, vwap)),
                None => {
                    if agg.volume > 0 {
                        warn!(
                            %instrument,
                            volume = agg.volume,
                            notional = %agg.notional,
                            window_index,
                            "VWAP not representable, omitting instrument"
                        );
                    }
                    None
                }
            })
            .collect();

        Self {
            window_index,
            start_ns,
            end_ns,
            vwap_by_instrument,
        }
    }

    pub fn vwap(&self, instrument: &str) -> Option<Decimal> {
        self.vwap_by_instrument.get(instrument).copied()
    }

    pub fn len(&self) -> usize {
        self.vwap_by_instrument.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vwap_by_instrument.is_empty()
    }

    /// Window length in nanoseconds.
    pub fn duration_ns(&self) -> u64 {
        self.end_ns.saturating_sub(self.start_ns)
    }
}
