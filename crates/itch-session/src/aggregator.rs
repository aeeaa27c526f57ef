//! Per-instrument volume and notional over a time window.

use itch_core::{vwap_from_raw, ExecutionRecord};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Printable volume and raw-unit notional for one instrument in one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockAggregate {
    pub volume: u64,
    /// Sum of `shares * raw_price`, still carrying 4 implied decimals.
    pub notional: u128,
}

impl StockAggregate {
    pub fn add(&mut self, shares: u32, notional: u128) {
        self.volume += u64::from(shares);
        self.notional += notional;
    }

    /// Volume-weighted average price, `None` when nothing traded.
    pub fn vwap(&self) -> Option<Decimal> {
        vwap_from_raw(self.notional, self.volume)
    }
}

/// Aggregate every printable execution with `start <= timestamp < end`.
///
/// Scans the full execution map. Instruments whose qualifying executions
/// were all broken still appear with zero volume; callers drop them when
/// deriving VWAP.
pub fn compute(
    executions: &HashMap<u64, ExecutionRecord>,
    start: u64,
    end: u64,
) -> BTreeMap<String, StockAggregate> {
    let mut by_instrument: BTreeMap<String, StockAggregate> = BTreeMap::new();

    for exec in executions.values() {
        if !exec.printable.is_printable() || exec.timestamp < start || exec.timestamp >= end {
            continue;
        }
        // Avoid allocating a key for the common repeat-instrument case.
        match by_instrument.get_mut(&exec.instrument) {
            Some(agg) => agg.add(exec.executed_shares, exec.notional()),
            None => {
                let mut agg = StockAggregate::default();
                agg.add(exec.executed_shares, exec.notional());
                by_instrument.insert(exec.instrument.clone(), agg);
            }
        }
    }

    by_instrument
}
