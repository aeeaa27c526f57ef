//! End-of-run summary.
//!
//! Reads the pipeline counters back out of the registry and logs a
//! per-type breakdown once the decode loop has finished. The counters are
//! process-wide, so a single run is reported as the difference between a
//! snapshot taken before it and one taken after.

use crate::metrics::{
    BROKEN_TRADES_TOTAL, BYTES_CONSUMED_TOTAL, EXECUTIONS_RECORDED_TOTAL, MESSAGES_DECODED_TOTAL,
    ORDERS_TRACKED, WINDOWS_EMITTED_TOTAL,
};
use itch_core::MessageType;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Counter snapshot for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Messages decoded, by type label. Types never seen are omitted.
    pub messages_by_type: BTreeMap<&'static str, u64>,
    pub messages_total: u64,
    pub bytes_consumed: u64,
    pub executions_recorded: u64,
    pub broken_trades: u64,
    pub windows_emitted: u64,
    pub orders_tracked: i64,
}

impl RunSummary {
    /// Snapshot the current counter values.
    pub fn collect() -> Self {
        let messages_by_type: BTreeMap<&'static str, u64> = MessageType::ALL
            .iter()
            .map(|t| {
                let label = t.as_str();
                (label, MESSAGES_DECODED_TOTAL.with_label_values(&[label]).get())
            })
            .filter(|(_, n)| *n > 0)
            .collect();
        let messages_total = messages_by_type.values().sum();

        Self {
            messages_by_type,
            messages_total,
            bytes_consumed: BYTES_CONSUMED_TOTAL.get(),
            executions_recorded: EXECUTIONS_RECORDED_TOTAL.get(),
            broken_trades: BROKEN_TRADES_TOTAL.get(),
            windows_emitted: WINDOWS_EMITTED_TOTAL.get(),
            orders_tracked: ORDERS_TRACKED.get(),
        }
    }

    /// Counter growth since `earlier`.
    ///
    /// `orders_tracked` is a gauge and keeps its current value.
    pub fn since(&self, earlier: &RunSummary) -> Self {
        let messages_by_type: BTreeMap<&'static str, u64> = self
            .messages_by_type
            .iter()
            .map(|(label, n)| {
                let before = earlier.messages_by_type.get(label).copied().unwrap_or(0);
                (*label, n.saturating_sub(before))
            })
            .filter(|(_, n)| *n > 0)
            .collect();
        let messages_total = messages_by_type.values().sum();

        Self {
            messages_by_type,
            messages_total,
            bytes_consumed: self.bytes_consumed.saturating_sub(earlier.bytes_consumed),
            executions_recorded: self
                .executions_recorded
                .saturating_sub(earlier.executions_recorded),
            broken_trades: self.broken_trades.saturating_sub(earlier.broken_trades),
            windows_emitted: self.windows_emitted.saturating_sub(earlier.windows_emitted),
            orders_tracked: self.orders_tracked,
        }
    }

    /// Output the summary to logs.
    pub fn log(&self) {
        info!("========== Run Summary ==========");
        info!(
            "Messages: {} ({} bytes)",
            self.messages_total, self.bytes_consumed
        );
        for (msg_type, count) in &self.messages_by_type {
            info!("  {:<28} {}", msg_type, count);
        }
        info!(
            "Executions: {} (broken: {})",
            self.executions_recorded, self.broken_trades
        );
        info!("Orders tracked: {}", self.orders_tracked);
        info!("VWAP windows: {}", self.windows_emitted);
        info!("=================================");
    }

    /// JSON form of the summary.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;

    #[test]
    fn test_collect_reflects_recorded_messages() {
        let label = MessageType::OrderDelete.as_str();
        Metrics::message_decoded(label, 21);
        Metrics::execution_recorded();

        let summary = RunSummary::collect();
        assert!(summary.messages_by_type.get(label).copied().unwrap_or(0) >= 1);
        assert!(summary.messages_total >= 1);
        assert!(summary.bytes_consumed >= 21);
        assert!(summary.executions_recorded >= 1);
    }

    fn summary(by_type: &[(&'static str, u64)], bytes: u64, windows: u64) -> RunSummary {
        let messages_by_type: BTreeMap<&'static str, u64> = by_type.iter().copied().collect();
        RunSummary {
            messages_total: messages_by_type.values().sum(),
            messages_by_type,
            bytes_consumed: bytes,
            executions_recorded: 0,
            broken_trades: 0,
            windows_emitted: windows,
            orders_tracked: 0,
        }
    }

    #[test]
    fn test_since_reports_one_run() {
        let first_run = summary(&[("add_order", 4), ("system_event", 2)], 200, 3);
        let after_second = summary(
            &[("add_order", 7), ("system_event", 4), ("broken_trade", 1)],
            370,
            5,
        );

        let delta = after_second.since(&first_run);
        assert_eq!(delta.messages_by_type.get("add_order"), Some(&3));
        assert_eq!(delta.messages_by_type.get("system_event"), Some(&2));
        assert_eq!(delta.messages_by_type.get("broken_trade"), Some(&1));
        assert_eq!(delta.messages_total, 6);
        assert_eq!(delta.bytes_consumed, 170);
        assert_eq!(delta.windows_emitted, 2);
    }

    #[test]
    fn test_since_drops_unchanged_types() {
        let before = summary(&[("add_order", 4), ("order_delete", 1)], 100, 1);
        let after = summary(&[("add_order", 5), ("order_delete", 1)], 136, 1);

        let delta = after.since(&before);
        assert_eq!(delta.messages_by_type.len(), 1);
        assert_eq!(delta.messages_total, 1);
        assert_eq!(delta.windows_emitted, 0);
    }

    #[test]
    fn test_since_tracks_live_counters() {
        let before = RunSummary::collect();
        Metrics::message_decoded(MessageType::CrossTrade.as_str(), 42);

        let delta = RunSummary::collect().since(&before);
        assert!(delta.messages_by_type.contains_key("cross_trade"));
        assert!(delta.bytes_consumed >= 42);
    }

    #[test]
    fn test_to_json_has_fields() {
        let json = RunSummary::collect().to_json();
        assert!(json.get("messages_total").is_some());
        assert!(json.get("windows_emitted").is_some());
    }
}
