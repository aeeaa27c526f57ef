//! Prometheus metrics for the VWAP pipeline.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. Registration only fails on a
//! duplicate metric name, which is a programming error caught on first use.

use crate::error::TelemetryResult;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

/// Decoded messages by type.
/// Labels: msg_type
pub static MESSAGES_DECODED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "itch_messages_decoded_total",
        "Total ITCH messages decoded",
        &["msg_type"]
    )
    .unwrap()
});

/// Bytes consumed from the input stream.
pub static BYTES_CONSUMED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("itch_bytes_consumed_total", "Total input bytes consumed").unwrap()
});

/// Executions recorded (order executed, executed with price, non-cross).
pub static EXECUTIONS_RECORDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "itch_executions_recorded_total",
        "Total executions recorded"
    )
    .unwrap()
});

/// Broken trades applied.
pub static BROKEN_TRADES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("itch_broken_trades_total", "Total broken trades applied").unwrap()
});

/// VWAP windows emitted.
pub static WINDOWS_EMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("itch_windows_emitted_total", "Total VWAP windows emitted").unwrap()
});

/// Orders currently held in the state store.
pub static ORDERS_TRACKED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("itch_orders_tracked", "Orders held in the state store").unwrap()
});

/// Static accessor for recording metrics.
pub struct Metrics;

impl Metrics {
    /// Record one decoded message.
    pub fn message_decoded(msg_type: &str, wire_len: u64) {
        MESSAGES_DECODED_TOTAL.with_label_values(&[msg_type]).inc();
        BYTES_CONSUMED_TOTAL.inc_by(wire_len);
    }

    /// Record an execution.
    pub fn execution_recorded() {
        EXECUTIONS_RECORDED_TOTAL.inc();
    }

    /// Record a broken trade.
    pub fn trade_broken() {
        BROKEN_TRADES_TOTAL.inc();
    }

    /// Record a completed VWAP window.
    pub fn window_emitted() {
        WINDOWS_EMITTED_TOTAL.inc();
    }

    /// Update the tracked-order gauge.
    pub fn orders_tracked(count: usize) {
        ORDERS_TRACKED.set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode_text() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_counter_by_type() {
        let before = MESSAGES_DECODED_TOTAL
            .with_label_values(&["test_metrics_type"])
            .get();
        Metrics::message_decoded("test_metrics_type", 21);
        Metrics::message_decoded("test_metrics_type", 21);
        let after = MESSAGES_DECODED_TOTAL
            .with_label_values(&["test_metrics_type"])
            .get();
        assert_eq!(after - before, 2);
    }

    #[test]
    fn test_encode_text_contains_metric_names() {
        Metrics::window_emitted();
        Metrics::orders_tracked(3);
        let text = Metrics::encode_text().unwrap();
        assert!(text.contains("itch_windows_emitted_total"));
        assert!(text.contains("itch_orders_tracked"));
    }
}
