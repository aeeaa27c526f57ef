//! Session driver.
//!
//! Runs the decode loop and the `AwaitingStart -> InSession -> Closed`
//! state machine. Each step decodes one message and applies it to the
//! state store, then:
//!
//! 1. while awaiting start, looks up the start event in the store;
//! 2. while in session, closes every window whose end boundary the
//!    message timestamp has reached;
//! 3. on the close event, closes the current (partial) window at the close
//!    timestamp and stops reading.
//!
//! The message's own effect is always applied before any window it closes
//! is aggregated: a broken trade whose timestamp crosses a boundary
//! already zeroes its execution in the window being closed.

use crate::aggregator::compute;
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::snapshot::HourlyVwapSnapshot;
use itch_core::format_nanos;
use itch_feed::{decode, Decoded, DispatchTable, Effect, MessageFramer, StateStore};
use itch_telemetry::Metrics;
use std::io::Read;
use tracing::{debug, error, info, warn};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No start event seen yet.
    AwaitingStart,
    /// Session open; `window_index` is the window currently accumulating.
    InSession { start: u64, window_index: u32 },
    /// Close event processed; no further messages are read.
    Closed,
}

/// How the decode loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Close event observed; the final partial window was emitted.
    Closed,
    /// Stream ended first; only completed windows were emitted.
    EndOfStream,
}

/// Result of one session run.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub snapshots: Vec<HourlyVwapSnapshot>,
    pub termination: Termination,
    pub messages_decoded: u64,
    pub bytes_consumed: u64,
}

/// Drives one trading session over a framed ITCH stream.
pub struct SessionDriver {
    config: SessionConfig,
    window_ns: u64,
    table: DispatchTable,
    store: StateStore,
    state: SessionState,
    snapshots: Vec<HourlyVwapSnapshot>,
    messages_decoded: u64,
}

impl SessionDriver {
    /// Create a driver. Fails if the configuration is invalid.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self {
            window_ns: config.window_ns(),
            config,
            table: DispatchTable::new(),
            store: StateStore::new(),
            state: SessionState::AwaitingStart,
            snapshots: Vec::new(),
            messages_decoded: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Order/execution state accumulated so far.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Decode `reader` until the close event or end of stream.
    ///
    /// Any framing, decoding or referential-integrity fault aborts the run.
    pub fn run<R: Read>(&mut self, reader: R) -> SessionResult<SessionOutcome> {
        let mut framer = MessageFramer::new(reader);

        let termination = loop {
            if self.state == SessionState::Closed {
                break Termination::Closed;
            }

            let raw = match framer.next_message(&self.table) {
                Ok(Some(raw)) => raw,
                Ok(None) => break Termination::EndOfStream,
                Err(e) => {
                    error!(error = %e, offset = ?e.offset(), "Framing fault");
                    return Err(e.into());
                }
            };
            let wire_len = raw.wire_len();
            let decoded = match decode(&raw, &mut self.store) {
                Ok(decoded) => decoded,
                Err(e) => {
                    error!(error = %e, offset = ?e.offset(), "Decode fault");
                    return Err(e.into());
                }
            };

            self.messages_decoded += 1;
            Metrics::message_decoded(decoded.msg_type.as_str(), wire_len);
            self.step(&decoded);
        };

        Metrics::orders_tracked(self.store.order_count());
        let bytes_consumed = framer.offset();

        match termination {
            Termination::Closed => info!(
                windows = self.snapshots.len(),
                messages = self.messages_decoded,
                bytes = bytes_consumed,
                "Session closed"
            ),
            Termination::EndOfStream => {
                if self.state == SessionState::AwaitingStart {
                    warn!(
                        messages = self.messages_decoded,
                        start_event = %self.config.start_event_code,
                        "Stream ended before session start"
                    );
                } else {
                    warn!(
                        windows = self.snapshots.len(),
                        messages = self.messages_decoded,
                        "Stream ended before session close, partial window dropped"
                    );
                }
            }
        }

        Ok(SessionOutcome {
            snapshots: std::mem::take(&mut self.snapshots),
            termination,
            messages_decoded: self.messages_decoded,
            bytes_consumed,
        })
    }

    /// Apply session transitions for one decoded message.
    fn step(&mut self, decoded: &Decoded) {
        let ts = decoded.timestamp();

        match decoded.effect {
            Effect::ExecutionRecorded { .. } => Metrics::execution_recorded(),
            Effect::TradeBroken { .. } => Metrics::trade_broken(),
            _ => {}
        }

        if self.state == SessionState::AwaitingStart {
            if let Some(event) = self.store.system_event(self.config.start_event_code) {
                info!(
                    start = event.timestamp,
                    time = %format_nanos(event.timestamp),
                    "Trading session started"
                );
                self.state = SessionState::InSession {
                    start: event.timestamp,
                    window_index: 0,
                };
            }
        }

        if let SessionState::InSession { start, .. } = self.state {
            while let SessionState::InSession { window_index, .. } = self.state {
                if ts < self.window_start(start, window_index + 1) {
                    break;
                }
                self.close_window(start, window_index, ts);
                self.state = SessionState::InSession {
                    start,
                    window_index: window_index + 1,
                };
            }
        }

        if decoded.effect != Effect::SystemEvent(self.config.close_event_code) {
            return;
        }
        match self.state {
            SessionState::InSession {
                start,
                window_index,
            } => {
                let close = self
                    .store
                    .system_event(self.config.close_event_code)
                    .map_or(ts, |event| event.timestamp);
                info!(
                    close,
                    time = %format_nanos(close),
                    "Trading session closed"
                );
                self.close_window(start, window_index, close);
                self.state = SessionState::Closed;
            }
            SessionState::AwaitingStart => {
                info!(
                    timestamp = ts,
                    time = %format_nanos(ts),
                    "Close event before session start, ignoring"
                );
            }
            SessionState::Closed => {}
        }
    }

    /// Start boundary of window `index`.
    fn window_start(&self, start: u64, index: u32) -> u64 {
        start.saturating_add(u64::from(index).saturating_mul(self.window_ns))
    }

    fn close_window(&mut self, start: u64, window_index: u32, end: u64) {
        let window_start = self.window_start(start, window_index);
        let aggregates = compute(self.store.executions(), window_start, end);
        let snapshot =
            HourlyVwapSnapshot::from_aggregates(window_index, window_start, end, aggregates);

        info!(
            window = window_index + 1,
            instruments = snapshot.len(),
            from = %format_nanos(window_start),
            to = %format_nanos(end),
            "VWAP window calculated"
        );
        debug!(window = window_index + 1, vwaps = ?snapshot.vwap_by_instrument, "Window VWAPs");

        Metrics::window_emitted();
        Metrics::orders_tracked(self.store.order_count());
        self.snapshots.push(snapshot);
    }
}
