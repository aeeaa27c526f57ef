//! Order, execution and system-event state.
//!
//! Three keyed maps mutated by the decoders and read by the aggregator.
//! Orders and executions are never removed: cancels and deletes only carry
//! a timestamp for this pipeline, and a broken trade zeroes its record in
//! place so it stays indexable by match number.

use itch_core::{EventCode, ExecutionRecord, Order, SystemEvent};
use std::collections::HashMap;
use tracing::trace;

/// State accumulated over one session.
#[derive(Debug, Default)]
pub struct StateStore {
    orders: HashMap<u64, Order>,
    executions: HashMap<u64, ExecutionRecord>,
    system_events: HashMap<EventCode, SystemEvent>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order. A repeated reference number replaces the entry.
    pub fn insert_order(&mut self, order: Order) {
        if let Some(prev) = self.orders.insert(order.reference, order) {
            trace!(reference = prev.reference, "Order reference reused");
        }
    }

    pub fn order(&self, reference: u64) -> Option<&Order> {
        self.orders.get(&reference)
    }

    /// Insert an execution. A repeated match number replaces the entry.
    pub fn insert_execution(&mut self, execution: ExecutionRecord) {
        if let Some(prev) = self.executions.insert(execution.match_number, execution) {
            trace!(match_number = prev.match_number, "Match number reused");
        }
    }

    pub fn execution(&self, match_number: u64) -> Option<&ExecutionRecord> {
        self.executions.get(&match_number)
    }

    /// Zero the executed shares of a prior execution.
    ///
    /// Returns `None` if no execution has this match number.
    pub fn break_trade(&mut self, match_number: u64) -> Option<&ExecutionRecord> {
        let exec = self.executions.get_mut(&match_number)?;
        exec.bust();
        Some(exec)
    }

    /// Record a system event, replacing any earlier event with the same code.
    pub fn upsert_system_event(&mut self, event: SystemEvent) {
        self.system_events.insert(event.event_code, event);
    }

    /// Latest system event for `code`, if one has been seen.
    pub fn system_event(&self, code: EventCode) -> Option<&SystemEvent> {
        self.system_events.get(&code)
    }

    /// All executions, keyed by match number.
    pub fn executions(&self) -> &HashMap<u64, ExecutionRecord> {
        &self.executions
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn execution_count(&self) -> usize {
        self.executions.len()
    }
}
