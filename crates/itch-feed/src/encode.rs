//! Synthetic feed construction.
//!
//! Builds byte-exact framed ITCH 5.0 messages for tests and fixtures.
//! Every message gets a correct length prefix, stock locate 1 and an
//! incrementing tracking number; fields not needed for VWAP are zero-filled.

use itch_core::{EventCode, MessageType, Printable, Side};

/// Chainable builder for a framed message stream.
#[derive(Debug, Default, Clone)]
pub struct FeedBuilder {
    bytes: Vec<u8>,
    tracking_number: u16,
}

impl FeedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish and return the stream bytes.
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn system_event(self, timestamp: u64, code: EventCode) -> Self {
        self.message(MessageType::SystemEvent, timestamp, |b| b.push(code.as_byte()))
    }

    pub fn add_order(
        self,
        timestamp: u64,
        reference: u64,
        side: Side,
        shares: u32,
        instrument: &str,
        price: u32,
    ) -> Self {
        self.message(MessageType::AddOrder, timestamp, |b| {
            put_order_fields(b, reference, side, shares, instrument, price);
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_order_with_mpid(
        self,
        timestamp: u64,
        reference: u64,
        side: Side,
        shares: u32,
        instrument: &str,
        price: u32,
        mpid: [u8; 4],
    ) -> Self {
        self.message(MessageType::AddOrderWithMpid, timestamp, |b| {
            put_order_fields(b, reference, side, shares, instrument, price);
            b.extend_from_slice(&mpid);
        })
    }

    pub fn order_executed(
        self,
        timestamp: u64,
        reference: u64,
        executed_shares: u32,
        match_number: u64,
    ) -> Self {
        self.message(MessageType::OrderExecuted, timestamp, |b| {
            b.extend_from_slice(&reference.to_be_bytes());
            b.extend_from_slice(&executed_shares.to_be_bytes());
            b.extend_from_slice(&match_number.to_be_bytes());
        })
    }

    pub fn order_executed_with_price(
        self,
        timestamp: u64,
        reference: u64,
        executed_shares: u32,
        match_number: u64,
        printable: Printable,
        price: u32,
    ) -> Self {
        self.message(MessageType::OrderExecutedWithPrice, timestamp, |b| {
            b.extend_from_slice(&reference.to_be_bytes());
            b.extend_from_slice(&executed_shares.to_be_bytes());
            b.extend_from_slice(&match_number.to_be_bytes());
            b.push(printable.as_byte());
            b.extend_from_slice(&price.to_be_bytes());
        })
    }

    pub fn order_cancel(self, timestamp: u64, reference: u64, canceled_shares: u32) -> Self {
        self.message(MessageType::OrderCancel, timestamp, |b| {
            b.extend_from_slice(&reference.to_be_bytes());
            b.extend_from_slice(&canceled_shares.to_be_bytes());
        })
    }

    pub fn order_delete(self, timestamp: u64, reference: u64) -> Self {
        self.message(MessageType::OrderDelete, timestamp, |b| {
            b.extend_from_slice(&reference.to_be_bytes());
        })
    }

    pub fn order_replace(
        self,
        timestamp: u64,
        old_reference: u64,
        new_reference: u64,
        shares: u32,
        price: u32,
    ) -> Self {
        self.message(MessageType::OrderReplace, timestamp, |b| {
            b.extend_from_slice(&old_reference.to_be_bytes());
            b.extend_from_slice(&new_reference.to_be_bytes());
            b.extend_from_slice(&shares.to_be_bytes());
            b.extend_from_slice(&price.to_be_bytes());
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn non_cross_trade(
        self,
        timestamp: u64,
        reference: u64,
        side: Side,
        shares: u32,
        instrument: &str,
        price: u32,
        match_number: u64,
    ) -> Self {
        self.message(MessageType::NonCrossTrade, timestamp, |b| {
            put_order_fields(b, reference, side, shares, instrument, price);
            b.extend_from_slice(&match_number.to_be_bytes());
        })
    }

    pub fn broken_trade(self, timestamp: u64, match_number: u64) -> Self {
        self.message(MessageType::BrokenTrade, timestamp, |b| {
            b.extend_from_slice(&match_number.to_be_bytes());
        })
    }

    /// Any message type with a valid header and a zero-filled body.
    pub fn timestamp_only(self, msg_type: MessageType, timestamp: u64) -> Self {
        self.message(msg_type, timestamp, |_| {})
    }

    /// Append raw bytes verbatim (for corrupt-stream tests).
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    fn message(mut self, msg_type: MessageType, timestamp: u64, body: impl FnOnce(&mut Vec<u8>)) -> Self {
        let len = msg_type.payload_len();
        let mut payload = Vec::with_capacity(len);
        payload.extend_from_slice(&1u16.to_be_bytes());
        payload.extend_from_slice(&self.tracking_number.to_be_bytes());
        payload.extend_from_slice(&timestamp.to_be_bytes()[2..]);
        body(&mut payload);
        payload.resize(len, 0);

        // Length prefix counts the tag byte.
        self.bytes.extend_from_slice(&((len + 1) as u16).to_be_bytes());
        self.bytes.push(msg_type.tag());
        self.bytes.extend_from_slice(&payload);
        self.tracking_number = self.tracking_number.wrapping_add(1);
        self
    }
}

fn put_order_fields(
    b: &mut Vec<u8>,
    reference: u64,
    side: Side,
    shares: u32,
    instrument: &str,
    price: u32,
) {
    b.extend_from_slice(&reference.to_be_bytes());
    b.push(side.as_byte());
    b.extend_from_slice(&shares.to_be_bytes());
    b.extend_from_slice(&pad_instrument(instrument));
    b.extend_from_slice(&price.to_be_bytes());
}

/// Right-pad (or cut) a symbol to the 8-byte wire field.
pub fn pad_instrument(symbol: &str) -> [u8; 8] {
    let mut field = [b' '; 8];
    for (dst, src) in field.iter_mut().zip(symbol.bytes()) {
        *dst = src;
    }
    field
}
