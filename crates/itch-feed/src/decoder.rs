//! Per-type payload decoding.
//!
//! `decode` splits the common header off the payload, then dispatches on
//! the message type to read the remaining fields at fixed offsets and apply
//! the type's effect to the [`StateStore`]. Types that carry nothing needed
//! for VWAP stop after the header.

use crate::error::{FeedError, FeedResult};
use crate::framer::RawMessage;
use crate::header::{be_u32, be_u64, split_header, CommonHeader, HEADER_LEN};
use crate::state::StateStore;
use itch_core::{
    CoreError, EventCode, ExecutionRecord, MessageType, Order, Price, Printable, Side, SystemEvent,
};
use tracing::debug;

/// Width of the space-padded instrument field.
const INSTRUMENT_LEN: usize = 8;

/// State change applied by one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Timestamp only; no state touched.
    None,
    SystemEvent(EventCode),
    OrderAdded { reference: u64 },
    OrderReplaced { old_reference: u64, new_reference: u64 },
    ExecutionRecorded { match_number: u64 },
    TradeBroken { match_number: u64 },
}

/// Result of decoding one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub msg_type: MessageType,
    pub header: CommonHeader,
    pub effect: Effect,
}

impl Decoded {
    /// Nanoseconds since midnight.
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}

/// Decode one framed message and apply its effect to `store`.
pub fn decode(raw: &RawMessage<'_>, store: &mut StateStore) -> FeedResult<Decoded> {
    let msg_type = raw.msg_type;
    let expected = msg_type.payload_len();
    if raw.payload.len() != expected {
        return Err(FeedError::Truncated {
            offset: raw.offset,
            expected,
            available: raw.payload.len(),
        });
    }

    let (header, body) = split_header(raw.payload).ok_or(FeedError::Truncated {
        offset: raw.offset,
        expected: HEADER_LEN,
        available: raw.payload.len(),
    })?;
    let ctx = Ctx {
        msg_type,
        offset: raw.offset,
        timestamp: header.timestamp,
    };

    let effect = match msg_type {
        MessageType::SystemEvent => system_event(&ctx, body, store),
        MessageType::AddOrder | MessageType::AddOrderWithMpid => add_order(&ctx, body, store)?,
        MessageType::OrderExecuted => order_executed(&ctx, body, store)?,
        MessageType::OrderExecutedWithPrice => order_executed_with_price(&ctx, body, store)?,
        MessageType::OrderReplace => order_replace(&ctx, body, store)?,
        MessageType::NonCrossTrade => non_cross_trade(&ctx, body, store)?,
        MessageType::BrokenTrade => broken_trade(&ctx, body, store)?,
        MessageType::StockDirectory
        | MessageType::StockTradingAction
        | MessageType::RegShoRestriction
        | MessageType::MarketParticipantPosition
        | MessageType::MwcbDeclineLevel
        | MessageType::MwcbStatus
        | MessageType::IpoQuotingPeriodUpdate
        | MessageType::LuldAuctionCollar
        | MessageType::OperationalHalt
        | MessageType::OrderCancel
        | MessageType::OrderDelete
        | MessageType::CrossTrade
        | MessageType::Noii => Effect::None,
    };

    Ok(Decoded {
        msg_type,
        header,
        effect,
    })
}

/// Per-message context for field errors.
struct Ctx {
    msg_type: MessageType,
    offset: u64,
    timestamp: u64,
}

impl Ctx {
    fn invalid(&self, field: &'static str, err: CoreError) -> FeedError {
        FeedError::InvalidField {
            msg_type: self.msg_type,
            field,
            reason: err.to_string(),
            offset: self.offset,
        }
    }

    fn missing_order(&self, reference: u64) -> FeedError {
        FeedError::MissingOrder {
            msg_type: self.msg_type,
            reference,
            offset: self.offset,
        }
    }
}

fn system_event(ctx: &Ctx, body: &[u8], store: &mut StateStore) -> Effect {
    let event_code = EventCode(body[0]);
    debug!(
        %event_code,
        timestamp = ctx.timestamp,
        time = %itch_core::format_nanos(ctx.timestamp),
        "System event"
    );
    store.upsert_system_event(SystemEvent {
        event_code,
        timestamp: ctx.timestamp,
    });
    Effect::SystemEvent(event_code)
}

// reference(8) side(1) shares(4) stock(8) price(4) [mpid(4)]
fn add_order(ctx: &Ctx, body: &[u8], store: &mut StateStore) -> FeedResult<Effect> {
    let reference = be_u64(&body[0..8]);
    let side = Side::from_byte(body[8]).map_err(|e| ctx.invalid("side", e))?;
    let shares = be_u32(&body[9..13]);
    let instrument = instrument(ctx, &body[13..21])?;
    let price = Price::new(be_u32(&body[21..25]));

    store.insert_order(Order {
        reference,
        timestamp: ctx.timestamp,
        side,
        shares,
        instrument,
        price,
    });
    Ok(Effect::OrderAdded { reference })
}

// reference(8) executed_shares(4) match_number(8)
fn order_executed(ctx: &Ctx, body: &[u8], store: &mut StateStore) -> FeedResult<Effect> {
    let reference = be_u64(&body[0..8]);
    let executed_shares = be_u32(&body[8..12]);
    let match_number = be_u64(&body[12..20]);

    let order = store
        .order(reference)
        .ok_or_else(|| ctx.missing_order(reference))?;
    let execution = ExecutionRecord {
        match_number,
        timestamp: ctx.timestamp,
        reference,
        instrument: order.instrument.clone(),
        executed_shares,
        executed_price: order.price,
        printable: Printable::Yes,
    };
    store.insert_execution(execution);
    Ok(Effect::ExecutionRecorded { match_number })
}

// reference(8) executed_shares(4) match_number(8) printable(1) price(4)
fn order_executed_with_price(
    ctx: &Ctx,
    body: &[u8],
    store: &mut StateStore,
) -> FeedResult<Effect> {
    let reference = be_u64(&body[0..8]);
    let executed_shares = be_u32(&body[8..12]);
    let match_number = be_u64(&body[12..20]);
    let printable = Printable::from_byte(body[20]).map_err(|e| ctx.invalid("printable", e))?;
    let executed_price = Price::new(be_u32(&body[21..25]));

    let order = store
        .order(reference)
        .ok_or_else(|| ctx.missing_order(reference))?;
    let execution = ExecutionRecord {
        match_number,
        timestamp: ctx.timestamp,
        reference,
        instrument: order.instrument.clone(),
        executed_shares,
        executed_price,
        printable,
    };
    store.insert_execution(execution);
    Ok(Effect::ExecutionRecorded { match_number })
}

// old_reference(8) new_reference(8) shares(4) price(4)
fn order_replace(ctx: &Ctx, body: &[u8], store: &mut StateStore) -> FeedResult<Effect> {
    let old_reference = be_u64(&body[0..8]);
    let new_reference = be_u64(&body[8..16]);
    let shares = be_u32(&body[16..20]);
    let price = Price::new(be_u32(&body[20..24]));

    let replacement = store
        .order(old_reference)
        .ok_or_else(|| ctx.missing_order(old_reference))?
        .replaced_by(new_reference, ctx.timestamp, shares, price);
    store.insert_order(replacement);
    Ok(Effect::OrderReplaced {
        old_reference,
        new_reference,
    })
}

// reference(8) side(1) shares(4) stock(8) price(4) match_number(8)
fn non_cross_trade(ctx: &Ctx, body: &[u8], store: &mut StateStore) -> FeedResult<Effect> {
    let reference = be_u64(&body[0..8]);
    // Side is validated but not stored: the trade is self-contained.
    Side::from_byte(body[8]).map_err(|e| ctx.invalid("side", e))?;
    let shares = be_u32(&body[9..13]);
    let instrument = instrument(ctx, &body[13..21])?;
    let price = Price::new(be_u32(&body[21..25]));
    let match_number = be_u64(&body[25..33]);

    store.insert_execution(ExecutionRecord {
        match_number,
        timestamp: ctx.timestamp,
        reference,
        instrument,
        executed_shares: shares,
        executed_price: price,
        printable: Printable::Yes,
    });
    Ok(Effect::ExecutionRecorded { match_number })
}

// match_number(8)
fn broken_trade(ctx: &Ctx, body: &[u8], store: &mut StateStore) -> FeedResult<Effect> {
    let match_number = be_u64(&body[0..8]);
    let broken = store
        .break_trade(match_number)
        .ok_or(FeedError::MissingExecution {
            msg_type: ctx.msg_type,
            match_number,
            offset: ctx.offset,
        })?;
    debug!(
        match_number,
        instrument = %broken.instrument,
        timestamp = ctx.timestamp,
        "Trade broken"
    );
    Ok(Effect::TradeBroken { match_number })
}

fn instrument(ctx: &Ctx, field: &[u8]) -> FeedResult<String> {
    debug_assert_eq!(field.len(), INSTRUMENT_LEN);
    if !field.is_ascii() {
        return Err(ctx.invalid("instrument", CoreError::InvalidInstrument(field.to_vec())));
    }
    let symbol: String = field.iter().map(|&b| char::from(b)).collect();
    Ok(symbol.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchTable;
    use crate::encode::FeedBuilder;
    use crate::framer::MessageFramer;
    use std::io::Cursor;

    /// Decode every message in `bytes` into a fresh store.
    fn decode_all(bytes: Vec<u8>) -> FeedResult<(StateStore, Vec<Decoded>)> {
        let table = DispatchTable::new();
        let mut framer = MessageFramer::new(Cursor::new(bytes));
        let mut store = StateStore::new();
        let mut out = Vec::new();
        while let Some(raw) = framer.next_message(&table)? {
            out.push(decode(&raw, &mut store)?);
        }
        Ok((store, out))
    }

    #[test]
    fn test_add_order_fields() {
        let bytes = FeedBuilder::new()
            .add_order(1_000, 1, Side::Buy, 100, "AAPL", 1_500_000)
            .build();
        let (store, decoded) = decode_all(bytes).unwrap();

        assert_eq!(decoded[0].timestamp(), 1_000);
        assert_eq!(decoded[0].effect, Effect::OrderAdded { reference: 1 });
        let order = store.order(1).unwrap();
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.shares, 100);
        assert_eq!(order.instrument, "AAPL");
        assert_eq!(order.price, Price::new(1_500_000));
    }

    #[test]
    fn test_add_order_with_mpid() {
        let bytes = FeedBuilder::new()
            .add_order_with_mpid(5, 77, Side::Sell, 10, "ZVZZT", 99, *b"GSCO")
            .build();
        let (store, decoded) = decode_all(bytes).unwrap();

        assert_eq!(decoded[0].msg_type, MessageType::AddOrderWithMpid);
        let order = store.order(77).unwrap();
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.instrument, "ZVZZT");
    }

    #[test]
    fn test_executed_copies_order_instrument_and_price() {
        let bytes = FeedBuilder::new()
            .add_order(1, 1, Side::Buy, 100, "AAPL", 1_500_000)
            .order_executed(2, 1, 60, 9)
            .build();
        let (store, decoded) = decode_all(bytes).unwrap();

        assert_eq!(decoded[1].effect, Effect::ExecutionRecorded { match_number: 9 });
        let exec = store.execution(9).unwrap();
        assert_eq!(exec.instrument, "AAPL");
        assert_eq!(exec.executed_price, Price::new(1_500_000));
        assert_eq!(exec.executed_shares, 60);
        assert_eq!(exec.printable, Printable::Yes);
        assert_eq!(exec.timestamp, 2);
    }

    #[test]
    fn test_executed_with_price_uses_payload_price() {
        let bytes = FeedBuilder::new()
            .add_order(1, 1, Side::Buy, 100, "AAPL", 1_500_000)
            .order_executed_with_price(2, 1, 40, 10, Printable::No, 1_510_000)
            .build();
        let (store, _) = decode_all(bytes).unwrap();

        let exec = store.execution(10).unwrap();
        assert_eq!(exec.instrument, "AAPL");
        assert_eq!(exec.executed_price, Price::new(1_510_000));
        assert_eq!(exec.printable, Printable::No);
    }

    #[test]
    fn test_execution_against_unknown_order_is_fatal() {
        let bytes = FeedBuilder::new()
            .order_delete(1, 3)
            .order_executed(2, 42, 100, 9)
            .build();
        let err = decode_all(bytes).unwrap_err();
        match err {
            FeedError::MissingOrder {
                msg_type,
                reference,
                offset,
            } => {
                assert_eq!(msg_type, MessageType::OrderExecuted);
                assert_eq!(reference, 42);
                assert_eq!(offset, 21);
            }
            other => panic!("Expected MissingOrder, got {other:?}"),
        }
    }

    #[test]
    fn test_replace_inherits_side_and_instrument() {
        let bytes = FeedBuilder::new()
            .add_order(1, 1, Side::Sell, 100, "MSFT", 3_000_000)
            .order_replace(2, 1, 2, 50, 3_010_000)
            .build();
        let (store, decoded) = decode_all(bytes).unwrap();

        assert_eq!(
            decoded[1].effect,
            Effect::OrderReplaced {
                old_reference: 1,
                new_reference: 2
            }
        );
        let new = store.order(2).unwrap();
        assert_eq!(new.side, Side::Sell);
        assert_eq!(new.instrument, "MSFT");
        assert_eq!(new.shares, 50);
        assert_eq!(new.price, Price::new(3_010_000));
        // The replaced order is not removed.
        assert_eq!(store.order(1).unwrap().shares, 100);
    }

    #[test]
    fn test_stale_reference_still_resolves_after_replace() {
        let bytes = FeedBuilder::new()
            .add_order(1, 1, Side::Buy, 100, "AAPL", 1_500_000)
            .order_replace(2, 1, 2, 100, 1_490_000)
            .order_replace(3, 2, 3, 100, 1_480_000)
            .order_executed(4, 1, 10, 100)
            .order_executed(5, 3, 20, 101)
            .build();
        let (store, _) = decode_all(bytes).unwrap();

        assert_eq!(store.execution(100).unwrap().executed_price, Price::new(1_500_000));
        assert_eq!(store.execution(101).unwrap().executed_price, Price::new(1_480_000));
        assert_eq!(store.order_count(), 3);
    }

    #[test]
    fn test_replace_of_unknown_order_is_fatal() {
        let bytes = FeedBuilder::new().order_replace(1, 5, 6, 1, 1).build();
        assert!(matches!(
            decode_all(bytes),
            Err(FeedError::MissingOrder {
                msg_type: MessageType::OrderReplace,
                reference: 5,
                offset: 0
            })
        ));
    }

    #[test]
    fn test_non_cross_trade_is_self_contained() {
        let bytes = FeedBuilder::new()
            .non_cross_trade(7, 0, Side::Buy, 300, "QQQ", 4_000_000, 55)
            .build();
        let (store, _) = decode_all(bytes).unwrap();

        let exec = store.execution(55).unwrap();
        assert_eq!(exec.instrument, "QQQ");
        assert_eq!(exec.executed_shares, 300);
        assert_eq!(exec.executed_price, Price::new(4_000_000));
        assert_eq!(exec.printable, Printable::Yes);
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_broken_trade_zeroes_shares() {
        let bytes = FeedBuilder::new()
            .non_cross_trade(1, 0, Side::Buy, 300, "QQQ", 4_000_000, 55)
            .broken_trade(2, 55)
            .build();
        let (store, decoded) = decode_all(bytes).unwrap();

        assert_eq!(decoded[1].effect, Effect::TradeBroken { match_number: 55 });
        let exec = store.execution(55).unwrap();
        assert_eq!(exec.executed_shares, 0);
        assert_eq!(exec.instrument, "QQQ");
    }

    #[test]
    fn test_broken_trade_unknown_match_is_fatal() {
        let bytes = FeedBuilder::new().broken_trade(2, 404).build();
        assert!(matches!(
            decode_all(bytes),
            Err(FeedError::MissingExecution { match_number: 404, .. })
        ));
    }

    #[test]
    fn test_timestamp_only_types_leave_state_untouched() {
        let mut builder = FeedBuilder::new();
        for (i, t) in MessageType::ALL
            .iter()
            .filter(|t| t.is_timestamp_only())
            .enumerate()
        {
            builder = builder.timestamp_only(*t, 1_000 + i as u64);
        }
        let (store, decoded) = decode_all(builder.build()).unwrap();

        assert_eq!(decoded.len(), 13);
        for (i, d) in decoded.iter().enumerate() {
            assert_eq!(d.effect, Effect::None);
            assert_eq!(d.timestamp(), 1_000 + i as u64);
        }
        assert_eq!(store.order_count(), 0);
        assert_eq!(store.execution_count(), 0);
    }

    #[test]
    fn test_system_event_upserts() {
        let bytes = FeedBuilder::new()
            .system_event(10, EventCode::START_OF_MARKET_HOURS)
            .build();
        let (store, decoded) = decode_all(bytes).unwrap();

        assert_eq!(
            decoded[0].effect,
            Effect::SystemEvent(EventCode::START_OF_MARKET_HOURS)
        );
        assert_eq!(
            store
                .system_event(EventCode::START_OF_MARKET_HOURS)
                .unwrap()
                .timestamp,
            10
        );
    }

    #[test]
    fn test_invalid_side_byte() {
        let mut bytes = FeedBuilder::new()
            .add_order(1, 1, Side::Buy, 100, "AAPL", 1)
            .build();
        // prefix(2) tag(1) header(10) reference(8) -> side
        bytes[3 + 10 + 8] = b'?';
        assert!(matches!(
            decode_all(bytes),
            Err(FeedError::InvalidField { field: "side", .. })
        ));
    }

    #[test]
    fn test_non_ascii_instrument() {
        let mut bytes = FeedBuilder::new()
            .add_order(1, 1, Side::Buy, 100, "AAPL", 1)
            .build();
        bytes[3 + 10 + 13] = 0xc3;
        assert!(matches!(
            decode_all(bytes),
            Err(FeedError::InvalidField { field: "instrument", .. })
        ));
    }

    #[test]
    fn test_short_payload_rejected() {
        let mut store = StateStore::new();
        let raw = RawMessage {
            offset: 0,
            declared_len: 0,
            msg_type: MessageType::AddOrder,
            payload: &[0u8; 20],
        };
        assert!(matches!(
            decode(&raw, &mut store),
            Err(FeedError::Truncated {
                expected: 35,
                available: 20,
                ..
            })
        ));
    }
}
