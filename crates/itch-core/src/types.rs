//! State Store entry types.
//!
//! Orders, executions, and system events as recovered from the feed.
//! Single-byte protocol fields are typed enums; unknown bytes are rejected
//! at decode time rather than carried through.

use crate::error::{CoreError, Result};
use crate::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Parse the wire byte (`B` / `S`).
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            b'B' => Ok(Self::Buy),
            b'S' => Ok(Self::Sell),
            other => Err(CoreError::InvalidSide(other)),
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Buy => b'B',
            Self::Sell => b'S',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Whether an execution should be included in volume statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Printable {
    Yes,
    No,
}

impl Printable {
    /// Parse the wire byte (`Y` / `N`).
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            b'Y' => Ok(Self::Yes),
            b'N' => Ok(Self::No),
            other => Err(CoreError::InvalidPrintable(other)),
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Yes => b'Y',
            Self::No => b'N',
        }
    }

    #[inline]
    pub fn is_printable(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// System event code (single ASCII byte).
///
/// Serialized as a one-character string so it reads naturally in config
/// files (`start_event_code = "Q"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventCode(pub u8);

impl EventCode {
    /// Start of messages.
    pub const START_OF_MESSAGES: Self = Self(b'O');
    /// Start of system hours.
    pub const START_OF_SYSTEM_HOURS: Self = Self(b'S');
    /// Start of market hours.
    pub const START_OF_MARKET_HOURS: Self = Self(b'Q');
    /// End of market hours.
    pub const END_OF_MARKET_HOURS: Self = Self(b'M');
    /// End of system hours.
    pub const END_OF_SYSTEM_HOURS: Self = Self(b'E');
    /// End of messages.
    pub const END_OF_MESSAGES: Self = Self(b'C');

    #[inline]
    pub fn as_byte(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as char)
    }
}

impl TryFrom<String> for EventCode {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        match s.as_bytes() {
            [b] if b.is_ascii_graphic() => Ok(Self(*b)),
            _ => Err(CoreError::InvalidEventCode(s)),
        }
    }
}

impl From<EventCode> for String {
    fn from(code: EventCode) -> Self {
        code.to_string()
    }
}

/// Resting order, keyed by reference number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub reference: u64,
    /// Nanoseconds since midnight.
    pub timestamp: u64,
    pub side: Side,
    pub shares: u32,
    /// Symbol with padding trimmed.
    pub instrument: String,
    pub price: Price,
}

impl Order {
    /// Order created by a replace: new key, new size and price, side and
    /// instrument carried over from `self`.
    pub fn replaced_by(&self, new_reference: u64, timestamp: u64, shares: u32, price: Price) -> Self {
        Self {
            reference: new_reference,
            timestamp,
            side: self.side,
            shares,
            instrument: self.instrument.clone(),
            price,
        }
    }
}

/// Matched execution, keyed by match number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub match_number: u64,
    /// Nanoseconds since midnight.
    pub timestamp: u64,
    /// Order the execution resolved against. Self-contained trades carry
    /// the reference from the payload, which may not be a tracked order.
    pub reference: u64,
    pub instrument: String,
    pub executed_shares: u32,
    pub executed_price: Price,
    pub printable: Printable,
}

impl ExecutionRecord {
    /// Notional in raw price units.
    #[inline]
    pub fn notional(&self) -> u128 {
        self.executed_price.notional(self.executed_shares)
    }

    /// Break the trade: keeps the record indexable but removes its volume.
    pub fn bust(&mut self) {
        self.executed_shares = 0;
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        self.executed_shares == 0
    }
}

/// Latest system event seen for a given code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemEvent {
    pub event_code: EventCode,
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_byte() {
        assert_eq!(Side::from_byte(b'B').unwrap(), Side::Buy);
        assert_eq!(Side::from_byte(b'S').unwrap(), Side::Sell);
        assert!(matches!(Side::from_byte(b'x'), Err(CoreError::InvalidSide(b'x'))));
        assert_eq!(Side::Sell.as_byte(), b'S');
    }

    #[test]
    fn test_printable_from_byte() {
        assert!(Printable::from_byte(b'Y').unwrap().is_printable());
        assert!(!Printable::from_byte(b'N').unwrap().is_printable());
        assert!(Printable::from_byte(b' ').is_err());
    }

    #[test]
    fn test_event_code_serde() {
        let code: EventCode = serde_json::from_str("\"Q\"").unwrap();
        assert_eq!(code, EventCode::START_OF_MARKET_HOURS);
        assert_eq!(serde_json::to_string(&EventCode::END_OF_MARKET_HOURS).unwrap(), "\"M\"");
        assert!(serde_json::from_str::<EventCode>("\"QM\"").is_err());
        assert!(serde_json::from_str::<EventCode>("\"\"").is_err());
    }

    #[test]
    fn test_replaced_by_inherits_side_and_instrument() {
        let original = Order {
            reference: 1,
            timestamp: 10,
            side: Side::Sell,
            shares: 100,
            instrument: "AAPL".to_string(),
            price: Price::new(1_500_000),
        };
        let replaced = original.replaced_by(2, 20, 40, Price::new(1_490_000));

        assert_eq!(replaced.reference, 2);
        assert_eq!(replaced.timestamp, 20);
        assert_eq!(replaced.side, Side::Sell);
        assert_eq!(replaced.instrument, "AAPL");
        assert_eq!(replaced.shares, 40);
        assert_eq!(replaced.price, Price::new(1_490_000));
    }

    #[test]
    fn test_bust_zeroes_volume() {
        let mut exec = ExecutionRecord {
            match_number: 9,
            timestamp: 0,
            reference: 1,
            instrument: "MSFT".to_string(),
            executed_shares: 50,
            executed_price: Price::new(1_000_000),
            printable: Printable::Yes,
        };
        assert_eq!(exec.notional(), 50_000_000);
        exec.bust();
        assert!(exec.is_broken());
        assert_eq!(exec.notional(), 0);
        assert_eq!(exec.match_number, 9);
    }
}
