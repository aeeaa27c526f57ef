//! Fixed-point prices.
//!
//! ITCH carries prices as unsigned 32-bit integers with 4 implied decimal
//! digits. `Price` keeps the raw integer so aggregation stays in integer
//! arithmetic, and converts to `rust_decimal::Decimal` only for output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Divisor that undoes the 4-implied-decimal encoding.
pub const PRICE_SCALE: u32 = 10_000;

/// Number of implied decimal digits in a raw price.
const PRICE_DECIMALS: u32 = 4;

/// Price with 4 implied decimal digits (`1_500_000` is `150.0000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub u32);

impl Price {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw wire value.
    #[inline]
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Exact decimal value.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.0), PRICE_DECIMALS)
    }

    /// Notional value of `shares` at this price, in raw (scaled) units.
    #[inline]
    pub fn notional(&self, shares: u32) -> u128 {
        u128::from(self.0) * u128::from(shares)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl From<u32> for Price {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// VWAP from raw-unit notional and share volume.
///
/// Returns `None` for zero volume or when the notional does not fit a
/// `Decimal` mantissa.
pub fn vwap_from_raw(notional: u128, volume: u64) -> Option<Decimal> {
    if volume == 0 {
        return None;
    }
    let notional = i128::try_from(notional).ok()?;
    let scaled = Decimal::try_from_i128_with_scale(notional, PRICE_DECIMALS).ok()?;
    scaled.checked_div(Decimal::from(volume))
}
