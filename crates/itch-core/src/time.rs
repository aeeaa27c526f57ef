//! Nanosecond-of-day timestamps.
//!
//! ITCH timestamps are nanoseconds since midnight of the trading day,
//! carried as 6-byte big-endian integers. They stay `u64` throughout the
//! pipeline; these helpers only exist for window arithmetic and logging.

use chrono::NaiveTime;

pub const NANOS_PER_SECOND: u64 = 1_000_000_000;

pub const NANOS_PER_HOUR: u64 = 3_600 * NANOS_PER_SECOND;

/// Render a nanosecond-of-day timestamp as `HH:MM:SS.nnnnnnnnn`.
///
/// Values past the end of the day (not produced by a valid feed) fall back
/// to the raw nanosecond count.
#[must_use]
pub fn format_nanos(nanos: u64) -> String {
    let secs = nanos / NANOS_PER_SECOND;
    let sub = (nanos % NANOS_PER_SECOND) as u32;
    u32::try_from(secs)
        .ok()
        .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, sub))
        .map(|t| t.format("%H:%M:%S%.9f").to_string())
        .unwrap_or_else(|| format!("{nanos}ns"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_market_open() {
        // 09:30:00 ET
        let open = 9 * NANOS_PER_HOUR + 30 * 60 * NANOS_PER_SECOND;
        assert_eq!(format_nanos(open), "09:30:00.000000000");
    }

    #[test]
    fn test_format_sub_second() {
        assert_eq!(format_nanos(1_000_000_123), "00:00:01.000000123");
    }

    #[test]
    fn test_format_out_of_day() {
        let past = 25 * NANOS_PER_HOUR;
        assert_eq!(format_nanos(past), format!("{past}ns"));
    }
}
