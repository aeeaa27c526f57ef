//! Common message header and big-endian field access.
//!
//! Every ITCH 5.0 payload starts with the same 10 bytes:
//! `stock_locate(2) tracking_number(2) timestamp(6)`. The header is decoded
//! once here and each type-specific decoder works on the remainder.

/// Size of the common header in bytes.
pub const HEADER_LEN: usize = 10;

/// Decoded common header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonHeader {
    pub stock_locate: u16,
    pub tracking_number: u16,
    /// Nanoseconds since midnight.
    pub timestamp: u64,
}

/// Split a payload into its common header and the type-specific remainder.
///
/// Returns `None` if the payload is shorter than the header.
pub fn split_header(payload: &[u8]) -> Option<(CommonHeader, &[u8])> {
    if payload.len() < HEADER_LEN {
        return None;
    }
    let (head, rest) = payload.split_at(HEADER_LEN);
    let header = CommonHeader {
        stock_locate: be_u16(&head[0..2]),
        tracking_number: be_u16(&head[2..4]),
        timestamp: be_u48(&head[4..10]),
    };
    Some((header, rest))
}

// Callers guarantee slice lengths; payload sizes are fixed per type and
// checked before any field is read.

#[inline]
pub(crate) fn be_u16(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

#[inline]
pub(crate) fn be_u32(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

#[inline]
pub(crate) fn be_u48(b: &[u8]) -> u64 {
    u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
}

#[inline]
pub(crate) fn be_u64(b: &[u8]) -> u64 {
    u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
}
