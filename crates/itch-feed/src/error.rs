//! Feed error types.
//!
//! Every variant is fatal to a run: the feed is assumed well-formed and
//! version-matched, so nothing here is recovered locally.

use itch_core::MessageType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Unknown message type 0x{tag:02x} at offset {offset}")]
    UnknownMessageType { tag: u8, offset: u64 },

    #[error("Truncated stream at offset {offset}: expected {expected} bytes, got {available}")]
    Truncated {
        offset: u64,
        expected: usize,
        available: usize,
    },

    #[error("{msg_type} at offset {offset} references unknown order {reference}")]
    MissingOrder {
        msg_type: MessageType,
        reference: u64,
        offset: u64,
    },

    #[error("{msg_type} at offset {offset} references unknown match number {match_number}")]
    MissingExecution {
        msg_type: MessageType,
        match_number: u64,
        offset: u64,
    },

    #[error("{msg_type} at offset {offset}: invalid {field}: {reason}")]
    InvalidField {
        msg_type: MessageType,
        field: &'static str,
        reason: String,
        offset: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Byte offset of the offending message, if the fault is tied to one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::UnknownMessageType { offset, .. }
            | Self::Truncated { offset, .. }
            | Self::MissingOrder { offset, .. }
            | Self::MissingExecution { offset, .. }
            | Self::InvalidField { offset, .. } => Some(*offset),
            Self::Io(_) => None,
        }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
