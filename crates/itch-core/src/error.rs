//! Error types for itch-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid side byte: 0x{0:02x}")]
    InvalidSide(u8),

    #[error("Invalid printable flag: 0x{0:02x}")]
    InvalidPrintable(u8),

    #[error("Invalid event code: {0:?}")]
    InvalidEventCode(String),

    #[error("Instrument is not ASCII: {0:?}")]
    InvalidInstrument(Vec<u8>),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
