//! Core domain types for the ITCH 5.0 hourly VWAP pipeline.
//!
//! This crate provides the fundamental types shared by every stage:
//! - `MessageType`: closed set of ITCH 5.0 message tags with payload lengths
//! - `Price`: fixed-point price with 4 implied decimal digits
//! - `Order`, `ExecutionRecord`, `SystemEvent`: State Store entries
//! - `Side`, `Printable`, `EventCode`: single-byte protocol enums

pub mod error;
pub mod message;
pub mod price;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use message::MessageType;
pub use price::{vwap_from_raw, Price, PRICE_SCALE};
pub use time::{format_nanos, NANOS_PER_HOUR, NANOS_PER_SECOND};
pub use types::{EventCode, ExecutionRecord, Order, Printable, Side, SystemEvent};
