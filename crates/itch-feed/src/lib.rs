//! ITCH 5.0 message framing, decoding and state tracking.
//!
//! Reads a framed byte stream one message at a time, decodes each payload
//! at fixed offsets, and applies order/execution/system-event effects to a
//! [`StateStore`] for downstream aggregation.

pub mod decoder;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod framer;
pub mod header;
pub mod state;

pub use decoder::{decode, Decoded, Effect};
pub use dispatch::DispatchTable;
pub use encode::FeedBuilder;
pub use error::{FeedError, FeedResult};
pub use framer::{MessageFramer, RawMessage};
pub use header::CommonHeader;
pub use state::StateStore;
