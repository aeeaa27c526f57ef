//! Hourly VWAP over an ITCH 5.0 trading session.
//!
//! [`SessionDriver`] runs the decode loop, watches for the configured
//! start and close system events, and asks the aggregator for a
//! [`HourlyVwapSnapshot`] each time a window boundary is crossed.

pub mod aggregator;
pub mod config;
pub mod driver;
pub mod error;
pub mod snapshot;

pub use aggregator::{compute, StockAggregate};
pub use config::SessionConfig;
pub use driver::{SessionDriver, SessionOutcome, SessionState, Termination};
pub use error::{SessionError, SessionResult};
pub use snapshot::HourlyVwapSnapshot;
