//! Prometheus counters and structured logging for the ITCH VWAP pipeline.
//!
//! - Counters for decoded messages, executions, broken trades and windows
//! - Structured logging with tracing (JSON in production)
//! - End-of-run summary read back from the counters

pub mod error;
pub mod logging;
pub mod metrics;
pub mod summary;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, init_logging_with, LogFormat};
pub use metrics::Metrics;
pub use summary::RunSummary;
