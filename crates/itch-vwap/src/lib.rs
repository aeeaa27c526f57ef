//! Hourly VWAP calculator for ITCH 5.0 feed files.
//!
//! Ties the pipeline together:
//! - Opens the input feed and runs the session driver over it
//! - Exports the hourly snapshots as CSV or JSON Lines
//! - Logs a run summary and optionally dumps Prometheus metrics

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, RunReport};
pub use config::{AppConfig, OutputConfig};
pub use error::{AppError, AppResult};
