//! Application error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to open input {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Session error: {0}")]
    Session(#[from] itch_session::SessionError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] itch_telemetry::TelemetryError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] itch_persistence::PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
