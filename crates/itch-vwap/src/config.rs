//! Application configuration.

use crate::error::{AppError, AppResult};
use itch_persistence::ExportFormat;
use itch_session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where and how snapshots are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: ExportFormat,
    /// Output file. `None` writes next to the input (`<input>.<format>`).
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Prometheus text dump written after the run.
    #[serde(default)]
    pub metrics_path: Option<PathBuf>,
}

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        self.session
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itch_core::EventCode;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.session.start_event_code, EventCode::START_OF_MARKET_HOURS);
        assert_eq!(config.session.window_secs, 3_600);
        assert_eq!(config.output.format, ExportFormat::Csv);
        assert!(config.output.path.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml(
            r#"
            [session]
            start_event_code = "S"
            close_event_code = "E"
            window_secs = 1800

            [output]
            format = "jsonl"
            path = "out/vwap.jsonl"
            metrics_path = "out/metrics.prom"
            "#,
        )
        .unwrap();

        assert_eq!(config.session.start_event_code, EventCode::START_OF_SYSTEM_HOURS);
        assert_eq!(config.session.close_event_code, EventCode::END_OF_SYSTEM_HOURS);
        assert_eq!(config.session.window_secs, 1_800);
        assert_eq!(config.output.format, ExportFormat::Jsonl);
        assert_eq!(config.output.path, Some(PathBuf::from("out/vwap.jsonl")));
        assert_eq!(
            config.output.metrics_path,
            Some(PathBuf::from("out/metrics.prom"))
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AppConfig::from_toml("[session]\nwindow_secs = 0").is_err());
        assert!(AppConfig::from_toml("[output]\nformat = \"parquet\"").is_err());
    }

    #[test]
    fn test_shipped_default_parses() {
        let config = AppConfig::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/default.toml"
        ))
        .unwrap();
        assert_eq!(config.session.close_event_code, EventCode::END_OF_MARKET_HOURS);
        assert_eq!(config.output.format, ExportFormat::Csv);
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
