//! Session configuration.

use crate::error::{SessionError, SessionResult};
use itch_core::{EventCode, NANOS_PER_SECOND};
use serde::{Deserialize, Serialize};

/// Which system events bound the session and how long each window is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// System event that opens the session (default: start of market hours).
    #[serde(default = "default_start_event_code")]
    pub start_event_code: EventCode,
    /// System event that closes the session (default: end of market hours).
    #[serde(default = "default_close_event_code")]
    pub close_event_code: EventCode,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_start_event_code() -> EventCode {
    EventCode::START_OF_MARKET_HOURS
}

fn default_close_event_code() -> EventCode {
    EventCode::END_OF_MARKET_HOURS
}

fn default_window_secs() -> u64 {
    3_600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_event_code: default_start_event_code(),
            close_event_code: default_close_event_code(),
            window_secs: default_window_secs(),
        }
    }
}

impl SessionConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> SessionResult<()> {
        if self.window_secs == 0 {
            return Err(SessionError::Config(
                "window_secs must be positive".to_string(),
            ));
        }
        if self.window_secs.checked_mul(NANOS_PER_SECOND).is_none() {
            return Err(SessionError::Config(format!(
                "window_secs ({}) overflows nanoseconds",
                self.window_secs
            )));
        }
        if self.start_event_code == self.close_event_code {
            return Err(SessionError::Config(format!(
                "start and close event codes must differ (both '{}')",
                self.start_event_code
            )));
        }
        Ok(())
    }

    /// Window length in nanoseconds.
    pub fn window_ns(&self) -> u64 {
        self.window_secs.saturating_mul(NANOS_PER_SECOND)
    }
}
