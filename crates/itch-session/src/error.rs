//! Session error types.

use itch_feed::FeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Byte offset of the offending message, if the fault came from the feed.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Feed(e) => e.offset(),
            Self::Config(_) => None,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
