use std::time::Duration;

use thiserror::Error;

/// Failure of a high-score fetch or persist.
///
/// Callers treat every variant the same way (log it, keep the local value);
/// the variants exist so the log line says what went wrong.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection closed before a response arrived")]
    Closed,
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("store rejected the request: {0}")]
    Remote(String),
}

impl From<serde_json::Error> for ScoreStoreError {
    fn from(err: serde_json::Error) -> Self {
        ScoreStoreError::Protocol(err.to_string())
    }
}
