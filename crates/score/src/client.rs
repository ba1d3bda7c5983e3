//! TCP client for the remote score store
//!
//! One connection per call: connect, write one request line, read one
//! response line, close. The whole exchange is bounded by the configured
//! timeout.

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::ScoreStoreConfig;
use crate::error::ScoreStoreError;
use crate::protocol::{encode_line, parse_response, ScoreRequest, ScoreResponse};
use crate::store::ScoreStore;

/// [`ScoreStore`] that talks to a score server over TCP.
#[derive(Debug, Clone)]
pub struct RemoteScoreStore {
    address: String,
    timeout: Option<Duration>,
}

impl RemoteScoreStore {
    pub fn new(config: &ScoreStoreConfig) -> Self {
        Self {
            address: config.address(),
            timeout: config.timeout,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn request(&self, req: ScoreRequest) -> Result<ScoreResponse, ScoreStoreError> {
        match self.timeout {
            Some(limit) => with_timeout(limit, self.exchange(req)).await,
            None => self.exchange(req).await,
        }
    }

    async fn exchange(&self, req: ScoreRequest) -> Result<ScoreResponse, ScoreStoreError> {
        let stream = TcpStream::connect(&self.address).await?;
        let (reader, mut writer) = stream.into_split();

        let line = encode_line(&req)?;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        if reader.read_line(&mut response).await? == 0 {
            return Err(ScoreStoreError::Closed);
        }

        parse_response(&response)
    }
}

async fn with_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, ScoreStoreError>>,
) -> Result<T, ScoreStoreError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| ScoreStoreError::Timeout(limit))?
}

impl ScoreStore for RemoteScoreStore {
    async fn get_high_score(&self) -> Result<u64, ScoreStoreError> {
        match self.request(ScoreRequest::GetHighScore).await? {
            ScoreResponse::HighScore { value } => Ok(value),
            ScoreResponse::Error { message } => Err(ScoreStoreError::Remote(message)),
            other => Err(ScoreStoreError::Protocol(format!(
                "unexpected response to getHighScore: {:?}",
                other
            ))),
        }
    }

    async fn set_high_score(&self, value: u64) -> Result<(), ScoreStoreError> {
        match self.request(ScoreRequest::SetHighScore { value }).await? {
            ScoreResponse::Ok => Ok(()),
            ScoreResponse::Error { message } => Err(ScoreStoreError::Remote(message)),
            other => Err(ScoreStoreError::Protocol(format!(
                "unexpected response to setHighScore: {:?}",
                other
            ))),
        }
    }
}
