use std::path::PathBuf;
use std::time::Duration;

/// Score store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreStoreConfig {
    pub host: String,
    pub port: u16,
    /// Per-request connect + IO limit for the TCP client. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Use an in-process store instead of the network.
    pub disabled: bool,
    /// Server only: JSON file backing the stored value.
    pub data_file: Option<PathBuf>,
}

impl Default for ScoreStoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            timeout: Some(Duration::from_millis(5000)),
            disabled: false,
            data_file: None,
        }
    }
}

impl ScoreStoreConfig {
    /// Create from environment variables
    ///
    /// - `TETRIS_SCORE_HOST` (default 127.0.0.1)
    /// - `TETRIS_SCORE_PORT` (default 7878)
    /// - `TETRIS_SCORE_TIMEOUT_MS` (default 5000, `0` disables the limit)
    /// - `TETRIS_SCORE_DISABLED` (`1` or `true`)
    /// - `TETRIS_SCORE_FILE` (server only)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("TETRIS_SCORE_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);

        let port = lookup("TETRIS_SCORE_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        let timeout = match lookup("TETRIS_SCORE_TIMEOUT_MS").and_then(|s| s.trim().parse::<u64>().ok()) {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.timeout,
        };

        let disabled = lookup("TETRIS_SCORE_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let data_file = lookup("TETRIS_SCORE_FILE")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            host,
            port,
            timeout,
            disabled,
            data_file,
        }
    }

    /// `host:port`, resolved by the socket layer.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
