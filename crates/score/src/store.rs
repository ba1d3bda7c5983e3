//! Store module - the two-call high-score contract and local backends
//!
//! [`ScoreStore`] is what the game needs from a score backend: read one
//! number, write one number. Backends here:
//!
//! - [`MemoryScoreStore`]: process-local value (offline play, tests)
//! - [`FileScoreStore`]: value kept in a small JSON file (used by the server)
//! - [`crate::client::RemoteScoreStore`]: the TCP client

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ScoreStoreError;

/// Remote high-score storage.
pub trait ScoreStore: Send + Sync + 'static {
    /// Read the stored high score. Read-only.
    fn get_high_score(&self) -> impl Future<Output = Result<u64, ScoreStoreError>> + Send;

    /// Replace the stored high score.
    fn set_high_score(&self, value: u64) -> impl Future<Output = Result<(), ScoreStoreError>> + Send;
}

/// In-memory store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Arc<RwLock<u64>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryScoreStore {
    pub fn new(initial: u64) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `set_high_score` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl ScoreStore for MemoryScoreStore {
    async fn get_high_score(&self) -> Result<u64, ScoreStoreError> {
        Ok(*self.value.read().await)
    }

    async fn set_high_score(&self, value: u64) -> Result<(), ScoreStoreError> {
        *self.value.write().await = value;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u64,
}

/// Store backed by a JSON file (`{"high_score": N}`).
///
/// The value is cached in memory; every write rewrites the file through a
/// temporary sibling and a rename.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    cached: RwLock<u64>,
}

impl FileScoreStore {
    /// Open the file, starting from 0 when it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ScoreStoreError> {
        let path = path.as_ref().to_path_buf();
        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<ScoreFile>(&bytes)?.high_score,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            cached: RwLock::new(initial),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    async fn get_high_score(&self) -> Result<u64, ScoreStoreError> {
        Ok(*self.cached.read().await)
    }

    async fn set_high_score(&self, value: u64) -> Result<(), ScoreStoreError> {
        // Hold the write lock across the file write so writers serialize.
        let mut cached = self.cached.write().await;
        let bytes = serde_json::to_vec(&ScoreFile { high_score: value })?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        *cached = value;
        Ok(())
    }
}
