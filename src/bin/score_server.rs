//! Reference score backend.
//!
//! Holds one high score and serves it over the line protocol. With
//! `TETRIS_SCORE_FILE` set the value survives restarts; otherwise it lives
//! in memory.

use std::sync::Arc;

use anyhow::Result;
use log::info;

use hiscore_tetris::logging::init_server_logging;
use hiscore_tetris::score::{run_score_server, FileScoreStore, MemoryScoreStore, ScoreStore, ScoreStoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_server_logging()?;

    let config = ScoreStoreConfig::from_env();
    match config.data_file.clone() {
        Some(path) => {
            let store = FileScoreStore::open(&path).await?;
            info!(
                "[ScoreServer] persisting to {} (current high score {})",
                store.path().display(),
                store.get_high_score().await?
            );
            serve(config, store).await
        }
        None => {
            info!("[ScoreServer] no TETRIS_SCORE_FILE set, high score kept in memory");
            serve(config, MemoryScoreStore::default()).await
        }
    }
}

async fn serve<S: ScoreStore>(config: ScoreStoreConfig, store: S) -> Result<()> {
    tokio::select! {
        res = run_score_server(config, Arc::new(store), None) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("[ScoreServer] shutting down");
            Ok(())
        }
    }
}
