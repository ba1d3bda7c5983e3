//! Score module - remote high-score storage
//!
//! The game keeps one global high score in an external store. The store
//! exposes exactly two calls:
//!
//! - `getHighScore() -> Nat` (read-only query)
//! - `setHighScore(Nat)` (replace the stored value)
//!
//! This crate provides the contract ([`ScoreStore`]), a TCP client for it
//! ([`RemoteScoreStore`]), a server that exposes any store over TCP
//! ([`run_score_server`]), and the sync/async bridge the game loop uses
//! ([`ScoreSync`]).
//!
//! # Environment Variables
//!
//! - `TETRIS_SCORE_HOST`: store address (default: "127.0.0.1")
//! - `TETRIS_SCORE_PORT`: store port (default: 7878)
//! - `TETRIS_SCORE_TIMEOUT_MS`: per-request limit (default: 5000, 0 = none)
//! - `TETRIS_SCORE_DISABLED`: "1" or "true" keeps scores in memory only
//! - `TETRIS_SCORE_FILE`: JSON file the server persists to
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"getHighScore"}
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod store;

pub use client::RemoteScoreStore;
pub use config::ScoreStoreConfig;
pub use error::ScoreStoreError;
pub use protocol::{ScoreRequest, ScoreResponse};
pub use runtime::{ScoreClient, ScoreEvent, ScoreSync};
pub use server::run_score_server;
pub use store::{FileScoreStore, MemoryScoreStore, ScoreStore};
