//! Game configuration
//!
//! Board size, score increment, tick interval and RNG seed. Defaults come from
//! the shared constants; every value can be overridden from the environment:
//!
//! - `TETRIS_BOARD_WIDTH`: columns (4..=64, default 10)
//! - `TETRIS_BOARD_HEIGHT`: rows (4..=64, default 20)
//! - `TETRIS_SCORE_PER_LINE`: points per cleared line (default 100)
//! - `TETRIS_TICK_MS`: milliseconds per tick (1..=10000, default 16)
//! - `TETRIS_SEED`: fixed RNG seed (default: chosen by the caller)
//!
//! Unparseable or out-of-range values fall back to the default.

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, SCORE_PER_LINE, TICK_MS};

/// Smallest accepted board side; the bar piece needs four columns.
pub const MIN_BOARD_SIDE: u8 = 4;
/// Largest accepted board side.
pub const MAX_BOARD_SIDE: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub score_per_line: u64,
    pub tick_ms: u32,
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            score_per_line: SCORE_PER_LINE,
            tick_ms: TICK_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment in production,
    /// a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let side = |key: &str, default: u8| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u8>().ok())
                .filter(|v| (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(v))
                .unwrap_or(default)
        };

        let width = side("TETRIS_BOARD_WIDTH", defaults.width);
        let height = side("TETRIS_BOARD_HEIGHT", defaults.height);

        let score_per_line = lookup("TETRIS_SCORE_PER_LINE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.score_per_line);

        let tick_ms = lookup("TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|v| (1..=10_000).contains(v))
            .unwrap_or(defaults.tick_ms);

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            width,
            height,
            score_per_line,
            tick_ms,
            seed,
        }
    }
}
