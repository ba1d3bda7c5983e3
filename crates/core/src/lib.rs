//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules and session state. It has **zero
//! dependencies** on terminals, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Runs headless, behind a terminal, or behind any other front end
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell matrix with row clearing
//! - [`shape`]: 0/1 shape matrices, templates and clockwise rotation
//! - [`collision`]: the placement predicate
//! - [`piece`]: falling/preview pieces and the random piece factory
//! - [`rng`]: deterministic LCG
//! - [`game_state`]: the `GameSession` tick/lock/clear/score state machine
//! - [`snapshot`]: read-only view for renderers
//! - [`config`]: board size, scoring and timing configuration
//!
//! # Game Rules
//!
//! - Seven templates drawn uniformly at random
//! - Clockwise rotation only, rejected outright when blocked (no wall kicks)
//! - One tick moves the falling piece down one row; a piece that cannot move
//!   down locks immediately
//! - Each cleared line is worth a flat 100 points
//! - A piece that locks on its spawn row ends the session
//!
//! # Example
//!
//! ```
//! use hiscore_tetris_core::{GameSession, TickOutcome};
//! use hiscore_tetris_types::{GameAction, GamePhase};
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//! assert_eq!(game.phase(), GamePhase::Running);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! assert_eq!(game.tick(), TickOutcome::Moved);
//! ```

pub mod collision;
pub mod config;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use hiscore_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::is_valid_move;
pub use config::GameConfig;
pub use game_state::{GameSession, LockEvent, SessionSummary, TickOutcome};
pub use grid::Grid;
pub use piece::{Piece, PieceFactory};
pub use rng::SimpleRng;
pub use shape::{MinoOffset, Shape};
pub use snapshot::GameSnapshot;
