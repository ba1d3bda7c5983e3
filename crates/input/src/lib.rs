//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key
//! press is one action; terminal auto-repeat is ignored by the caller.

pub mod map;

pub use hiscore_tetris_types as types;

pub use map::{handle_key_event, should_quit};
