//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a simple framebuffer that is then diffed and flushed to the terminal,
//! without any widget or layout library in between.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: board, falling piece, next preview, score panel, overlays
//! - [`renderer`]: crossterm output, repainting changed rows

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use hiscore_tetris_core as core;
pub use hiscore_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Palette, ScoreBoardView, ViewConfig, Viewport};
pub use renderer::{changed_rows, encode_frame_into, TerminalRenderer};
