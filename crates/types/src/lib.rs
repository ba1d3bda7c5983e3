//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score store plumbing).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered, top row at y = 0
//!
//! Both can be overridden at runtime (see `GameConfig` in the core crate); the
//! constants here are the defaults.
//!
//! # Scoring
//!
//! Each cleared line is worth [`SCORE_PER_LINE`] points. Clearing several lines
//! with one lock scales linearly: there is no multi-line bonus.
//!
//! # Examples
//!
//! ```
//! use hiscore_tetris_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Template index doubles as the color index.
//! assert_eq!(PieceKind::I.color_index(), 0);
//! assert_eq!(PieceKind::from_index(6), Some(PieceKind::S));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Points awarded per cleared line.
pub const SCORE_PER_LINE: u64 = 100;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS).
///
/// One logical tick per display frame: every tick tries to move the falling
/// piece down by one row.
pub const TICK_MS: u32 = 16;

/// Side length of the square "next piece" preview, in cells.
pub const PREVIEW_SIZE: u8 = 4;

/// Number of shape templates (and therefore colors).
pub const PIECE_KIND_COUNT: usize = 7;

/// Index into the color palette.
pub type ColorIndex = u8;

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(color)`: Cell filled by a locked piece of the given color index
pub type Cell = Option<ColorIndex>;

/// The seven shape templates, in template order.
///
/// The discriminant is the template index, which is also the color index
/// assigned to pieces created from the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// `1111`
    I,
    /// `11/11`
    O,
    /// `111/010`
    T,
    /// `111/100`
    L,
    /// `111/001`
    J,
    /// `110/011`
    Z,
    /// `011/110`
    S,
}

impl PieceKind {
    /// All kinds in template order.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Template index (0..7).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Color index used when this kind locks into the grid.
    pub fn color_index(self) -> ColorIndex {
        self as u8
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Lifecycle of a game session.
///
/// `Idle` until the first start command, `Running` during play, `GameOver`
/// after a piece locks on its spawn row. A start command from any phase begins
/// a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Running,
    GameOver,
}

/// Game actions that can be applied to modify game state
///
/// Movement actions are only honored while a session is running; the start
/// action is honored in every phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (no points)
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Start a new session (also restarts a running one)
    Start,
}
