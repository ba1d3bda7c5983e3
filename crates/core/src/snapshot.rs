use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::GamePhase;

/// Read-only copy of a session, consumed by the render layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub phase: GamePhase,
    pub session_id: u32,
    pub score: u64,
    pub lines: u32,
    pub pieces: u32,
}

impl GameSnapshot {
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            grid: Grid::new(width, height),
            current: None,
            next: None,
            phase: GamePhase::Idle,
            session_id: 0,
            score: 0,
            lines: 0,
            pieces: 0,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}
