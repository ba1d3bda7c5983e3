//! Game state module - the `GameSession` aggregate
//!
//! This module ties together the grid, the falling and preview pieces, the
//! piece factory and scoring. It owns the session lifecycle
//! (`Idle -> Running -> GameOver`) and the tick state machine:
//!
//! 1. move the falling piece down one row if it fits;
//! 2. otherwise lock it into the grid, clear full rows and score them;
//! 3. a piece that locks on its spawn row (y == 0) ends the session;
//! 4. otherwise the preview piece starts falling and a new preview is created.
//!
//! Nothing here does I/O; high-score handling lives in the session controller.

use crate::collision::is_valid_move;
use crate::config::GameConfig;
use crate::grid::Grid;
use crate::piece::{Piece, PieceFactory};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GamePhase};

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: u32,
    pub score: u64,
    pub lines: u32,
    pub pieces: u32,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No running session; nothing changed.
    Idle,
    /// The falling piece moved down one row.
    Moved,
    /// The falling piece locked; the preview piece is now falling.
    Locked { lines_cleared: u32 },
    /// The falling piece locked on its spawn row and the session ended.
    GameOver(SessionSummary),
}

/// Event recorded on every lock (consumed by observers, e.g. a line-clear flash).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u64,
    pub game_over: bool,
}

/// Complete game state for one session at a time.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    factory: PieceFactory,
    current: Option<Piece>,
    next: Option<Piece>,
    phase: GamePhase,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    score: u64,
    lines: u32,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Create an idle session with the default configuration
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    /// Create an idle session
    pub fn with_config(config: GameConfig, seed: u32) -> Self {
        Self {
            grid: Grid::new(config.width, config.height),
            factory: PieceFactory::new(seed, config.width),
            config,
            current: None,
            next: None,
            phase: GamePhase::Idle,
            session_id: 0,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            last_event: None,
        }
    }

    /// Begin a new session from any phase.
    ///
    /// Resets the grid and score and creates the falling and preview pieces.
    /// The piece factory keeps its RNG state, so consecutive sessions see
    /// different sequences.
    pub fn start(&mut self) {
        self.grid.reset();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.last_event = None;
        self.current = Some(self.factory.create_piece());
        self.next = Some(self.factory.create_piece());
        self.session_id = self.session_id.wrapping_add(1);
        self.phase = GamePhase::Running;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id,
            score: self.score,
            lines: self.lines,
            pieces: self.pieces_locked,
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.clone_from(&self.grid);
        out.current = self.current;
        out.next = self.next;
        out.phase = self.phase;
        out.session_id = self.session_id;
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(self.grid.width(), self.grid.height());
        self.snapshot_into(&mut s);
        s
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Idle;
        }

        let Some(mut current) = self.current else {
            return TickOutcome::Idle;
        };

        if is_valid_move(&current.shape, current.x, current.y + 1, &self.grid) {
            current.y += 1;
            self.current = Some(current);
            return TickOutcome::Moved;
        }

        self.lock_piece(current)
    }

    /// Merge `piece` into the grid, clear and score rows, then either end the
    /// session or promote the preview piece.
    fn lock_piece(&mut self, piece: Piece) -> TickOutcome {
        for (x, y) in piece.cells() {
            // Cells above the grid have nowhere to go.
            self.grid.set_cell(x, y, Some(piece.color));
        }
        self.current = None;
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let lines_cleared = self.grid.clear_full_rows() as u32;
        let score_delta = self.config.score_per_line.saturating_mul(lines_cleared as u64);
        if lines_cleared > 0 {
            self.score = self.score.saturating_add(score_delta);
            self.lines = self.lines.saturating_add(lines_cleared);
        }

        // Only a lock on the spawn row ends the session.
        let game_over = piece.y == 0;
        self.last_event = Some(LockEvent {
            lines_cleared,
            score_delta,
            game_over,
        });

        if game_over {
            self.phase = GamePhase::GameOver;
            return TickOutcome::GameOver(self.summary());
        }

        self.current = self.next.take();
        self.next = Some(self.factory.create_piece());
        TickOutcome::Locked { lines_cleared }
    }

    fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        current.try_move(dx, dy, &self.grid)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row (no points awarded).
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotate clockwise if the rotated shape fits in place.
    pub fn rotate(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        current.try_rotate(&self.grid)
    }

    /// Apply a game action. Returns whether state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Start => {
                self.start();
                true
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
