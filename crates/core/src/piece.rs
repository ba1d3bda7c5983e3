//! Pieces module - falling/preview pieces and the piece factory

use arrayvec::ArrayVec;

use crate::collision::is_valid_move;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::shape::{Shape, MAX_MINOS};
use crate::types::{ColorIndex, PieceKind, PIECE_KIND_COUNT};

/// A piece: a shape matrix, its color and the grid position of its top-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: ColorIndex,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    /// Create a piece from its template, horizontally centered on a grid
    /// `grid_width` columns wide, top row at y = 0.
    pub fn spawn(kind: PieceKind, grid_width: u8) -> Self {
        let shape = Shape::template(kind);
        Self {
            kind,
            shape,
            color: kind.color_index(),
            x: spawn_x(grid_width, shape.width()),
            y: 0,
        }
    }

    /// Check if the piece is a valid placement on the grid
    pub fn is_valid(&self, grid: &Grid) -> bool {
        is_valid_move(&self.shape, self.x, self.y, grid)
    }

    /// Check if the piece could occupy its position shifted by (dx, dy)
    pub fn can_move(&self, dx: i16, dy: i16, grid: &Grid) -> bool {
        is_valid_move(&self.shape, self.x + dx, self.y + dy, grid)
    }

    /// Shift by (dx, dy) if the target placement is valid.
    /// Returns false and leaves the piece untouched otherwise.
    pub fn try_move(&mut self, dx: i16, dy: i16, grid: &Grid) -> bool {
        if !self.can_move(dx, dy, grid) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate clockwise in place if the rotated shape fits at the current
    /// position. No wall kicks: a blocked rotation leaves the piece unchanged.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let rotated = self.shape.rotated_cw();
        if !is_valid_move(&rotated, self.x, self.y, grid) {
            return false;
        }
        self.shape = rotated;
        true
    }

    /// Absolute grid coordinates of every filled cell.
    pub fn cells(&self) -> ArrayVec<(i16, i16), MAX_MINOS> {
        self.shape
            .minos()
            .iter()
            .map(|&(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}

/// Horizontal spawn column: `floor(grid_width / 2) - ceil(shape_width / 2)`.
pub fn spawn_x(grid_width: u8, shape_width: u8) -> i16 {
    (grid_width / 2) as i16 - shape_width.div_ceil(2) as i16
}

/// Creates pieces by uniform random template selection.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
    grid_width: u8,
}

impl PieceFactory {
    pub fn new(seed: u32, grid_width: u8) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            grid_width,
        }
    }

    /// Pick one of the seven templates uniformly at random and spawn it.
    pub fn create_piece(&mut self) -> Piece {
        let index = self.rng.next_range(PIECE_KIND_COUNT as u32) as usize;
        let kind = PieceKind::from_index(index).unwrap_or(PieceKind::I);
        Piece::spawn(kind, self.grid_width)
    }
}
