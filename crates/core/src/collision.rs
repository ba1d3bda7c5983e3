//! Collision checking
//!
//! A placement is valid when every filled cell of the shape lands inside the
//! grid's columns, above its floor, and on an empty cell. Cells above the top
//! edge (negative y) skip the occupancy test so a piece can sit partially off
//! the visible grid; they still have to be within the horizontal bounds.

use crate::grid::Grid;
use crate::shape::Shape;

/// Check whether `shape` with its top-left corner at (`x`, `y`) is a legal
/// placement on `grid`.
///
/// # Examples
///
/// ```
/// use hiscore_tetris_core::{is_valid_move, Grid, Shape};
/// use hiscore_tetris_core::types::PieceKind;
///
/// let grid = Grid::default();
/// let bar = Shape::template(PieceKind::I);
/// assert!(is_valid_move(&bar, 0, 0, &grid));
/// assert!(is_valid_move(&bar, 0, -3, &grid));
/// assert!(!is_valid_move(&bar, 7, 0, &grid));
/// assert!(!is_valid_move(&bar, 0, 20, &grid));
/// ```
pub fn is_valid_move(shape: &Shape, x: i16, y: i16, grid: &Grid) -> bool {
    let width = grid.width() as i16;
    let height = grid.height() as i16;

    shape.minos().iter().all(|&(dx, dy)| {
        let px = x + dx;
        let py = y + dy;
        px >= 0 && px < width && py < height && (py < 0 || grid.is_empty_at(px, py))
    })
}
