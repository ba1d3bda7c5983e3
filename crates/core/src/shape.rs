//! Shape module - 0/1 matrix shapes and clockwise rotation
//!
//! A shape is a small matrix (at most 4x4) of filled/empty cells. Rotation is
//! computed on the matrix itself (transpose, then reverse the row order),
//! so a shape's rotation class follows from its geometry: the square maps to
//! itself, the bar and the S/Z shapes alternate between two matrices, and the
//! remaining shapes cycle through four.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest side length of any shape matrix.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Upper bound on filled cells in a shape.
pub const MAX_MINOS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Offset of a single filled cell relative to the shape's top-left corner
/// as (dx, dy).
pub type MinoOffset = (i16, i16);

/// A rotatable 0/1 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    /// `cells[row][col]`; entries outside `height x width` are always false.
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from 0/1 rows. Rows and columns beyond
    /// [`MAX_SHAPE_SIZE`] are ignored; the width is taken from the longest row.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let height = rows.len().min(MAX_SHAPE_SIZE);
        let mut width = 0usize;

        for (r, row) in rows.iter().take(MAX_SHAPE_SIZE).enumerate() {
            width = width.max(row.len().min(MAX_SHAPE_SIZE));
            for (c, &v) in row.iter().take(MAX_SHAPE_SIZE).enumerate() {
                cells[r][c] = v != 0;
            }
        }

        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    /// Spawn-orientation matrix for a template.
    pub fn template(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[&[1, 1, 1, 1]]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::T => Self::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
            PieceKind::L => Self::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
            PieceKind::J => Self::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
            PieceKind::Z => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            PieceKind::S => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at column `col`, row `row` is filled.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width as usize && row < self.height as usize && self.cells[row][col]
    }

    /// Filled cells as (dx, dy) offsets, row by row.
    ///
    /// Stack-only; no allocation.
    pub fn minos(&self) -> ArrayVec<MinoOffset, MAX_MINOS> {
        let mut out = ArrayVec::new();
        for row in 0..self.height as usize {
            for col in 0..self.width as usize {
                if self.cells[row][col] {
                    out.push((col as i16, row as i16));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: row `r` of the result is column `r` of `self`
    /// read bottom to top.
    ///
    /// # Examples
    ///
    /// ```
    /// use hiscore_tetris_core::Shape;
    ///
    /// let bar = Shape::from_rows(&[&[1, 1, 1, 1]]);
    /// let upright = bar.rotated_cw();
    /// assert_eq!((upright.width(), upright.height()), (1, 4));
    /// assert_eq!(upright.rotated_cw(), bar);
    /// ```
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let h = self.height as usize;
        for (r, out_row) in cells.iter_mut().enumerate().take(self.width as usize) {
            for (c, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.cells[h - 1 - c][r];
            }
        }

        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Render as `0`/`1` rows, mainly for debugging and test assertions.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|r| {
                (0..self.width as usize)
                    .map(|c| u8::from(self.cells[r][c]))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation_order(shape: Shape) -> usize {
        let mut s = shape.rotated_cw();
        let mut n = 1;
        while s != shape {
            s = s.rotated_cw();
            n += 1;
            assert!(n <= 4, "rotation did not cycle within four steps");
        }
        n
    }

    #[test]
    fn test_templates_are_tetrominoes() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::template(kind).minos().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_templates_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in PieceKind::ALL.iter().skip(i + 1) {
                assert_ne!(Shape::template(*a), Shape::template(*b));
            }
        }
    }

    #[test]
    fn test_four_rotations_return_original() {
        for kind in PieceKind::ALL {
            let shape = Shape::template(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_orders() {
        assert_eq!(rotation_order(Shape::template(PieceKind::O)), 1);
        assert_eq!(rotation_order(Shape::template(PieceKind::I)), 2);
        assert_eq!(rotation_order(Shape::template(PieceKind::Z)), 2);
        assert_eq!(rotation_order(Shape::template(PieceKind::S)), 2);
        assert_eq!(rotation_order(Shape::template(PieceKind::T)), 4);
        assert_eq!(rotation_order(Shape::template(PieceKind::L)), 4);
        assert_eq!(rotation_order(Shape::template(PieceKind::J)), 4);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = Shape::template(PieceKind::T).rotated_cw();
        assert_eq!(t.to_rows(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotation_preserves_cell_count() {
        for kind in PieceKind::ALL {
            let mut shape = Shape::template(kind);
            for _ in 0..4 {
                shape = shape.rotated_cw();
                assert_eq!(shape.minos().len(), 4);
            }
        }
    }

    #[test]
    fn test_from_rows_truncates_oversized_input() {
        let row: &[u8] = &[1, 1, 1, 1, 1];
        let shape = Shape::from_rows(&[row; 5]);
        assert_eq!((shape.width(), shape.height()), (4, 4));
        assert_eq!(shape.minos().len(), 16);
    }
}
