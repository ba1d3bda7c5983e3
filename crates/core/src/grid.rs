//! Grid module - manages the game playfield
//!
//! The grid is a `width x height` matrix where each cell is either empty or
//! holds the color index of a locked piece. Uses a flat row-major buffer for
//! cache locality; rows are shifted in place with `copy_within`.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// The game grid, `width` columns by `height` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid. Zero dimensions are bumped to 1.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get_cell(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set_cell(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, x: i16, y: i16) -> bool {
        matches!(self.get_cell(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Remove row `y`, shift every row above it down by one and insert an
    /// empty row at the top. Returns false if `y` is out of range.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(None);
        true
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Scans bottom to top with a two-pointer compaction: non-full rows slide
    /// down to the write position, the vacated rows at the top are emptied.
    /// The result is the same as calling [`Grid::clear_row`] on every full row
    /// while re-checking the index that just received the row above.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0usize;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Borrow one row, or None if out of range.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell, keeping dimensions.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Build a grid from ASCII rows for testing: `.` is empty, a digit is a
    /// color index.
    #[cfg(test)]
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u8;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width as usize);
            for (x, ch) in row.chars().enumerate() {
                let cell = ch.to_digit(10).map(|d| d as u8);
                grid.set_cell(x as i16, y as i16, cell);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::default();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_grid_dimensions_invariant() {
        let grid = Grid::new(7, 13);
        assert_eq!(grid.rows().count(), 13);
        assert!(grid.rows().all(|row| row.len() == 7));

        let degenerate = Grid::new(0, 0);
        assert_eq!(degenerate.width(), 1);
        assert_eq!(degenerate.height(), 1);
    }

    #[test]
    fn test_clear_row_shifts_down_and_inserts_empty_top() {
        let mut grid = Grid::from_ascii(&[
            "1...", //
            ".2..", //
            "3333", //
            "..4.", //
        ]);

        assert!(grid.is_row_full(2));
        assert!(grid.clear_row(2));

        let expected = Grid::from_ascii(&[
            "....", //
            "1...", //
            ".2..", //
            "..4.", //
        ]);
        assert_eq!(grid, expected);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn test_clear_row_out_of_range() {
        let mut grid = Grid::new(4, 4);
        assert!(!grid.clear_row(4));
        assert_eq!(grid, Grid::new(4, 4));
    }

    #[test]
    fn test_clear_full_rows_non_adjacent() {
        let mut grid = Grid::from_ascii(&[
            "....", //
            "1111", //
            "2...", //
            "3333", //
            ".4..", //
        ]);

        assert_eq!(grid.clear_full_rows(), 2);

        let expected = Grid::from_ascii(&[
            "....", //
            "....", //
            "....", //
            "2...", //
            ".4..", //
        ]);
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_clear_full_rows_matches_repeated_clear_row() {
        let rows = [
            "5555", //
            "1.11", //
            "2222", //
            "3333", //
            "4.44", //
        ];
        let mut fast = Grid::from_ascii(&rows);
        let mut slow = Grid::from_ascii(&rows);

        let mut y = slow.height() as usize;
        let mut cleared = 0;
        while y > 0 {
            y -= 1;
            if slow.is_row_full(y) {
                slow.clear_row(y);
                cleared += 1;
                y += 1;
            }
        }

        assert_eq!(fast.clear_full_rows(), cleared);
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_clear_full_rows_without_full_rows_is_noop() {
        let mut grid = Grid::from_ascii(&[
            "1...", //
            "22.2", //
        ]);
        let before = grid.clone();
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }
}
