//! Board occupancy grid and row clearing.
//!
//! The board stores settled cells only; the active piece lives in the engine
//! and is merged in when it locks. Cells are plain booleans, row-major with
//! row 0 at the top.

use arrayvec::ArrayVec;

use crate::types::Coordinate;

/// Settled-cell occupancy grid.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<bool>>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![false; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x >= 0
            && (coord.x as usize) < self.cols
            && coord.y >= 0
            && (coord.y as usize) < self.rows
    }

    /// Whether a settled cell occupies this coordinate. Out-of-bounds
    /// coordinates are reported unoccupied; bounds are checked separately.
    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.in_bounds(coord) && self.cells[coord.y as usize][coord.x as usize]
    }

    /// Mark the given coordinates as settled.
    pub fn mark_cells(&mut self, coords: &[Coordinate]) {
        for coord in coords {
            if self.in_bounds(*coord) {
                self.cells[coord.y as usize][coord.x as usize] = true;
            }
        }
    }

    /// Clear the given coordinates.
    pub fn clear_cells(&mut self, coords: &[Coordinate]) {
        for coord in coords {
            if self.in_bounds(*coord) {
                self.cells[coord.y as usize][coord.x as usize] = false;
            }
        }
    }

    pub fn is_row_complete(&self, y: usize) -> bool {
        self.cells[y].iter().all(|&cell| cell)
    }

    /// Indices of all complete rows, top-down. At most four rows can
    /// complete from a single locked piece.
    pub fn complete_rows(&self) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        for y in 0..self.rows {
            if self.is_row_complete(y) {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove a row and shift everything above it down one step.
    ///
    /// Removing in ascending index order keeps later indices valid, since
    /// rows below the removed one never move.
    pub fn remove_row(&mut self, y: usize) {
        self.cells.remove(y);
        self.cells.insert(0, vec![false; self.cols]);
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(pairs: &[(i32, i32)]) -> Vec<Coordinate> {
        pairs.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    fn fill_row(board: &mut Board, y: i32) {
        let row: Vec<Coordinate> = (0..board.cols() as i32)
            .map(|x| Coordinate::new(x, y))
            .collect();
        board.mark_cells(&row);
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(20, 10);
        for y in 0..20 {
            assert!(!board.is_row_complete(y));
        }
        assert!(board.complete_rows().is_empty());
    }

    #[test]
    fn mark_and_clear_cells() {
        let mut board = Board::new(20, 10);
        let cells = coords(&[(0, 19), (1, 19)]);

        board.mark_cells(&cells);
        assert!(board.is_occupied(Coordinate::new(0, 19)));
        assert!(board.is_occupied(Coordinate::new(1, 19)));
        assert!(!board.is_occupied(Coordinate::new(2, 19)));

        board.clear_cells(&cells);
        assert!(!board.is_occupied(Coordinate::new(0, 19)));
    }

    #[test]
    fn out_of_bounds_is_never_occupied() {
        let board = Board::new(20, 10);
        assert!(!board.is_occupied(Coordinate::new(-1, 0)));
        assert!(!board.is_occupied(Coordinate::new(10, 0)));
        assert!(!board.is_occupied(Coordinate::new(0, 20)));
        assert!(!board.is_occupied(Coordinate::new(0, -1)));
    }

    #[test]
    fn detects_complete_rows_top_down() {
        let mut board = Board::new(20, 10);
        fill_row(&mut board, 19);
        fill_row(&mut board, 17);

        let rows = board.complete_rows();
        assert_eq!(rows.as_slice(), &[17, 19]);
    }

    #[test]
    fn remove_row_shifts_rows_above_down() {
        let mut board = Board::new(20, 10);
        // A stack: one settled cell above a complete bottom row.
        board.mark_cells(&coords(&[(3, 18)]));
        fill_row(&mut board, 19);

        board.remove_row(19);

        assert!(!board.is_row_complete(19));
        assert!(board.is_occupied(Coordinate::new(3, 19)));
        assert!(!board.is_occupied(Coordinate::new(3, 18)));
    }

    #[test]
    fn remove_row_leaves_rows_below_in_place() {
        let mut board = Board::new(20, 10);
        board.mark_cells(&coords(&[(5, 19)]));
        fill_row(&mut board, 17);

        board.remove_row(17);

        // The cell below the removed row did not move.
        assert!(board.is_occupied(Coordinate::new(5, 19)));
        assert!(!board.is_occupied(Coordinate::new(5, 18)));
    }

    #[test]
    fn ascending_removal_keeps_indices_valid() {
        let mut board = Board::new(20, 10);
        fill_row(&mut board, 18);
        fill_row(&mut board, 19);
        board.mark_cells(&coords(&[(0, 17)]));

        let rows = board.complete_rows();
        assert_eq!(rows.as_slice(), &[18, 19]);
        for y in rows {
            board.remove_row(y);
        }

        assert!(board.complete_rows().is_empty());
        assert!(board.is_occupied(Coordinate::new(0, 19)));
    }

    #[test]
    fn reset_clears_everything() {
        let mut board = Board::new(20, 10);
        fill_row(&mut board, 19);
        board.mark_cells(&coords(&[(4, 0)]));

        board.reset();

        assert!(board.complete_rows().is_empty());
        assert!(!board.is_occupied(Coordinate::new(4, 0)));
    }
}
