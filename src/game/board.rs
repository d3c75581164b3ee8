use std::fmt;

use super::{Cell, Coords};
use crate::error::MoveError;

/// Line directions checked by [`Board::line_winner`]: horizontal, vertical,
/// diagonal down (`\`) and diagonal up (`/`).
const DIRECTIONS: [(i64, i64); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Row-major grid of cells. Row 0 is the top row; gravity pulls marks toward
/// row `height - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    width: u32,
    height: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new(height: u32, width: u32) -> Self {
        Board {
            cells: vec![Cell::Empty; (height * width) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Zero-copy view of the grid, one byte per cell (0 empty, 1 X, 2 O).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Row-major index of `(row, col)`. Not bounds checked; call
    /// [`Board::in_bounds`] first.
    pub fn get_index(&self, row: u32, col: u32) -> usize {
        (row * self.width + col) as usize
    }

    pub fn in_bounds(&self, row: u32, col: u32) -> bool {
        row < self.height && col < self.width
    }

    /// Inverse of [`Board::get_index`].
    pub fn get_coords(&self, idx: usize) -> Result<Coords, MoveError> {
        if idx >= self.cells.len() {
            return Err(MoveError::IndexOutOfRange {
                idx,
                len: self.cells.len(),
            });
        }
        let idx = idx as u32;
        Ok(Coords {
            row: idx / self.width,
            col: idx % self.width,
        })
    }

    /// Get the cell at a specific position, `None` when out of bounds
    pub fn get_cell(&self, row: u32, col: u32) -> Option<Cell> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(self.cells[self.get_index(row, col)])
    }

    /// Place `mark` on an empty in-bounds cell. Returns false otherwise.
    pub fn set_cell(&mut self, row: u32, col: u32, mark: Cell) -> bool {
        self.try_set_cell(row, col, mark).is_ok()
    }

    /// Like [`Board::set_cell`] but reports why the mark was refused.
    /// Overwriting a non-empty cell is always refused.
    pub fn try_set_cell(&mut self, row: u32, col: u32, mark: Cell) -> Result<(), MoveError> {
        if !self.in_bounds(row, col) {
            return Err(MoveError::OutOfBounds { row, col });
        }
        let idx = self.get_index(row, col);
        if !self.cells[idx].is_empty() {
            return Err(MoveError::CellOccupied { row, col });
        }
        self.cells[idx] = mark;
        Ok(())
    }

    /// Replace the whole grid in row-major order.
    pub fn set_state(&mut self, cells: Vec<Cell>) -> Result<(), MoveError> {
        if cells.len() != self.cells.len() {
            return Err(MoveError::SizeMismatch {
                expected: self.cells.len(),
                got: cells.len(),
            });
        }
        self.cells = cells;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Winner on the lines through `last_move`, or `Empty`.
    ///
    /// Only lines through `last_move` are inspected. A run elsewhere on the
    /// board goes unnoticed, which is sound as long as every position is
    /// checked right after its move is played.
    pub fn line_winner(&self, last_move: &Coords, run_length: u32) -> Cell {
        let Some(mark) = self.get_cell(last_move.row, last_move.col) else {
            return Cell::Empty;
        };
        if mark.is_empty() {
            return Cell::Empty;
        }

        for (d_row, d_col) in DIRECTIONS {
            let count = 1
                + self.count_run(last_move, d_row, d_col, mark, run_length)
                + self.count_run(last_move, -d_row, -d_col, mark, run_length);
            if count >= run_length {
                return mark;
            }
        }

        Cell::Empty
    }

    /// Count consecutive `mark` cells stepping away from `start`, excluding
    /// `start` itself. Stops after `limit` steps.
    fn count_run(&self, start: &Coords, d_row: i64, d_col: i64, mark: Cell, limit: u32) -> u32 {
        let mut count = 0;
        let mut row = start.row as i64 + d_row;
        let mut col = start.col as i64 + d_col;

        while count < limit && row >= 0 && col >= 0 {
            match self.get_cell(row as u32, col as u32) {
                Some(cell) if cell == mark => count += 1,
                _ => break,
            }
            row += d_row;
            col += d_col;
        }

        count
    }

    /// Landing cell of a mark dropped into `col`: the lowest empty cell.
    pub fn first_empty_in_column(&self, col: u32) -> Result<Coords, MoveError> {
        if col >= self.width {
            return Err(MoveError::OutOfBounds { row: 0, col });
        }

        (0..self.height)
            .rev()
            .find(|&row| self.cells[self.get_index(row, col)].is_empty())
            .map(|row| Coords { row, col })
            .ok_or(MoveError::ColumnFull { col })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1) as usize) {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
