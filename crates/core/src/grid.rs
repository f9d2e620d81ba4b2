//! Grid module - the fixed-size cell matrix of one player
//!
//! The grid is 10 columns by 24 rows. Rows `0..BUFFER_ROWS` form the hidden buffer
//! above the visible playfield. Uses a flat array for cache locality; no mutation
//! ever changes the row or column count.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..23 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Grid as numeric cell ids, row-major
pub type CellIds = [[u8; WIDTH]; HEIGHT];

/// The game grid - 10 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is free (within bounds and empty)
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if position is blocked (out of bounds or filled)
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        !self.is_free(x, y)
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// Fill a whole row with the given cell (for setting up positions)
    pub fn fill_row(&mut self, y: usize, cell: Cell) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.cells[y * WIDTH..(y + 1) * WIDTH].fill(cell);
        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| !cell.is_empty())
    }

    /// Check if a row is completely empty
    pub fn is_row_empty(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(Cell::is_empty)
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Rows above a cleared row move down by the number of cleared rows below them;
    /// the same number of empty rows appear at the very top. Uses a two-pointer
    /// compaction with no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, HEIGHT> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = HEIGHT;

        // Scan from bottom to top
        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * WIDTH].fill(Cell::Empty);

        cleared_rows
    }

    /// Insert `count` rows of garbage at the bottom, each open at `gap_column`.
    ///
    /// Existing rows are pushed upward. Returns true if any occupied cell was
    /// pushed off the top of the grid.
    pub fn push_garbage_rows(&mut self, count: usize, gap_column: u8) -> bool {
        let count = count.min(HEIGHT);
        if count == 0 {
            return false;
        }

        let overflow = (0..count).any(|y| !self.is_row_empty(y));

        self.cells.copy_within(count * WIDTH.., 0);

        let gap = (gap_column as usize) % WIDTH;
        for y in HEIGHT - count..HEIGHT {
            let row = &mut self.cells[y * WIDTH..(y + 1) * WIDTH];
            row.fill(Cell::Garbage);
            row[gap] = Cell::Empty;
        }

        overflow
    }

    /// True if any cell in the hidden buffer rows is occupied
    pub fn buffer_occupied(&self) -> bool {
        (0..BUFFER_ROWS as usize).any(|y| !self.is_row_empty(y))
    }

    /// Write a piece's cells into the grid.
    /// Returns true if successful, false if any cell is out of bounds or occupied
    /// (in which case nothing is written).
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, cell: Cell) -> bool {
        if !shape.iter().all(|&(dx, dy)| self.is_free(x + dx, y + dy)) {
            return false;
        }

        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, cell);
        }

        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Export the grid as numeric ids (0 empty, 1-7 pieces, 8 garbage)
    pub fn to_ids(&self) -> CellIds {
        let mut out = [[0u8; WIDTH]; HEIGHT];
        for (y, row) in out.iter_mut().enumerate() {
            for (x, id) in row.iter_mut().enumerate() {
                *id = self.cells[y * WIDTH + x].id();
            }
        }
        out
    }

    /// Build a grid from numeric ids; unknown ids become empty cells
    pub fn from_ids(ids: &CellIds) -> Self {
        let mut grid = Self::new();
        for (y, row) in ids.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                grid.cells[y * WIDTH + x] = Cell::from_id(id).unwrap_or(Cell::Empty);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
