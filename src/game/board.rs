use std::fmt;

use crate::error::MoveError;

use super::player::Player;

/// The four axes a winning run can lie along, as `(row_step, col_step)`
/// offsets: vertical, horizontal, and the two diagonals.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

/// A square Connect-M board.
///
/// Row 0 is the top, row `size - 1` is the bottom. Pieces obey gravity: an
/// occupied cell always has occupied cells below it in the same column. The
/// grid is only mutated through `drop_piece`, `remove_top` and `clear`,
/// each of which preserves that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    // Row-major: cells[row * size + col]
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty `size` x `size` board.
    ///
    /// The board accepts any size; the supported 3..=10 range is enforced
    /// by the configuration layer before a board is built.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `size - 1` is the bottom.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    /// Check if a column is full, i.e. its top cell is occupied.
    pub fn is_column_full(&self, col: usize) -> Result<bool, MoveError> {
        if col >= self.size {
            return Err(MoveError::InvalidColumn(col));
        }
        Ok(self.get(0, col) != Cell::Empty)
    }

    /// Drop a piece for `player` into a column, simulating gravity.
    ///
    /// Scans the column from the bottom up and fills the first empty cell,
    /// returning the landing row. A full column returns `ColumnFull` and
    /// leaves the board untouched.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.size {
            return Err(MoveError::InvalidColumn(col));
        }
        for row in (0..self.size).rev() {
            if self.get(row, col) == Cell::Empty {
                self.set(row, col, player.to_cell());
                return Ok(row);
            }
        }
        Err(MoveError::ColumnFull(col))
    }

    /// Remove the topmost piece of a column.
    ///
    /// This is the search engine's backtrack primitive: a drop followed by
    /// `remove_top` on the same column restores the previous position
    /// exactly. Callers interleaving several columns must undo in reverse
    /// drop order; the board cannot detect violations of that discipline.
    /// Does nothing if the column is empty or out of range.
    pub fn remove_top(&mut self, col: usize) {
        if col >= self.size {
            return;
        }
        for row in 0..self.size {
            if self.get(row, col) != Cell::Empty {
                self.set(row, col, Cell::Empty);
                return;
            }
        }
    }

    /// Check if the board is completely full.
    pub fn is_full(&self) -> bool {
        (0..self.size).all(|col| self.get(0, col) != Cell::Empty)
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.size)
            .filter(|&col| self.get(0, col) == Cell::Empty)
            .collect()
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Check whether `player` has a contiguous run of at least `run_length`
    /// anywhere on the board.
    ///
    /// Every occupied cell of `player` is tried as an origin; for each axis
    /// the run through the origin is counted in both senses, so a run is
    /// found no matter which of its cells the scan visits first.
    pub fn check_win(&self, player: Player, run_length: usize) -> bool {
        let target = player.to_cell();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.get(row, col) != target {
                    continue;
                }
                for (row_step, col_step) in DIRECTIONS {
                    let run = 1
                        + self.run_beyond(row, col, row_step, col_step, target)
                        + self.run_beyond(row, col, -row_step, -col_step, target);
                    if run >= run_length {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Consecutive `cell` cells strictly beyond `(row, col)` in one
    /// direction, not counting the origin.
    fn run_beyond(&self, row: usize, col: usize, row_step: i32, col_step: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as i32 + row_step;
        let mut c = col as i32 + col_step;
        while self.in_bounds(r, c) && self.get(r as usize, c as usize) == cell {
            count += 1;
            r += row_step;
            c += col_step;
        }
        count
    }

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }
}

impl fmt::Display for Board {
    /// Plain text rendering for terminal play: a column index header, then
    /// one line per row starting from the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for col in 0..self.size {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Red => 'R',
                    Cell::Yellow => 'Y',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
