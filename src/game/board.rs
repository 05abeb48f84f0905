use std::fmt;
use std::str::FromStr;

use super::player::Player;
use crate::error::{BoardParseError, MoveError};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }

    fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            'R' | 'r' => Some(Cell::Red),
            'Y' | 'y' => Some(Cell::Yellow),
            _ => None,
        }
    }
}

/// The 7x6 grid. Row 0 is the bottom row; discs stack upward.
///
/// `heights` mirrors the grid so drops and legality checks are O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    heights: [u8; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            heights: [0; COLS],
        }
    }

    /// Cell at `(row, col)`, row 0 being the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Number of discs in a column
    pub fn height(&self, col: usize) -> usize {
        self.heights[col] as usize
    }

    pub fn disc_count(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || self.height(col) == ROWS
    }

    /// Drop a disc for `player` in `col` and return the row where it landed.
    ///
    /// On error the board is left untouched.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        let row = self.height(col);
        if row == ROWS {
            return Err(MoveError::ColumnFull(col));
        }
        self.cells[row][col] = player.to_cell();
        self.heights[col] += 1;
        Ok(row)
    }

    /// Columns that can still take a disc, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Left-right reflection of the board.
    pub fn mirrored(&self) -> Board {
        let mut out = *self;
        for row in 0..ROWS {
            for col in 0..COLS {
                out.cells[row][col] = self.cells[row][COLS - 1 - col];
            }
        }
        for col in 0..COLS {
            out.heights[col] = self.heights[COLS - 1 - col];
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Six lines, top row first, one character per cell: `.` empty, `R` red, `Y` yellow.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let line: String = self.cells[row].iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount {
                expected: ROWS,
                found: lines.len(),
            });
        }

        let mut board = Board::new();
        for (i, line) in lines.iter().enumerate() {
            let row = ROWS - 1 - i;
            let width = line.chars().count();
            if width != COLS {
                return Err(BoardParseError::RowWidth {
                    row,
                    expected: COLS,
                    found: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] =
                    Cell::from_symbol(ch).ok_or(BoardParseError::BadCell { row, col, ch })?;
            }
        }

        for col in 0..COLS {
            let height = (0..ROWS)
                .take_while(|&row| board.cells[row][col] != Cell::Empty)
                .count();
            if let Some(row) = (height..ROWS).find(|&row| board.cells[row][col] != Cell::Empty) {
                return Err(BoardParseError::FloatingDisc { row, col });
            }
            board.heights[col] = height as u8;
        }

        Ok(board)
    }
}
