//! Input grid, cell coordinates and unit moves.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// The 5×5 grid shipped as the worked example.
pub const EXAMPLE_ROWS: [[i64; 5]; 5] = [
    [7, 15, 1, 3, 14],
    [2, 3, 0, 0, 1],
    [9, 2, 5, 8, 4],
    [1, 7, 3, 1, 2],
    [12, 2, 6, 1, 2],
];

/// A 0-indexed `(row, col)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { row: 0, col: 0 };

    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// One step of a monotonic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Right,
    Down,
}

impl Move {
    /// Cell reached by taking this move from `from`.
    #[inline]
    pub fn apply(self, from: Cell) -> Cell {
        match self {
            Move::Right => Cell::new(from.row, from.col + 1),
            Move::Down => Cell::new(from.row + 1, from.col),
        }
    }

    /// Whether the move stays inside a `rows × cols` grid.
    #[inline]
    pub fn is_legal(self, from: Cell, rows: usize, cols: usize) -> bool {
        match self {
            Move::Right => from.col + 1 < cols,
            Move::Down => from.row + 1 < rows,
        }
    }

    /// The move that leads from `from` to `to`, if they are one unit step apart.
    pub fn between(from: Cell, to: Cell) -> Option<Move> {
        if to.row == from.row && to.col == from.col + 1 {
            Some(Move::Right)
        } else if to.col == from.col && to.row == from.row + 1 {
            Some(Move::Down)
        } else {
            None
        }
    }
}

/// Rectangular integer matrix, stored row-major.
///
/// A grid with no rows or no columns is *degenerate*: it is accepted and
/// solves to an empty path with sum 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl Grid {
    /// Validate and copy `rows` into a grid.
    ///
    /// Fails with [`ShapeError::Ragged`] naming the first row whose length
    /// differs from row 0.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let cols = first.as_ref().len();
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// The bundled 5×5 example.
    pub fn example() -> Self {
        Self {
            rows: EXAMPLE_ROWS.len(),
            cols: EXAMPLE_ROWS[0].len(),
            cells: EXAMPLE_ROWS.iter().flatten().copied().collect(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when there is no cell to stand on.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Value at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: Cell) -> Option<i64> {
        self.contains(cell)
            .then(|| self.cells[cell.row * self.cols + cell.col])
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= self.rows()`.
    pub fn row(&self, i: usize) -> &[i64] {
        assert!(i < self.rows, "row {i} out of range");
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// Bottom-right cell of a non-degenerate grid.
    pub fn terminal(&self) -> Option<Cell> {
        (!self.is_degenerate()).then(|| Cell::new(self.rows - 1, self.cols - 1))
    }

    /// Sum of the values at `cells`, saturating at the `i64` bounds.
    pub fn sum_of(&self, cells: &[Cell]) -> i64 {
        cells
            .iter()
            .fold(0i64, |acc, &cell| acc.saturating_add(self[cell]))
    }
}

impl Index<Cell> for Grid {
    type Output = i64;

    fn index(&self, cell: Cell) -> &i64 {
        assert!(
            self.contains(cell),
            "cell ({}, {}) outside {}x{} grid",
            cell.row,
            cell.col,
            self.rows,
            self.cols
        );
        &self.cells[cell.row * self.cols + cell.col]
    }
}

impl TryFrom<Vec<Vec<i64>>> for Grid {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Grid::from_rows(&rows)
    }
}

/// True when `path` is a monotonic path from the origin to the bottom-right
/// cell of a `rows × cols` grid.
pub fn is_monotonic_path(path: &[Cell], rows: usize, cols: usize) -> bool {
    if rows == 0 || cols == 0 {
        return path.is_empty();
    }
    path.len() == rows + cols - 1
        && path.first() == Some(&Cell::ORIGIN)
        && path.last() == Some(&Cell::new(rows - 1, cols - 1))
        && path
            .windows(2)
            .all(|w| Move::between(w[0], w[1]).is_some())
}
