//! The full score table: best path sum from the origin to every cell.

use std::ops::Index;

use crate::grid::{Cell, Grid};

/// `R × C` table where `table[(i, j)]` is the maximum sum of any monotonic
/// path from `(0, 0)` to `(i, j)`, both endpoints included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    rows: usize,
    cols: usize,
    scores: Vec<i64>,
}

impl ScoreTable {
    /// Fill the table in row-major order.
    ///
    /// Row 0 and column 0 are running sums; every other cell adds its grid
    /// value to the larger of the scores above and to the left. Sums saturate
    /// at the `i64` bounds.
    pub fn build(grid: &Grid) -> Self {
        if grid.is_degenerate() {
            return Self::default();
        }
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut scores = Vec::with_capacity(rows * cols);

        let mut acc = 0i64;
        for &v in grid.row(0) {
            acc = acc.saturating_add(v);
            scores.push(acc);
        }

        for i in 1..rows {
            let row = grid.row(i);
            let above = (i - 1) * cols;
            scores.push(scores[above].saturating_add(row[0]));
            for j in 1..cols {
                let best = scores[above + j].max(scores[i * cols + j - 1]);
                scores.push(row[j].saturating_add(best));
            }
        }

        Self { rows, cols, scores }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score row `i`.
    pub fn row(&self, i: usize) -> &[i64] {
        &self.scores[i * self.cols..(i + 1) * self.cols]
    }

    /// `table[(R-1, C-1)]`, or `None` for an empty table.
    pub fn optimum(&self) -> Option<i64> {
        self.scores.last().copied()
    }
}

impl Index<Cell> for ScoreTable {
    type Output = i64;

    fn index(&self, cell: Cell) -> &i64 {
        assert!(cell.row < self.rows && cell.col < self.cols);
        &self.scores[cell.row * self.cols + cell.col]
    }
}
