//! Table-based solver and the [`Solution`] it returns.

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::grid::{is_monotonic_path, Cell, Grid};
use crate::reconstruct::{Backtrack, Reconstruct};
use crate::table::ScoreTable;

/// Optimal sum and one path from `(0, 0)` to `(R-1, C-1)`.
///
/// Serializes as `{"path": [{"row": .., "col": ..}, ..], "totalSum": n}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub path: Vec<Cell>,
    #[serde(rename = "totalSum")]
    pub sum: i64,
}

impl Solution {
    pub fn new(sum: i64, path: Vec<Cell>) -> Self {
        Self { path, sum }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Literal sum of the grid values along the path.
    pub fn path_sum(&self, grid: &Grid) -> i64 {
        grid.sum_of(&self.path)
    }

    /// True when the path is a monotonic path over `grid` whose cell sum equals
    /// the reported optimum.
    ///
    /// Always true for [`Backtrack`] and the compressed engine; the forward
    /// greedy policy can fail it.
    pub fn is_consistent(&self, grid: &Grid) -> bool {
        is_monotonic_path(&self.path, grid.rows(), grid.cols()) && self.path_sum(grid) == self.sum
    }
}

/// Maximum path-sum solver over a full score table.
///
/// ```
/// use maxpath_dp::{Grid, PathSumSolver};
///
/// let solution = PathSumSolver::new().solve_grid(&Grid::example());
/// assert_eq!(solution.sum, 49);
/// assert_eq!(solution.path.len(), 9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathSumSolver<R = Backtrack> {
    policy: R,
}

impl PathSumSolver {
    /// Solver using [`Backtrack`] reconstruction.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Reconstruct> PathSumSolver<R> {
    /// Solver using a custom reconstruction policy.
    pub fn with_policy(policy: R) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &R {
        &self.policy
    }

    /// Validate `rows` and solve.
    pub fn solve<T: AsRef<[i64]>>(&self, rows: &[T]) -> Result<Solution, ShapeError> {
        let grid = Grid::from_rows(rows)?;
        Ok(self.solve_grid(&grid))
    }

    /// Solve an already validated grid. Degenerate grids give `(0, [])`.
    pub fn solve_grid(&self, grid: &Grid) -> Solution {
        self.solve_with_table(grid).0
    }

    /// Solve and also hand back the score table.
    pub fn solve_with_table(&self, grid: &Grid) -> (Solution, ScoreTable) {
        let span = tracing::info_span!(
            "solve_table",
            rows = grid.rows(),
            cols = grid.cols(),
            policy = self.policy.name()
        );
        let _enter = span.enter();

        if grid.is_degenerate() {
            tracing::debug!("degenerate grid, returning empty solution");
            return (Solution::default(), ScoreTable::default());
        }

        let table = ScoreTable::build(grid);
        let path = self.policy.reconstruct(grid, &table);
        let sum = table.optimum().unwrap_or(0);
        tracing::debug!(sum, path_len = path.len(), "solved");
        (Solution::new(sum, path), table)
    }
}

/// Solve `rows` with the default solver.
///
/// ```
/// let err = maxpath_dp::solve(&[vec![1, 2], vec![3]]).unwrap_err();
/// assert_eq!(err.row(), 1);
/// ```
pub fn solve<T: AsRef<[i64]>>(rows: &[T]) -> Result<Solution, ShapeError> {
    PathSumSolver::new().solve(rows)
}
