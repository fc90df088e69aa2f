//! Low-memory solving through the height-compressed engine.

use std::num::NonZeroUsize;

use crate::builder::HcpEngineBuilder;
use crate::error::{ConfigError, ShapeError};
use crate::grid::Grid;
use crate::problems::grid_path::GridPathProblem;
use crate::solver::Solution;

/// Solver that keeps roughly √R score rows live instead of the whole table.
///
/// Sums always match [`PathSumSolver`](crate::PathSumSolver); paths are exact
/// optima but may differ from the table solver's choice when several optimal
/// paths exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressedSolver {
    block_size: Option<NonZeroUsize>,
}

impl CompressedSolver {
    /// Solver with block size ⌈√(R-1)⌉.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with a fixed number of rows per block.
    pub fn with_block_size(block_size: usize) -> Result<Self, ConfigError> {
        let block_size = NonZeroUsize::new(block_size).ok_or(ConfigError::ZeroBlockSize)?;
        Ok(Self {
            block_size: Some(block_size),
        })
    }

    pub fn block_size(&self) -> Option<usize> {
        self.block_size.map(NonZeroUsize::get)
    }

    pub fn solve<T: AsRef<[i64]>>(&self, rows: &[T]) -> Result<Solution, ShapeError> {
        let grid = Grid::from_rows(rows)?;
        Ok(self.solve_grid(&grid))
    }

    pub fn solve_grid(&self, grid: &Grid) -> Solution {
        let span = tracing::info_span!(
            "solve_compressed",
            rows = grid.rows(),
            cols = grid.cols(),
            block_size = self.block_size()
        );
        let _enter = span.enter();

        if grid.is_degenerate() {
            tracing::debug!("degenerate grid, returning empty solution");
            return Solution::default();
        }

        let engine = HcpEngineBuilder::new(GridPathProblem::new(grid))
            .with_optional_block_size(self.block_size)
            .build();
        let (sum, path) = engine.run();
        Solution::new(sum, path)
    }
}
