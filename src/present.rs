//! Step-through helpers for presentation layers.
//!
//! Nothing here feeds back into solving. A presenter calls [`prefix`] for the
//! step it wants to show, or drives a [`StepCursor`] one user action at a time.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};
use crate::solver::Solution;

/// The first `step + 1` cells of a path and their running sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix<'p> {
    pub step: usize,
    pub partial_sum: i64,
    pub highlighted: &'p [Cell],
    pub current: Cell,
}

/// Prefix of `path` ending at index `k`, or `None` once `k` runs past the end.
pub fn prefix<'p>(grid: &Grid, path: &'p [Cell], k: usize) -> Option<Prefix<'p>> {
    let highlighted = path.get(..=k)?;
    Some(Prefix {
        step: k,
        partial_sum: grid.sum_of(highlighted),
        highlighted,
        current: path[k],
    })
}

/// State pushed to a viewer after every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpdate {
    pub current_step: usize,
    pub current_position: Cell,
    pub current_sum: i64,
    pub total_sum: i64,
    pub is_complete: bool,
}

/// Restartable cursor over the prefixes of a solved path.
///
/// The cursor never moves past the last cell; [`advance`](Self::advance)
/// returns `None` once it is there.
#[derive(Debug, Clone)]
pub struct StepCursor<'g> {
    grid: &'g Grid,
    solution: Solution,
    step: usize,
}

impl<'g> StepCursor<'g> {
    pub fn new(grid: &'g Grid, solution: Solution) -> Self {
        Self {
            grid,
            solution,
            step: 0,
        }
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// True on the last cell, and for an empty path.
    pub fn is_complete(&self) -> bool {
        self.step + 1 >= self.solution.path.len()
    }

    /// Update for the current step, or `None` for an empty path.
    pub fn current(&self) -> Option<StepUpdate> {
        let p = prefix(self.grid, &self.solution.path, self.step)?;
        Some(StepUpdate {
            current_step: p.step,
            current_position: p.current,
            current_sum: p.partial_sum,
            total_sum: self.solution.sum,
            is_complete: self.is_complete(),
        })
    }

    /// Move one cell forward and report it.
    pub fn advance(&mut self) -> Option<StepUpdate> {
        if self.is_complete() {
            return None;
        }
        self.step += 1;
        self.current()
    }

    /// Back to the first cell.
    pub fn reset(&mut self) -> Option<StepUpdate> {
        self.step = 0;
        self.current()
    }

    /// Every update from the first cell to the last, leaving the cursor intact.
    pub fn updates(&self) -> impl Iterator<Item = StepUpdate> + 'g {
        let mut cursor = self.clone();
        cursor.step = 0;
        let first = cursor.current();
        first
            .into_iter()
            .chain(std::iter::from_fn(move || cursor.advance()))
    }
}
