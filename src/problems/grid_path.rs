//! Maximum-sum grid path as a height-compressible DP.
//!
//! Layers are grid rows: the frontier at layer `i` is score row `i`, i.e. the
//! best sum from `(0, 0)` to every cell of row `i`. Stepping to row `i + 1` is
//! the usual recurrence (`left` or `above`, whichever is larger).
//!
//! Boundaries are cells. To split rows `[a, c]` at row `m` we compute, inside
//! the column band `[p, q]` fixed by the outer boundaries, the best sum from
//! `(a, p)` down to each cell of row `m` and the best sum from each of those
//! cells to `(c, q)`. The cell maximizing the two (minus its own value, counted
//! twice) lies on an optimal path. Segments are rebuilt with a local table and
//! the same backtracking rule as the table solver.

use crate::grid::{Cell, Grid};
use crate::reconstruct::backtrack_between;
use crate::traits::HcpProblem;

#[derive(Clone, Copy, Debug)]
pub struct GridPathProblem<'a> {
    grid: &'a Grid,
}

/// One score row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridFrontier {
    pub scores: Vec<i64>,
}

/// Σ[start, end): the score row at `end`.
///
/// Merging keeps the right-hand frontier. When the left boundary of a split is
/// the origin, the frontier is exactly the forward half of the split and saves
/// one band sweep.
#[derive(Clone, Debug)]
pub struct GridSummary {
    pub start: usize,
    pub end: usize,
    pub end_frontier: GridFrontier,
}

impl<'a> GridPathProblem<'a> {
    /// # Panics
    /// Panics on a degenerate grid; those are answered without the engine.
    pub fn new(grid: &'a Grid) -> Self {
        assert!(!grid.is_degenerate(), "grid must contain at least one cell");
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Sweep rows `a..=b` inside columns `p..=q` starting at `(a, p)`, handing
    /// each finished score row to `visit`.
    fn sweep_down<F>(&self, a: usize, b: usize, p: usize, q: usize, mut visit: F)
    where
        F: FnMut(&[i64]),
    {
        let w = q - p + 1;
        let mut prev = vec![0i64; w];
        let mut curr = vec![0i64; w];

        let mut acc = 0i64;
        for (k, &v) in self.grid.row(a)[p..=q].iter().enumerate() {
            acc = acc.saturating_add(v);
            prev[k] = acc;
        }
        visit(&prev);

        for r in a + 1..=b {
            let row = &self.grid.row(r)[p..=q];
            curr[0] = prev[0].saturating_add(row[0]);
            for k in 1..w {
                curr[k] = row[k].saturating_add(prev[k].max(curr[k - 1]));
            }
            visit(&curr);
            std::mem::swap(&mut prev, &mut curr);
        }
    }

    /// Best sums from `(a, p)` to each cell `(m, p..=q)`.
    fn forward_scores(&self, a: usize, m: usize, p: usize, q: usize) -> Vec<i64> {
        let mut last = Vec::new();
        self.sweep_down(a, m, p, q, |row| {
            last.clear();
            last.extend_from_slice(row);
        });
        last
    }

    /// Best sums from each cell `(m, p..=q)` to `(c, q)`, both ends included.
    fn backward_scores(&self, m: usize, c: usize, p: usize, q: usize) -> Vec<i64> {
        let w = q - p + 1;
        let mut next = vec![0i64; w];
        let mut curr = vec![0i64; w];

        let mut acc = 0i64;
        for (k, &v) in self.grid.row(c)[p..=q].iter().enumerate().rev() {
            acc = acc.saturating_add(v);
            next[k] = acc;
        }

        for r in (m..c).rev() {
            let row = &self.grid.row(r)[p..=q];
            curr[w - 1] = next[w - 1].saturating_add(row[w - 1]);
            for k in (0..w - 1).rev() {
                curr[k] = row[k].saturating_add(next[k].max(curr[k + 1]));
            }
            std::mem::swap(&mut next, &mut curr);
        }

        next
    }
}

impl<'a> HcpProblem for GridPathProblem<'a> {
    type State = Cell;
    type Frontier = GridFrontier;
    type Summary = GridSummary;
    type Boundary = Cell;
    type Cost = i64;

    fn num_layers(&self) -> usize {
        self.grid.rows() - 1
    }

    fn init_frontier(&self) -> Self::Frontier {
        let mut acc = 0i64;
        let scores = self
            .grid
            .row(0)
            .iter()
            .map(|&v| {
                acc = acc.saturating_add(v);
                acc
            })
            .collect();
        GridFrontier { scores }
    }

    fn forward_step(&self, layer: usize, frontier_i: &Self::Frontier) -> Self::Frontier {
        let row = self.grid.row(layer + 1);
        let mut scores = Vec::with_capacity(row.len());
        scores.push(frontier_i.scores[0].saturating_add(row[0]));
        for j in 1..row.len() {
            let best = frontier_i.scores[j].max(scores[j - 1]);
            scores.push(row[j].saturating_add(best));
        }
        GridFrontier { scores }
    }

    fn summarize_block(
        &self,
        a: usize,
        b: usize,
        frontier_a: &Self::Frontier,
    ) -> (Self::Frontier, Self::Summary) {
        let mut f = frontier_a.clone();
        for layer in a..b {
            f = self.forward_step(layer, &f);
        }
        let summary = GridSummary {
            start: a,
            end: b,
            end_frontier: f.clone(),
        };
        (f, summary)
    }

    fn merge_summary(&self, left: &Self::Summary, right: &Self::Summary) -> Self::Summary {
        debug_assert_eq!(left.end, right.start, "summaries must be adjacent");
        GridSummary {
            start: left.start,
            end: right.end,
            end_frontier: right.end_frontier.clone(),
        }
    }

    fn initial_boundary(&self) -> Self::Boundary {
        Cell::ORIGIN
    }

    fn terminal_boundary(&self, _frontier_t: &Self::Frontier) -> Self::Boundary {
        Cell::new(self.grid.rows() - 1, self.grid.cols() - 1)
    }

    fn choose_boundary(
        &self,
        a: usize,
        m: usize,
        c: usize,
        sigma_left: &Self::Summary,
        _sigma_right: &Self::Summary,
        beta_a: &Self::Boundary,
        beta_c: &Self::Boundary,
    ) -> Self::Boundary {
        let (p, q) = (beta_a.col, beta_c.col);
        debug_assert!(beta_a.row == a && beta_c.row == c && a < m && m < c);
        debug_assert!(p <= q && q < self.grid.cols());

        let owned;
        let fwd: &[i64] = if *beta_a == Cell::ORIGIN {
            &sigma_left.end_frontier.scores[p..=q]
        } else {
            owned = self.forward_scores(a, m, p, q);
            &owned
        };
        let bwd = self.backward_scores(m, c, p, q);
        let row_m = &self.grid.row(m)[p..=q];

        // Leftmost column wins ties.
        let mut best_k = 0usize;
        let mut best_val = i64::MIN;
        for k in 0..row_m.len() {
            let through = fwd[k].saturating_add(bwd[k]).saturating_sub(row_m[k]);
            if through > best_val {
                best_val = through;
                best_k = k;
            }
        }

        tracing::trace!(row = m, col = p + best_k, through = best_val, "split cell");
        Cell::new(m, p + best_k)
    }

    fn reconstruct_block(
        &self,
        a: usize,
        b: usize,
        beta_a: &Self::Boundary,
        beta_b: &Self::Boundary,
    ) -> Vec<Self::State> {
        let (p, q) = (beta_a.col, beta_b.col);
        debug_assert!(beta_a.row == a && beta_b.row == b);
        debug_assert!(p <= q);

        // Full local table; a block spans few rows.
        let w = q - p + 1;
        let mut local = Vec::with_capacity((b - a + 1) * w);
        self.sweep_down(a, b, p, q, |row| local.extend_from_slice(row));

        backtrack_between(*beta_a, *beta_b, |cell| {
            local[(cell.row - a) * w + (cell.col - p)]
        })
    }

    fn extract_cost(&self, frontier_t: &Self::Frontier, _beta_t: &Self::Boundary) -> Self::Cost {
        frontier_t.scores.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::is_monotonic_path;
    use crate::table::ScoreTable;
    use crate::HcpEngine;

    fn grid(rows: &[&[i64]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn frontiers_match_table_rows() {
        let g = Grid::example();
        let problem = GridPathProblem::new(&g);
        let table = ScoreTable::build(&g);
        let mut f = problem.init_frontier();
        assert_eq!(f.scores, table.row(0));
        for layer in 0..problem.num_layers() {
            f = problem.forward_step(layer, &f);
            assert_eq!(f.scores, table.row(layer + 1));
        }
    }

    #[test]
    fn band_sweeps() {
        let g = grid(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 9]]);
        let problem = GridPathProblem::new(&g);
        // From (0,1): row 2 over columns 1..=2.
        assert_eq!(problem.forward_scores(0, 2, 1, 2), vec![15, 24]);
        // To (2,1) from row 1 over columns 0..=1.
        assert_eq!(problem.backward_scores(1, 2, 0, 1), vec![19, 13]);
    }

    #[test]
    fn example_runs_through_engine() {
        let g = Grid::example();
        for b in 1..=5 {
            let engine = HcpEngine::with_block_size(GridPathProblem::new(&g), b);
            let (sum, path) = engine.run();
            assert_eq!(sum, 49, "block size {b}");
            assert!(is_monotonic_path(&path, 5, 5), "block size {b}");
            assert_eq!(g.sum_of(&path), 49, "block size {b}");
        }
    }

    #[test]
    fn single_row_has_no_layers() {
        let g = grid(&[&[3, -1, 4]]);
        let (sum, path) = HcpEngine::new(GridPathProblem::new(&g)).run();
        assert_eq!(sum, 6);
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
    }

    #[test]
    fn single_column_goes_straight_down() {
        let g = grid(&[&[1], &[2], &[3], &[4]]);
        let (sum, path) = HcpEngine::with_block_size(GridPathProblem::new(&g), 1).run();
        assert_eq!(sum, 10);
        assert_eq!(path, (0..4).map(|r| Cell::new(r, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn split_cell_lies_on_an_optimal_path() {
        let g = Grid::example();
        let problem = GridPathProblem::new(&g);
        let f0 = problem.init_frontier();
        let (f2, left) = problem.summarize_block(0, 2, &f0);
        let (_, right) = problem.summarize_block(2, 4, &f2);
        let cell = problem.choose_boundary(0, 2, 4, &left, &right, &Cell::ORIGIN, &Cell::new(4, 4));
        // The only optimal path runs along row 0 then down column 4.
        assert_eq!(cell, Cell::new(2, 4));
    }

    #[test]
    fn equal_crossings_pick_the_leftmost_column() {
        let g = grid(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        let problem = GridPathProblem::new(&g);
        let f0 = problem.init_frontier();
        let (f1, left) = problem.summarize_block(0, 1, &f0);
        let (_, right) = problem.summarize_block(1, 2, &f1);
        let cell = problem.choose_boundary(0, 1, 2, &left, &right, &Cell::ORIGIN, &Cell::new(2, 2));
        assert_eq!(cell, Cell::new(1, 0));
    }

    #[test]
    fn equal_crossings_inside_a_band() {
        let g = grid(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        let problem = GridPathProblem::new(&g);
        let f0 = problem.init_frontier();
        let (f2, left) = problem.summarize_block(0, 2, &f0);
        let (_, right) = problem.summarize_block(2, 3, &f2);
        // Band is columns 1..=2; both crossings score 4.
        let cell =
            problem.choose_boundary(1, 2, 3, &left, &right, &Cell::new(1, 1), &Cell::new(3, 2));
        assert_eq!(cell, Cell::new(2, 1));
    }
}
