//! Path reconstruction policies.
//!
//! A [`Reconstruct`] implementation turns a finished [`ScoreTable`] into one
//! concrete path from `(0, 0)` to `(R-1, C-1)`.
//!
//! - [`Backtrack`] walks backwards from the terminal cell through
//!   predecessors. The returned path always achieves the table optimum.
//! - [`ForwardGreedy`] walks forwards comparing the scores of the two
//!   successors. It is kept for parity with the historical step-through demo
//!   and does **not** guarantee an optimal path. A [`MoveOverride`] hook can
//!   force moves at chosen cells; [`ForcedMoves::legacy`] carries the demo's
//!   single override.

use std::collections::BTreeMap;

use crate::grid::{Cell, Grid, Move};
use crate::table::ScoreTable;

/// Strategy for recovering a path from a filled score table.
pub trait Reconstruct {
    /// Return a monotonic path over `grid`, or an empty path when the grid is
    /// degenerate. `table` must have been built from `grid`.
    fn reconstruct(&self, grid: &Grid, table: &ScoreTable) -> Vec<Cell>;

    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;
}

/// Backward reconstruction from the terminal cell.
///
/// At each cell the walk steps to the predecessor with the larger score. Ties
/// go to the cell above, i.e. the path prefers to have entered by a down-move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Backtrack;

impl Reconstruct for Backtrack {
    fn reconstruct(&self, grid: &Grid, table: &ScoreTable) -> Vec<Cell> {
        match grid.terminal() {
            Some(end) => backtrack_between(Cell::ORIGIN, end, |cell| table[cell]),
            None => Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "backtrack"
    }
}

/// Walk back from `end` to `start` over a score surface defined on the
/// rectangle spanned by the two cells, then return the path in forward order.
///
/// `score(c)` must be the best sum from `start` to `c`. On the start row only
/// left moves are possible, on the start column only up moves; elsewhere the
/// larger predecessor wins and ties go up.
pub(crate) fn backtrack_between<F>(start: Cell, end: Cell, score: F) -> Vec<Cell>
where
    F: Fn(Cell) -> i64,
{
    debug_assert!(start.row <= end.row && start.col <= end.col);
    let mut cell = end;
    let mut rev = Vec::with_capacity(end.row - start.row + end.col - start.col + 1);
    rev.push(cell);

    while cell != start {
        cell = if cell.row == start.row {
            Cell::new(cell.row, cell.col - 1)
        } else if cell.col == start.col {
            Cell::new(cell.row - 1, cell.col)
        } else {
            let up = Cell::new(cell.row - 1, cell.col);
            let left = Cell::new(cell.row, cell.col - 1);
            // score(cell) = value + max(score(up), score(left)), so the larger
            // predecessor is the one the recurrence took.
            if score(up) >= score(left) {
                up
            } else {
                left
            }
        };
        rev.push(cell);
    }

    rev.reverse();
    rev
}

/// Hook consulted by [`ForwardGreedy`] before its comparison rule.
///
/// Returning `Some(mv)` forces `mv` at `cell`, unless it would leave the grid,
/// in which case the override is ignored.
pub trait MoveOverride {
    fn forced_move(&self, cell: Cell) -> Option<Move>;
}

impl<F> MoveOverride for F
where
    F: Fn(Cell) -> Option<Move>,
{
    fn forced_move(&self, cell: Cell) -> Option<Move> {
        self(cell)
    }
}

/// Never forces anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOverride;

impl MoveOverride for NoOverride {
    fn forced_move(&self, _cell: Cell) -> Option<Move> {
        None
    }
}

/// A fixed table of forced moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedMoves {
    moves: BTreeMap<Cell, Move>,
}

impl ForcedMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force `mv` whenever the walk stands on `cell`.
    pub fn force(mut self, cell: Cell, mv: Move) -> Self {
        self.moves.insert(cell, mv);
        self
    }

    /// The override used by the historical demo: always go down from `(0, 2)`.
    pub fn legacy() -> Self {
        Self::new().force(Cell::new(0, 2), Move::Down)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl MoveOverride for ForcedMoves {
    fn forced_move(&self, cell: Cell) -> Option<Move> {
        self.moves.get(&cell).copied()
    }
}

/// Forward greedy walk from the origin.
///
/// From `(i, j)`: on the last row move right, on the last column move down,
/// otherwise move right only if `table[(i, j+1)] > table[(i+1, j)]`, else
/// down. Legal forced moves from the override hook take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardGreedy<O = NoOverride> {
    overrides: O,
}

impl ForwardGreedy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForwardGreedy<ForcedMoves> {
    /// Forward greedy with the historical `(0, 2)` override.
    pub fn legacy() -> Self {
        Self::with_override(ForcedMoves::legacy())
    }
}

impl<O: MoveOverride> ForwardGreedy<O> {
    pub fn with_override(overrides: O) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &O {
        &self.overrides
    }

    fn next_move(&self, table: &ScoreTable, cell: Cell) -> Move {
        let (rows, cols) = (table.rows(), table.cols());
        if let Some(mv) = self.overrides.forced_move(cell) {
            if mv.is_legal(cell, rows, cols) {
                tracing::debug!(row = cell.row, col = cell.col, ?mv, "forced move");
                return mv;
            }
            tracing::debug!(
                row = cell.row,
                col = cell.col,
                ?mv,
                "ignoring forced move that leaves the grid"
            );
        }

        if cell.row + 1 == rows {
            Move::Right
        } else if cell.col + 1 == cols {
            Move::Down
        } else if table[Move::Right.apply(cell)] > table[Move::Down.apply(cell)] {
            Move::Right
        } else {
            Move::Down
        }
    }
}

impl<O: MoveOverride> Reconstruct for ForwardGreedy<O> {
    fn reconstruct(&self, grid: &Grid, table: &ScoreTable) -> Vec<Cell> {
        let Some(end) = grid.terminal() else {
            return Vec::new();
        };
        let mut cell = Cell::ORIGIN;
        let mut path = Vec::with_capacity(end.row + end.col + 1);
        path.push(cell);
        while cell != end {
            cell = self.next_move(table, cell).apply(cell);
            path.push(cell);
        }
        path
    }

    fn name(&self) -> &'static str {
        "forward-greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::is_monotonic_path;

    fn cells(raw: &[(usize, usize)]) -> Vec<Cell> {
        raw.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn backtrack_on_example_runs_along_the_top_then_down() {
        let grid = Grid::example();
        let table = ScoreTable::build(&grid);
        let path = Backtrack.reconstruct(&grid, &table);
        assert_eq!(
            path,
            cells(&[
                (0, 0),
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 4),
                (2, 4),
                (3, 4),
                (4, 4)
            ])
        );
        assert_eq!(grid.sum_of(&path), 49);
    }

    #[test]
    fn backtrack_ties_prefer_entering_from_above() {
        let grid = Grid::from_rows(&[vec![1, 1], vec![1, 1]]).unwrap();
        let table = ScoreTable::build(&grid);
        assert_eq!(
            Backtrack.reconstruct(&grid, &table),
            cells(&[(0, 0), (0, 1), (1, 1)])
        );
    }

    #[test]
    fn backtrack_between_sub_rectangle() {
        // Scores from (1,1) over a 2x2 block of ones.
        let score = |c: Cell| ((c.row - 1) + (c.col - 1) + 1) as i64;
        let path = backtrack_between(Cell::new(1, 1), Cell::new(2, 2), score);
        assert_eq!(path, cells(&[(1, 1), (1, 2), (2, 2)]));
        let single = backtrack_between(Cell::new(3, 3), Cell::new(3, 3), score);
        assert_eq!(single, cells(&[(3, 3)]));
    }

    #[test]
    fn forward_greedy_legacy_reproduces_demo_walk() {
        let grid = Grid::example();
        let table = ScoreTable::build(&grid);
        let path = ForwardGreedy::legacy().reconstruct(&grid, &table);
        assert_eq!(
            path,
            cells(&[
                (0, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (3, 1),
                (3, 2),
                (4, 2),
                (4, 3),
                (4, 4)
            ])
        );
        // The greedy walk is a heuristic: on the example it misses the optimum.
        assert_eq!(grid.sum_of(&path), 46);
        assert_eq!(table.optimum(), Some(49));
    }

    #[test]
    fn forced_move_applies_when_reached() {
        let grid = Grid::from_rows(&[vec![1, 9, 9], vec![1, 1, 1], vec![1, 1, 1]]).unwrap();
        let table = ScoreTable::build(&grid);
        let plain = ForwardGreedy::new().reconstruct(&grid, &table);
        assert_eq!(plain[1], Cell::new(0, 1));

        let overrides = ForcedMoves::new().force(Cell::new(0, 1), Move::Down);
        let forced = ForwardGreedy::with_override(overrides).reconstruct(&grid, &table);
        assert_eq!(forced[2], Cell::new(1, 1));
        assert!(is_monotonic_path(&forced, 3, 3));
    }

    #[test]
    fn forward_walk_goes_down_on_equal_scores() {
        let grid = Grid::from_rows(&[vec![1, 1], vec![1, 1]]).unwrap();
        let table = ScoreTable::build(&grid);
        assert_eq!(table[Cell::new(0, 1)], table[Cell::new(1, 0)]);
        let path = ForwardGreedy::new().reconstruct(&grid, &table);
        assert_eq!(path, cells(&[(0, 0), (1, 0), (1, 1)]));
    }

    #[test]
    fn illegal_forced_move_is_ignored_on_single_row() {
        let grid = Grid::from_rows(&[vec![1, 2, 3, 4]]).unwrap();
        let table = ScoreTable::build(&grid);
        let path = ForwardGreedy::legacy().reconstruct(&grid, &table);
        assert_eq!(path, cells(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn closure_override() {
        let grid = Grid::from_rows(&[vec![0, 5], vec![0, 0]]).unwrap();
        let table = ScoreTable::build(&grid);
        let always_down = |_cell: Cell| Some(Move::Down);
        let path = ForwardGreedy::with_override(always_down).reconstruct(&grid, &table);
        assert_eq!(path, cells(&[(0, 0), (1, 0), (1, 1)]));
    }

    #[test]
    fn degenerate_grid_gives_empty_path() {
        let grid = Grid::default();
        let table = ScoreTable::build(&grid);
        assert!(Backtrack.reconstruct(&grid, &table).is_empty());
        assert!(ForwardGreedy::legacy().reconstruct(&grid, &table).is_empty());
    }
}
