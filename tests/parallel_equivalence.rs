#![cfg(feature = "parallel")]

use maxpath_dp::{
    builder::HcpEngineBuilder, problems::grid_path::GridPathProblem, CompressedSolver, Grid,
    HcpEngine, PathSumSolver,
};
use proptest::prelude::*;
use std::num::NonZeroUsize;

fn grid_strategy(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(r, c)| {
        prop::collection::vec(prop::collection::vec(-10i64..=10, c), r)
    })
}

proptest! {
    #[test]
    fn parallel_reconstruction_matches_table(rows in grid_strategy(30, 8), b in 1usize..6) {
        let grid = Grid::from_rows(&rows).unwrap();
        let table = PathSumSolver::new().solve_grid(&grid);
        let block_size = NonZeroUsize::new(b).unwrap();
        let (sum, path) = HcpEngineBuilder::new(GridPathProblem::new(&grid))
            .with_block_size(block_size)
            .build()
            .run();
        prop_assert_eq!(sum, table.sum);
        prop_assert_eq!(grid.sum_of(&path), table.sum);
    }

    #[test]
    fn parallel_runs_are_deterministic(rows in grid_strategy(24, 6)) {
        let grid = Grid::from_rows(&rows).unwrap();
        let first = HcpEngine::new(GridPathProblem::new(&grid)).run();
        let second = HcpEngine::new(GridPathProblem::new(&grid)).run();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn compressed_solver_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompressedSolver>();
    assert_send_sync::<GridPathProblem<'static>>();
}
