//! Walk the bundled example one step at a time, the way a viewer would.
//!
//! ```text
//! cargo run --example step_through
//! ```

use maxpath_dp::{
    prefix, Cell, ForcedMoves, ForwardGreedy, Grid, Move, PathSumSolver, StepCursor,
};

fn main() {
    let grid = Grid::example();

    let solution = PathSumSolver::new().solve_grid(&grid);
    println!("optimal sum: {}", solution.sum);
    let mut cursor = StepCursor::new(&grid, solution.clone());
    if let Some(first) = cursor.current() {
        print_board(&grid, &solution.path, first.current_step);
    }
    while let Some(update) = cursor.advance() {
        println!(
            "step {} at ({}, {}): running sum {} of {}{}",
            update.current_step,
            update.current_position.row,
            update.current_position.col,
            update.current_sum,
            update.total_sum,
            if update.is_complete { " (done)" } else { "" }
        );
    }
    print_board(&grid, &solution.path, cursor.step());

    // The legacy walk forces a down move at (0, 2), but on this grid the greedy
    // comparison already leaves row 0 at (0, 1), so the override never fires.
    let legacy = PathSumSolver::with_policy(ForwardGreedy::legacy()).solve_grid(&grid);
    println!(
        "\nlegacy walk: reported {}, cells sum to {}",
        legacy.sum,
        legacy.path_sum(&grid)
    );

    // Any other override plugs in the same way.
    let custom = ForwardGreedy::with_override(ForcedMoves::new().force(Cell::ORIGIN, Move::Down));
    let custom = PathSumSolver::with_policy(custom).solve_grid(&grid);
    println!("down-first walk: cells sum to {}", custom.path_sum(&grid));
}

fn print_board(grid: &Grid, path: &[Cell], step: usize) {
    let Some(p) = prefix(grid, path, step) else {
        return;
    };
    println!("\nafter step {} (sum {}):", p.step, p.partial_sum);
    for r in 0..grid.rows() {
        let line: String = (0..grid.cols())
            .map(|c| {
                let cell = Cell::new(r, c);
                let v = grid[cell];
                if cell == p.current {
                    format!("<{v:>3}>")
                } else if p.highlighted.contains(&cell) {
                    format!("[{v:>3}]")
                } else {
                    format!(" {v:>3} ")
                }
            })
            .collect();
        println!("{line}");
    }
}
