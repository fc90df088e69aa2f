use maxpath_dp::{prefix, Cell, CompressedSolver, Grid, PathSumSolver, StepCursor, StepUpdate};

#[test]
fn updates_accumulate_to_the_total() {
    let grid = Grid::example();
    let cursor = StepCursor::new(&grid, PathSumSolver::new().solve_grid(&grid));
    let updates: Vec<StepUpdate> = cursor.updates().collect();

    assert_eq!(updates.len(), 9);
    assert_eq!(updates[0].current_position, Cell::ORIGIN);
    let last = updates.last().unwrap();
    assert!(last.is_complete);
    assert_eq!(last.current_sum, last.total_sum);
    assert!(updates
        .windows(2)
        .all(|w| w[1].current_step == w[0].current_step + 1));
}

#[test]
fn cursor_works_on_compressed_solutions() {
    let rows: Vec<Vec<i64>> = (0..10)
        .map(|r| (0..4).map(|c| ((r * 7 + c * 3) % 5) as i64 - 2).collect())
        .collect();
    let grid = Grid::from_rows(&rows).unwrap();
    let solution = CompressedSolver::with_block_size(2)
        .unwrap()
        .solve_grid(&grid);
    let total = solution.sum;
    let mut cursor = StepCursor::new(&grid, solution);

    let mut last = cursor.current().unwrap();
    while let Some(update) = cursor.advance() {
        last = update;
    }
    assert_eq!(last.current_sum, total);
    assert_eq!(last.current_position, Cell::new(9, 3));

    let restarted = cursor.reset().unwrap();
    assert_eq!(restarted.current_step, 0);
    assert!(!cursor.is_complete());
}

#[test]
fn prefix_past_the_end_is_none() {
    let grid = Grid::from_rows(&[[1, 2], [3, 4]]).unwrap();
    let solution = PathSumSolver::new().solve_grid(&grid);
    assert_eq!(prefix(&grid, &solution.path, 2).unwrap().partial_sum, 8);
    assert!(prefix(&grid, &solution.path, 3).is_none());
    assert!(prefix(&grid, &[], 0).is_none());
}

#[test]
fn updates_are_json_lines_in_camel_case() {
    let grid = Grid::from_rows(&[[5]]).unwrap();
    let cursor = StepCursor::new(&grid, PathSumSolver::new().solve_grid(&grid));
    let lines: Vec<String> = cursor
        .updates()
        .map(|u| serde_json::to_string(&u).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![
            r#"{"currentStep":0,"currentPosition":{"row":0,"col":0},"currentSum":5,"totalSum":5,"isComplete":true}"#
        ]
    );
}
