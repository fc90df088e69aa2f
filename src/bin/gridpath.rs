//! Solve a grid for its maximum-sum path, or step through the solution.
//!
//! ```text
//! gridpath solve --grid grid.json --format json
//! gridpath step --policy legacy --delay-ms 250
//! ```
//!
//! Grid files hold a JSON array of rows, e.g. `[[1, 2], [3, 4]]`. Without
//! `--grid` the bundled 5×5 example is used. Set `RUST_LOG=maxpath_dp=debug`
//! to see solver spans on stderr.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use maxpath_dp::{Cell, Grid, PolicyKind, Solution, SolveMode, SolverConfig, StepCursor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridpath")]
#[command(about = "Maximum-sum right/down paths through integer grids")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve once and print the sum and path
    Solve {
        #[command(flatten)]
        solver: SolverArgs,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print one JSON step update per line until the path is complete
    Step {
        #[command(flatten)]
        solver: SolverArgs,

        /// Pause between updates
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
}

#[derive(Args)]
struct SolverArgs {
    /// JSON grid file; defaults to the bundled example
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Reconstruction policy: backtrack or legacy
    #[arg(long, default_value_t = PolicyKind::Backtrack)]
    policy: PolicyKind,

    /// Use the height-compressed engine instead of the full table
    #[arg(long)]
    compressed: bool,

    /// Rows per block in compressed mode
    #[arg(long, requires = "compressed")]
    block_size: Option<usize>,
}

impl SolverArgs {
    fn config(&self) -> SolverConfig {
        let mode = if self.compressed {
            SolveMode::Compressed {
                block_size: self.block_size,
            }
        } else {
            SolveMode::Table
        };
        SolverConfig {
            mode,
            policy: self.policy,
        }
    }

    fn load_grid(&self) -> anyhow::Result<Grid> {
        match &self.grid {
            Some(path) => read_grid(path),
            None => Ok(Grid::example()),
        }
    }

    fn solve(&self) -> anyhow::Result<(Grid, Solution)> {
        let grid = self.load_grid()?;
        let config = self.config();
        tracing::info!(mode = ?config.mode, policy = %config.policy, "solving");
        let solution = config.solve(&grid)?;
        Ok((grid, solution))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Solve { solver, format } => {
            let (grid, solution) = solver.solve()?;
            match format {
                Format::Text => print_text(&grid, &solution),
                Format::Json => println!("{}", serde_json::to_string(&solution)?),
            }
        }
        Command::Step { solver, delay_ms } => {
            let (grid, solution) = solver.solve()?;
            let cursor = StepCursor::new(&grid, solution);
            for (i, update) in cursor.updates().enumerate() {
                if i > 0 && delay_ms > 0 {
                    thread::sleep(Duration::from_millis(delay_ms));
                }
                println!("{}", serde_json::to_string(&update)?);
            }
        }
    }
    Ok(())
}

fn read_grid(path: &Path) -> anyhow::Result<Grid> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid file {}", path.display()))?;
    let rows: Vec<Vec<i64>> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of integer rows", path.display()))?;
    let grid = Grid::try_from(rows).with_context(|| format!("invalid grid in {}", path.display()))?;
    Ok(grid)
}

fn print_text(grid: &Grid, solution: &Solution) {
    println!("Maximum path sum: {}", solution.sum);
    if solution.is_empty() {
        println!("Path: (empty grid)");
        return;
    }

    let cells: Vec<String> = solution
        .path
        .iter()
        .map(|c| format!("({},{})", c.row, c.col))
        .collect();
    println!("Path: {}", cells.join(" -> "));
    let path_sum = solution.path_sum(grid);
    if path_sum != solution.sum {
        println!("Path cell sum: {path_sum} (policy does not follow the optimum)");
    }
    println!();

    let on_path: HashSet<Cell> = solution.path.iter().copied().collect();
    let width = (0..grid.rows())
        .flat_map(|r| grid.row(r).iter())
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    for r in 0..grid.rows() {
        let line: Vec<String> = grid
            .row(r)
            .iter()
            .enumerate()
            .map(|(c, v)| {
                if on_path.contains(&Cell::new(r, c)) {
                    format!("[{v:>width$}]")
                } else {
                    format!(" {v:>width$} ")
                }
            })
            .collect();
        println!("{}", line.join(""));
    }
}
