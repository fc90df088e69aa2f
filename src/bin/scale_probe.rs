use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use maxpath_dp::{CompressedSolver, Grid, PathSumSolver, Solution};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use tracing_subscriber::EnvFilter;

/// Time and memory of table vs. height-compressed solving on growing grids.
#[derive(Parser)]
#[command(name = "scale_probe")]
#[command(after_help = "\
Examples:
  cargo run --release --bin scale_probe
  cargo run --release --bin scale_probe -- --format table --verify-limit 256")]
struct Options {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Largest row count whose compressed result is checked against the full table
    #[arg(long, default_value_t = 512)]
    verify_limit: usize,
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn write(self, measurements: &[Measurement]) -> anyhow::Result<()> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone, Serialize)]
struct Measurement {
    scenario: &'static str,
    #[serde(rename = "size")]
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    #[serde(rename = "status")]
    verification_status: VerificationStatus,
    #[serde(rename = "detail")]
    verification_detail: Option<String>,
}

#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Grid path scaling probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  wall_s: wall-clock seconds for one solve");
    eprintln!("  rss_delta_kib: resident memory growth during the solve");
    eprintln!(
        "  status: compressed sums checked against the full table up to {} rows",
        options.verify_limit
    );
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/4] Full score table, square grids...");
    measurements.extend(run_square(&options, &mut sys, Mode::Table));
    eprintln!();

    eprintln!("[2/4] Height-compressed engine, square grids...");
    measurements.extend(run_square(&options, &mut sys, Mode::Compressed));
    eprintln!();

    eprintln!("[3/4] Full score table, tall grids (64 columns)...");
    measurements.extend(run_tall(&options, &mut sys, Mode::Table));
    eprintln!();

    eprintln!("[4/4] Height-compressed engine, tall grids (64 columns)...");
    measurements.extend(run_tall(&options, &mut sys, Mode::Compressed));
    eprintln!();

    print_summary(&measurements, &options);

    options
        .format
        .write(&measurements)
        .context("failed to write measurements")
}

#[derive(Clone, Copy)]
enum Mode {
    Table,
    Compressed,
}

impl Mode {
    fn solve(self, grid: &Grid) -> Solution {
        match self {
            Mode::Table => PathSumSolver::new().solve_grid(grid),
            Mode::Compressed => CompressedSolver::new().solve_grid(grid),
        }
    }
}

fn run_square(options: &Options, sys: &mut System, mode: Mode) -> Vec<Measurement> {
    const SIZES: &[usize] = &[64, 128, 256, 512, 1024, 2048];
    let scenario = match mode {
        Mode::Table => "table_square",
        Mode::Compressed => "compressed_square",
    };
    run_shapes(options, sys, mode, scenario, SIZES.iter().map(|&n| (n, n)))
}

fn run_tall(options: &Options, sys: &mut System, mode: Mode) -> Vec<Measurement> {
    const ROWS: &[usize] = &[1_024, 4_096, 16_384, 65_536];
    let scenario = match mode {
        Mode::Table => "table_tall",
        Mode::Compressed => "compressed_tall",
    };
    run_shapes(options, sys, mode, scenario, ROWS.iter().map(|&r| (r, 64)))
}

fn run_shapes<I>(
    options: &Options,
    sys: &mut System,
    mode: Mode,
    scenario: &'static str,
    shapes: I,
) -> Vec<Measurement>
where
    I: ExactSizeIterator<Item = (usize, usize)>,
{
    let total = shapes.len();
    shapes
        .enumerate()
        .map(|(idx, (rows, cols))| {
            eprint!("      [{}/{}] {}x{}... ", idx + 1, total, rows, cols);
            let grid = deterministic_grid(rows, cols);
            let mut sum = 0i64;
            let m = measure(scenario, format!("{rows}x{cols}"), sys, || {
                let solution = mode.solve(&grid);
                sum = solution.sum;
                verify(options, &grid, &solution, mode)
            });
            eprintln!(
                "{} sum={}, time={:.3}s, rss_delta={} KiB, status={}",
                m.verification_status.icon(),
                sum,
                m.wall_s,
                m.rss_delta_kib,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn verify(
    options: &Options,
    grid: &Grid,
    solution: &Solution,
    mode: Mode,
) -> (VerificationStatus, Option<String>) {
    if !solution.is_consistent(grid) {
        return (
            VerificationStatus::Failed,
            Some(format!(
                "path sums to {}, reported {}",
                solution.path_sum(grid),
                solution.sum
            )),
        );
    }
    match mode {
        Mode::Table => (VerificationStatus::Passed, None),
        Mode::Compressed if grid.rows() <= options.verify_limit => {
            let baseline = PathSumSolver::new().solve_grid(grid).sum;
            if baseline == solution.sum {
                (VerificationStatus::Passed, None)
            } else {
                (
                    VerificationStatus::Failed,
                    Some(format!("expected {baseline}, got {}", solution.sum)),
                )
            }
        }
        Mode::Compressed => (VerificationStatus::NotChecked, None),
    }
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }
    eprintln!("  ✓ Passed: {passed}");
    eprintln!("  ✗ Failed: {failed}");
    eprintln!(
        "  ○ Not checked (rows > {}): {not_checked}",
        options.verify_limit
    );
    eprintln!();

    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!(
            "  {scenario}: runs={}, max_time={max_time:.3}s, max_rss_delta={max_mem} KiB",
            ms.len()
        );
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> anyhow::Result<()> {
    println!("scenario,size,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> anyhow::Result<()> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .max()
        .unwrap_or(0)
        .max("size".len());

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "size", "wall_s", "rss_delta_kib", "status"
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<10}  {:-<14}  {:-<12}  {:-<6}",
        "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(measurements)?);
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        // sysinfo reports bytes
        Some(process) => process.memory() / 1024,
        None => 0,
    }
}

/// Mixed-sign values in `-9..=9`, stable across runs.
fn deterministic_grid(rows: usize, cols: usize) -> Grid {
    let data: Vec<Vec<i64>> = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| ((r * 31 + c * 17 + (r * c) % 7) % 19) as i64 - 9)
                .collect()
        })
        .collect();
    Grid::from_rows(&data).unwrap_or_default()
}
