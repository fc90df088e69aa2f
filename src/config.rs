//! Declarative solver configuration.
//!
//! [`SolverConfig`] is what the binaries build from their flags and what
//! embedding code can deserialize from its own settings:
//!
//! ```
//! use maxpath_dp::{Grid, SolverConfig};
//!
//! let config: SolverConfig =
//!     serde_json::from_str(r#"{"mode": {"compressed": {"block_size": 2}}}"#).unwrap();
//! let solution = config.solve(&Grid::example()).unwrap();
//! assert_eq!(solution.sum, 49);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compressed::CompressedSolver;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::reconstruct::{Backtrack, ForwardGreedy};
use crate::solver::{PathSumSolver, Solution};

/// How the score table is held in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMode {
    /// Full `R × C` table.
    #[default]
    Table,
    /// Height-compressed engine; `None` picks ⌈√(R-1)⌉ rows per block.
    Compressed {
        #[serde(default)]
        block_size: Option<usize>,
    },
}

/// Which reconstruction policy the table solver uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// [`Backtrack`].
    #[default]
    Backtrack,
    /// [`ForwardGreedy::legacy`], for parity with the historical demo.
    Legacy,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Backtrack => "backtrack",
            PolicyKind::Legacy => "legacy",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backtrack" => Ok(PolicyKind::Backtrack),
            "legacy" => Ok(PolicyKind::Legacy),
            other => Err(format!(
                "unknown policy '{other}' (expected 'backtrack' or 'legacy')"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub mode: SolveMode,
    pub policy: PolicyKind,
}

impl SolverConfig {
    /// Reject combinations that cannot run: a zero block size, or a
    /// non-default policy in compressed mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            SolveMode::Table => Ok(()),
            SolveMode::Compressed { block_size } => {
                if block_size == Some(0) {
                    return Err(ConfigError::ZeroBlockSize);
                }
                if self.policy != PolicyKind::Backtrack {
                    return Err(ConfigError::UnsupportedPolicy {
                        policy: self.policy.as_str(),
                        mode: "compressed",
                    });
                }
                Ok(())
            }
        }
    }

    /// Validate, then solve `grid` with the configured mode and policy.
    pub fn solve(&self, grid: &Grid) -> Result<Solution, ConfigError> {
        self.validate()?;
        let solution = match (self.mode, self.policy) {
            (SolveMode::Table, PolicyKind::Backtrack) => {
                PathSumSolver::with_policy(Backtrack).solve_grid(grid)
            }
            (SolveMode::Table, PolicyKind::Legacy) => {
                PathSumSolver::with_policy(ForwardGreedy::legacy()).solve_grid(grid)
            }
            (SolveMode::Compressed { block_size }, _) => {
                let solver = match block_size {
                    Some(b) => CompressedSolver::with_block_size(b)?,
                    None => CompressedSolver::new(),
                };
                solver.solve_grid(grid)
            }
        };
        Ok(solution)
    }

    /// Validate the configuration and the raw rows, then solve.
    ///
    /// ```
    /// use maxpath_dp::{Error, SolverConfig};
    ///
    /// let err = SolverConfig::default().solve_rows(&[vec![1, 2], vec![3]]).unwrap_err();
    /// assert!(matches!(err, Error::Shape(_)));
    /// ```
    pub fn solve_rows<T: AsRef<[i64]>>(&self, rows: &[T]) -> crate::Result<Solution> {
        self.validate()?;
        let grid = Grid::from_rows(rows)?;
        Ok(self.solve(&grid)?)
    }
}
