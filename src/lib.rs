//! Maximum-sum monotonic paths through integer grids.
//!
//! Given a rectangular grid, find the path from the top-left to the
//! bottom-right cell, moving only right or down, whose cell values add up to
//! the largest total, and return both the total and the path.
//!
//! ## Quick start
//! ```
//! use maxpath_dp::{solve, Cell};
//!
//! let solution = solve(&[[1, 3, 1], [1, 5, 1], [4, 2, 1]]).unwrap();
//! assert_eq!(solution.sum, 12);
//! assert_eq!(solution.path.first(), Some(&Cell::new(0, 0)));
//! assert_eq!(solution.path.last(), Some(&Cell::new(2, 2)));
//! ```
//!
//! ## Pieces
//! - [`PathSumSolver`] fills the full score table and hands it to a
//!   [`Reconstruct`] policy. [`Backtrack`] is the default and always returns
//!   an optimal path; [`ForwardGreedy`] reproduces the historical demo walk.
//! - [`CompressedSolver`] runs the same recurrence through the
//!   height-compressed [`HcpEngine`], keeping about √R score rows live while
//!   still returning an exact optimal path.
//! - [`present`] turns a solution into step-by-step updates for viewers.
//! - [`SolverConfig`] selects mode and policy declaratively.
//!
//! Empty grids (`[]` or `[[]]`) solve to sum 0 with an empty path. Ragged
//! input is rejected with [`ShapeError`].

pub mod builder;
pub mod compressed;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod present;
pub mod problems;
pub mod reconstruct;
pub mod solver;
pub mod table;
pub mod traits;

pub use crate::builder::HcpEngineBuilder;
pub use crate::compressed::CompressedSolver;
pub use crate::config::{PolicyKind, SolveMode, SolverConfig};
pub use crate::engine::HcpEngine;
pub use crate::error::{ConfigError, Error, Result, ShapeError};
pub use crate::grid::{Cell, Grid, Move};
pub use crate::present::{prefix, StepCursor, StepUpdate};
pub use crate::reconstruct::{
    Backtrack, ForcedMoves, ForwardGreedy, MoveOverride, NoOverride, Reconstruct,
};
pub use crate::solver::{solve, PathSumSolver, Solution};
pub use crate::table::ScoreTable;
pub use crate::traits::HcpProblem;
