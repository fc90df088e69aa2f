//! [`HcpProblem`](crate::traits::HcpProblem) implementations.
//!
//! - [`grid_path`] : maximum-sum monotonic path through an integer grid, one
//!   grid row per layer.

pub mod grid_path;
