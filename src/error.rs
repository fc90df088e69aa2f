//! Error types.
//!
//! Caller input problems are reported as values; nothing here is retried.
//! An empty grid is not an error, it solves to an empty [`Solution`](crate::Solution).

use thiserror::Error;

/// The input rows do not form a rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// `row` is the first row whose length differs from row 0.
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl ShapeError {
    /// Index of the offending row.
    pub fn row(&self) -> usize {
        match self {
            ShapeError::Ragged { row, .. } => *row,
        }
    }
}

/// Invalid solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("block size must be positive")]
    ZeroBlockSize,

    /// The compressed engine only reconstructs by backtracking.
    #[error("policy `{policy}` is not available in {mode} mode")]
    UnsupportedPolicy {
        policy: &'static str,
        mode: &'static str,
    },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid: {0}")]
    Shape(#[from] ShapeError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_message_names_row() {
        let err = ShapeError::Ragged {
            row: 1,
            expected: 2,
            found: 1,
        };
        assert_eq!(err.row(), 1);
        assert_eq!(err.to_string(), "row 1 has 1 columns, expected 2");
    }

    #[test]
    fn crate_error_wraps_sources() {
        let err: Error = ConfigError::ZeroBlockSize.into();
        assert!(matches!(err, Error::Config(ConfigError::ZeroBlockSize)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: block size must be positive"
        );
    }
}
