//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum TabulaError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid coordinate is not smaller than the bin count of its dimension.
    #[error("Cell coordinate {coord} is out of range for dimension {dim} with {bins} bins")]
    CellOutOfRange {
        /// Dimension of the offending coordinate.
        dim: usize,
        /// The coordinate.
        coord: usize,
        /// Number of bins of the dimension.
        bins: usize,
    },
}
