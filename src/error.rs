//! Error types in kmeans-partition
//!

use thiserror::Error;

use crate::k_means::KMeansParamsError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad hyperparameters, or hyperparameters that do not fit the dataset
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] KMeansParamsError),
    /// A point (or centroid) whose length differs from the dataset dimension
    #[error("dimension mismatch at row {row}: expected {expected} values, found {found}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An input line holding a token which is not a floating point number
    #[error("malformed input at line {line}: cannot parse {token:?} as a number")]
    MalformedInput { line: usize, token: String },
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
