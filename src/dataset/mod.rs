//! Datasets
//!
//! This module implements the dataset struct holding the points to cluster and the
//! partition structs the clustering engine hands back.
use ndarray::{Array2, ArrayView1, ArrayView2, ScalarOperand};

use num_traits::{FromPrimitive, NumAssignOps, NumCast};

use std::fmt;
use std::iter::Sum;
use std::ops::AddAssign;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod partition;
pub use partition::{Cluster, Partition};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Both are parseable from and printable
/// to the plain text format of the I/O collaborators.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + for<'a> AddAssign<&'a Self>
    + ScalarOperand
    + FromStr
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Dataset
///
/// An ordered sequence of points sharing one dimension, stored as the rows of an `Array2`
/// with shape `(n_samples, n_features)`. A dataset is never mutated once built.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset<F> {
    records: Array2<F>,
}

impl<F: Float> Dataset<F> {
    pub fn new(records: Array2<F>) -> Self {
        Dataset { records }
    }

    /// Build a dataset from individual points, checking that every point has the length of
    /// the first one.
    pub fn from_points(points: Vec<Vec<F>>) -> Result<Self> {
        let n_features = points.first().map(Vec::len).unwrap_or(0);
        if let Some((row, point)) = points
            .iter()
            .enumerate()
            .find(|(_, point)| point.len() != n_features)
        {
            return Err(Error::DimensionMismatch {
                row,
                expected: n_features,
                found: point.len(),
            });
        }

        let records = Array2::from_shape_fn((points.len(), n_features), |(i, j)| points[i][j]);
        Ok(Dataset { records })
    }
}

impl<F> Dataset<F> {
    /// The points as a matrix with shape `(n_samples, n_features)`
    pub fn records(&self) -> &Array2<F> {
        &self.records
    }

    pub fn view(&self) -> ArrayView2<'_, F> {
        self.records.view()
    }

    pub fn point(&self, index: usize) -> ArrayView1<'_, F> {
        self.records.row(index)
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.records.nrows() == 0
    }

    pub fn into_records(self) -> Array2<F> {
        self.records
    }
}

impl<F: Float> From<Array2<F>> for Dataset<F> {
    fn from(records: Array2<F>) -> Self {
        Dataset::new(records)
    }
}
