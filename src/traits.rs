//! Provide traits for different classes of algorithms
//!

/// Transformation algorithms
///
/// A transformer takes a dataset and transforms it into a different one. It has no concept of
/// state and provides therefore no method to predict new data.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in k-means this would be the centroids and the partition of the dataset around them.
pub trait Fit<D, E: std::error::Error> {
    type Object;

    fn fit(&self, dataset: &D) -> Result<Self::Object, E>;
}

/// Predict with a fitted model
///
/// Prediction may fail when the input does not share the shape of the data the model was
/// fitted on.
pub trait Predict<R, T> {
    type Error: std::error::Error;

    fn predict(&self, x: R) -> Result<T, Self::Error>;
}
