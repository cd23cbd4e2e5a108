use thiserror::Error;

/// An error when fitting with an invalid hyperparameter, or with hyperparameters which do not
/// fit the dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("tolerance must be a non-negative number")]
    Tolerance,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
    #[error("{n_precomputed} precomputed centroids given for {n_clusters} clusters")]
    PrecomputedCentroids {
        n_clusters: usize,
        n_precomputed: usize,
    },
    #[error("cannot cluster an empty dataset")]
    EmptyDataset,
    #[error("n_clusters ({n_clusters}) exceeds the number of samples ({n_samples})")]
    TooManyClusters { n_clusters: usize, n_samples: usize },
}
