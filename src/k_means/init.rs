use crate::Float;
use ndarray::{Array2, ArrayView2, Axis};
use rand::seq::index;
use rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
/// Specifies centroid initialization algorithm for KMeans.
pub enum KMeansInit<F: Float> {
    /// Pick `n_clusters` random indices into the dataset, each drawn uniformly and
    /// independently. The same point may be picked twice, giving duplicate centroids.
    Random,
    /// Pick `n_clusters` distinct points uniformly at random.
    RandomDistinct,
    /// Use the supplied centroids, one row per cluster.
    Precomputed(Array2<F>),
}

impl<F: Float> Default for KMeansInit<F> {
    fn default() -> Self {
        KMeansInit::Random
    }
}

impl<F: Float> KMeansInit<F> {
    /// Runs the chosen initialization routine. The caller has already checked that
    /// `n_clusters` does not exceed the number of observations and that precomputed centroids
    /// have the right shape.
    pub(crate) fn run<R: Rng>(
        &self,
        n_clusters: usize,
        observations: ArrayView2<F>,
        rng: &mut R,
    ) -> Array2<F> {
        match self {
            Self::Random => random_init(n_clusters, observations, rng),
            Self::RandomDistinct => random_distinct_init(n_clusters, observations, rng),
            Self::Precomputed(centroids) => centroids.clone(),
        }
    }
}

/// Selects `n_clusters` observations by independent uniform indices.
fn random_init<F: Float>(
    n_clusters: usize,
    observations: ArrayView2<F>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let n_samples = observations.nrows();
    let indices = (0..n_clusters)
        .map(|_| rng.gen_range(0..n_samples))
        .collect::<Vec<_>>();
    observations.select(Axis(0), &indices)
}

/// Selects `n_clusters` distinct observations.
fn random_distinct_init<F: Float>(
    n_clusters: usize,
    observations: ArrayView2<F>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let n_samples = observations.nrows();
    let indices = index::sample(rng, n_samples, n_clusters).into_vec();
    observations.select(Axis(0), &indices)
}
