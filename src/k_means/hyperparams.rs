use crate::k_means::{KMeansInit, KMeansParamsError};
use crate::param_guard::ParamGuard;
use crate::Float;
use rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// What the update step does with a centroid that attracted no points.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Move the centroid onto a point of the dataset drawn uniformly at random.
    Reseed,
    /// Keep the centroid of the previous iteration.
    Retain,
}

impl Default for EmptyClusterPolicy {
    fn default() -> Self {
        EmptyClusterPolicy::Reseed
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [K-means algorithm](crate::KMeans).
pub struct KMeansValidParams<F: Float, R: Rng> {
    /// The training is considered complete if the euclidean distance
    /// between each old centroid and the new centroid with the same index
    /// is lower or equal than `tolerance`.
    tolerance: F,
    /// We exit the training loop when the number of training iterations
    /// reaches `max_n_iterations` even if the `tolerance` convergence
    /// condition has not been met.
    max_n_iterations: u64,
    /// The number of clusters we will be looking for in the training dataset.
    n_clusters: usize,
    /// The initialization strategy used to initialize the centroids.
    init: KMeansInit<F>,
    /// Handling of clusters left without points by the assignment step.
    empty_cluster: EmptyClusterPolicy,
    /// The random number generator
    rng: R,
}

#[derive(Clone, Debug, PartialEq)]
/// An helper struct used to construct a set of [valid hyperparameters](KMeansValidParams) for
/// the [K-means algorithm](crate::KMeans) (using the builder pattern).
pub struct KMeansParams<F: Float, R: Rng>(KMeansValidParams<F, R>);

impl<F: Float, R: Rng> KMeansParams<F, R> {
    /// `new` lets us configure our training algorithm parameters:
    /// * we will be looking for `n_clusters` in the training dataset;
    /// * the training is considered complete if the euclidean distance
    ///   between every old centroid and its new counterpart
    ///   after a training iteration is lower or equal than `tolerance`;
    /// * we exit the training loop when the number of training iterations
    ///   reaches `max_n_iterations` even if the `tolerance` convergence
    ///   condition has not been met.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `tolerance = 1e-4`
    /// * `max_n_iterations = 100`
    /// * `init = Random`
    /// * `empty_cluster = Reseed`
    pub fn new(n_clusters: usize, rng: R) -> Self {
        Self(KMeansValidParams {
            tolerance: F::cast(1e-4),
            max_n_iterations: 100,
            n_clusters,
            init: KMeansInit::Random,
            empty_cluster: EmptyClusterPolicy::Reseed,
            rng,
        })
    }

    /// Change the value of `tolerance`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }

    /// Change the value of `init`
    pub fn init_method(mut self, init: KMeansInit<F>) -> Self {
        self.0.init = init;
        self
    }

    /// Change the handling of empty clusters
    pub fn empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.0.empty_cluster = policy;
        self
    }
}

impl<F: Float, R: Rng> ParamGuard for KMeansParams<F, R> {
    type Checked = KMeansValidParams<F, R>;
    type Error = KMeansParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(KMeansParamsError::NClusters)
        } else if self.0.tolerance.is_nan() || self.0.tolerance < F::zero() {
            Err(KMeansParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else if let KMeansInit::Precomputed(centroids) = &self.0.init {
            if centroids.nrows() != self.0.n_clusters {
                Err(KMeansParamsError::PrecomputedCentroids {
                    n_clusters: self.0.n_clusters,
                    n_precomputed: centroids.nrows(),
                })
            } else {
                Ok(&self.0)
            }
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> KMeansValidParams<F, R> {
    /// The training is considered complete if the euclidean distance
    /// between every old centroid and the new centroid with the same index
    /// is lower or equal than `tolerance`.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// We exit the training loop when the number of training iterations
    /// reaches `max_n_iterations` even if the `tolerance` convergence
    /// condition has not been met.
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// The number of clusters we will be looking for in the training dataset.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Cluster initialization strategy
    pub fn init_method(&self) -> &KMeansInit<F> {
        &self.init
    }

    /// Handling of clusters left without points
    pub fn empty_cluster(&self) -> EmptyClusterPolicy {
        self.empty_cluster
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

#[cfg(test)]
mod tests {
    use crate::param_guard::ParamGuard;
    use crate::{
        EmptyClusterPolicy, KMeans, KMeansInit, KMeansParams, KMeansParamsError,
        KMeansValidParams,
    };
    use ndarray::array;
    use rand_isaac::Isaac64Rng;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<KMeansParams<f64, Isaac64Rng>>();
        has_autotraits::<KMeansValidParams<f64, Isaac64Rng>>();
    }

    #[test]
    fn defaults() {
        let params = KMeans::<f64>::params(6).check().unwrap();
        assert_eq!(params.n_clusters(), 6);
        assert_eq!(params.max_n_iterations(), 100);
        assert!((params.tolerance() - 1e-4).abs() < 1e-12);
        assert_eq!(params.init_method(), &KMeansInit::Random);
        assert_eq!(params.empty_cluster(), EmptyClusterPolicy::Reseed);
    }

    #[test]
    fn n_clusters_cannot_be_zero() {
        let res = KMeans::<f32>::params(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NClusters)))
    }

    #[test]
    fn tolerance_cannot_be_negative() {
        let res = KMeans::params(1).tolerance(-1.).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)))
    }

    #[test]
    fn tolerance_cannot_be_nan() {
        let res = KMeans::params(1).tolerance(f64::NAN).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)))
    }

    #[test]
    fn tolerance_can_be_zero() {
        let res = KMeans::params(1).tolerance(0.).check();
        assert!(res.is_ok())
    }

    #[test]
    fn max_n_iterations_cannot_be_zero() {
        let res = KMeans::params(1).tolerance(1.).max_n_iterations(0).check();
        assert!(matches!(res, Err(KMeansParamsError::MaxIterations)))
    }

    #[test]
    fn precomputed_centroids_must_match_n_clusters() {
        let res = KMeans::params(3)
            .init_method(KMeansInit::Precomputed(array![[0., 0.], [1., 1.]]))
            .check();
        assert!(matches!(
            res,
            Err(KMeansParamsError::PrecomputedCentroids {
                n_clusters: 3,
                n_precomputed: 2
            })
        ))
    }
}
