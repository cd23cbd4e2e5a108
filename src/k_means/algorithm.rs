use crate::dataset::{Dataset, Float, Partition};
use crate::error::{Error, Result};
use crate::k_means::{
    EmptyClusterPolicy, KMeansInit, KMeansParams, KMeansParamsError, KMeansValidParams,
};
use crate::traits::{Fit, Predict, Transformer};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, DataMut, Ix1, Ix2, Zip};
use rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// K-means clustering aims to partition a set of unlabeled observations into clusters,
/// where each observation belongs to the cluster with the nearest mean.
///
/// The mean of the points within a cluster is called *centroid*.
///
/// Given the set of centroids, you can assign an observation to a cluster
/// choosing the nearest centroid.
///
/// We provide the _standard algorithm_ (also known as Lloyd's Algorithm).
/// More details on the algorithm can be found
/// [here](https://en.wikipedia.org/wiki/K-means_clustering).
///
/// ## The algorithm
///
/// K-means is an iterative algorithm: it progressively refines the choice of centroids.
///
/// There are three steps:
/// - initialisation step: select initial centroids, by default `n_clusters` dataset points
///                        picked at random;
/// - assignment step: assign each observation to the nearest centroid
///                    (ties go to the centroid with the lowest index);
/// - update step: recompute the centroid of each cluster as the mean of its members.
///
/// The initialisation step is a one-off, done at the very beginning.
/// Assignment and update are repeated in a loop until every centroid moved by at most
/// `tolerance` (comparing centroids with the same index) or we reach `max_n_iterations`.
///
/// A cluster left without points by the assignment step has no mean: depending on the
/// [`EmptyClusterPolicy`] its centroid is either moved onto a random dataset point or kept
/// where it was.
///
/// The fitted model keeps the partition produced by the last assignment step, the final
/// centroids and the sum of squared errors (SSE) of that partition around them.
///
/// ## Tutorial
///
/// ```
/// use kmeans_partition::{Dataset, KMeans, KMeansInit};
/// use kmeans_partition::traits::{Fit, Predict};
/// use ndarray::array;
/// use approx::assert_abs_diff_eq;
///
/// let dataset = Dataset::new(array![[0., 0.], [0., 1.], [10., 0.], [10., 1.]]);
///
/// // `n_clusters` is the only mandatory parameter, the random number generator
/// // can be injected with `KMeans::params_with_rng`.
/// let model = KMeans::params(2)
///     .init_method(KMeansInit::Precomputed(array![[0., 0.], [10., 0.]]))
///     .fit(&dataset)
///     .expect("KMeans fitted");
///
/// assert_abs_diff_eq!(model.centroids(), &array![[0., 0.5], [10., 0.5]]);
/// assert_eq!(model.partition().sizes(), vec![2, 2]);
/// assert_abs_diff_eq!(model.sse(), 1.0);
///
/// // Predict returns the **index** of the nearest centroid
/// let cluster: usize = model.predict(&array![9., 2.]).unwrap();
/// assert_eq!(cluster, 1);
/// ```
pub struct KMeans<F: Float> {
    centroids: Array2<F>,
    memberships: Array1<usize>,
    partition: Partition<F>,
    sse: F,
    n_iterations: u64,
    converged: bool,
}

impl<F: Float> KMeans<F> {
    pub fn params(n_clusters: usize) -> KMeansParams<F, Isaac64Rng> {
        KMeansParams::new(n_clusters, Isaac64Rng::seed_from_u64(42))
    }

    pub fn params_with_rng<R: Rng>(n_clusters: usize, rng: R) -> KMeansParams<F, R> {
        KMeansParams::new(n_clusters, rng)
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape
    /// `(n_centroids, n_features)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Cluster index of each training point, as assigned by the last assignment step
    pub fn memberships(&self) -> &Array1<usize> {
        &self.memberships
    }

    /// The training points grouped by cluster
    pub fn partition(&self) -> &Partition<F> {
        &self.partition
    }

    /// Consume the model, keeping only the partition
    pub fn into_partition(self) -> Partition<F> {
        self.partition
    }

    /// Return the number of training points belonging to each cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.partition.sizes()
    }

    /// Sum of squared euclidean distances between each training point and the final centroid
    /// of its cluster.
    pub fn sse(&self) -> F {
        self.sse
    }

    /// Number of assignment/update steps performed
    pub fn n_iterations(&self) -> u64 {
        self.n_iterations
    }

    /// `false` if the loop stopped because it reached `max_n_iterations`
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl<F: Float, R: Rng + Clone> KMeansValidParams<F, R> {
    fn check_dataset(&self, dataset: &Dataset<F>) -> Result<()> {
        let n_samples = dataset.nsamples();
        if n_samples == 0 {
            return Err(KMeansParamsError::EmptyDataset.into());
        }
        if self.n_clusters() > n_samples {
            return Err(KMeansParamsError::TooManyClusters {
                n_clusters: self.n_clusters(),
                n_samples,
            }
            .into());
        }
        if let KMeansInit::Precomputed(centroids) = self.init_method() {
            if centroids.ncols() != dataset.nfeatures() {
                return Err(Error::DimensionMismatch {
                    row: 0,
                    expected: dataset.nfeatures(),
                    found: centroids.ncols(),
                });
            }
        }
        Ok(())
    }
}

impl<F: Float, R: Rng + Clone> Fit<Dataset<F>, Error> for KMeansValidParams<F, R> {
    type Object = KMeans<F>;

    /// Given a dataset with `n_samples` points of dimension `n_features`,
    /// `fit` identifies `n_clusters` centroids and the partition of the points around them.
    ///
    /// Fails before doing any work if the dataset is empty, holds fewer points than
    /// `n_clusters`, or does not share the dimension of precomputed centroids.
    fn fit(&self, dataset: &Dataset<F>) -> Result<KMeans<F>> {
        self.check_dataset(dataset)?;

        let mut rng = self.rng().clone();
        let observations = dataset.view();

        let mut centroids = self
            .init_method()
            .run(self.n_clusters(), observations, &mut rng);
        let mut memberships = Array1::zeros(dataset.nsamples());
        let mut n_iterations = 0;
        let mut sse;
        let mut converged;

        loop {
            update_cluster_memberships(&centroids, &observations, &mut memberships);
            let (new_centroids, empty_clusters) = compute_centroids(
                &centroids,
                &observations,
                &memberships,
                self.empty_cluster(),
                &mut rng,
            );
            n_iterations += 1;

            for cluster in empty_clusters {
                warn!(
                    cluster,
                    iteration = n_iterations,
                    policy = ?self.empty_cluster(),
                    "cluster has no points"
                );
            }

            let shifts = centroid_shifts(&centroids, &new_centroids);
            converged = has_converged(&shifts, self.tolerance());
            sse = compute_sse(&new_centroids, &observations, &memberships);
            let max_shift = shifts.iter().fold(F::zero(), |acc, &d| acc.max(d));
            debug!(
                iteration = n_iterations,
                max_shift = %max_shift,
                sse = %sse,
                "k-means step"
            );

            centroids = new_centroids;
            if converged || n_iterations >= self.max_n_iterations() {
                break;
            }
        }

        info!(
            n_clusters = self.n_clusters(),
            n_iterations,
            converged,
            sse = %sse,
            "k-means finished"
        );

        let partition =
            Partition::from_memberships(self.n_clusters(), &observations, &memberships);
        Ok(KMeans {
            centroids,
            memberships,
            partition,
            sse,
            n_iterations,
            converged,
        })
    }
}

impl<F: Float> KMeans<F> {
    fn check_features(&self, n_features: usize) -> Result<()> {
        if n_features != self.centroids.ncols() {
            return Err(Error::DimensionMismatch {
                row: 0,
                expected: self.centroids.ncols(),
                found: n_features,
            });
        }
        Ok(())
    }
}

impl<F: Float, DA: Data<Elem = F>> Transformer<&ArrayBase<DA, Ix2>, Result<Array1<F>>>
    for KMeans<F>
{
    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `transform` returns, for each observation, its squared distance to its closest centroid.
    fn transform(&self, observations: &ArrayBase<DA, Ix2>) -> Result<Array1<F>> {
        self.check_features(observations.ncols())?;
        Ok(observations.map_axis(Axis(1), |observation| {
            closest_centroid(&self.centroids, &observation).1.powi(2)
        }))
    }
}

impl<F: Float, DA: Data<Elem = F>> Predict<&ArrayBase<DA, Ix2>, Array1<usize>> for KMeans<F> {
    type Error = Error;

    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `predict` returns, for each observation, the index of the closest cluster/centroid.
    ///
    /// You can retrieve the centroid associated to an index using the
    /// [`centroids` method](#method.centroids).
    fn predict(&self, observations: &ArrayBase<DA, Ix2>) -> Result<Array1<usize>> {
        self.check_features(observations.ncols())?;
        let mut memberships = Array1::zeros(observations.nrows());
        update_cluster_memberships(&self.centroids, observations, &mut memberships);
        Ok(memberships)
    }
}

impl<F: Float, DA: Data<Elem = F>> Predict<&ArrayBase<DA, Ix1>, usize> for KMeans<F> {
    type Error = Error;

    /// Given one input observation, return the index of its closest cluster
    fn predict(&self, observation: &ArrayBase<DA, Ix1>) -> Result<usize> {
        self.check_features(observation.len())?;
        Ok(closest_centroid(&self.centroids, observation).0)
    }
}

/// Squared euclidean distance between two points.
///
/// Panics if `a` and `b` do not have the same length.
pub fn squared_distance<F: Float>(
    a: &ArrayBase<impl Data<Elem = F>, Ix1>,
    b: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    Zip::from(a)
        .and(b)
        .fold(F::zero(), |acc, &a, &b| acc + (a - b) * (a - b))
}

/// Euclidean distance between two points, used for assignment, SSE and convergence alike.
///
/// Panics if `a` and `b` do not have the same length.
pub fn euclidean_distance<F: Float>(
    a: &ArrayBase<impl Data<Elem = F>, Ix1>,
    b: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    squared_distance(a, b).sqrt()
}

/// `compute_centroids` returns a 2-dimensional array,
/// where the i-th row is the mean of the observations assigned to the i-th cluster,
/// together with the indices of the clusters which had no observation.
///
/// The centroid of an empty cluster is handled according to `policy`.
pub(crate) fn compute_centroids<F: Float>(
    old_centroids: &Array2<F>,
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_observations,)
    cluster_memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
    policy: EmptyClusterPolicy,
    rng: &mut impl Rng,
) -> (Array2<F>, Vec<usize>) {
    let n_clusters = old_centroids.nrows();
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);
    let mut centroids = Array2::zeros((n_clusters, observations.ncols()));

    Zip::from(observations.rows())
        .and(cluster_memberships)
        .for_each(|observation, &cluster_membership| {
            let mut centroid = centroids.row_mut(cluster_membership);
            centroid += &observation;
            counts[cluster_membership] += 1;
        });

    let mut empty_clusters = Vec::new();
    for (cluster, (mut centroid, &count)) in centroids
        .rows_mut()
        .into_iter()
        .zip(counts.iter())
        .enumerate()
    {
        if count > 0 {
            centroid /= F::cast(count);
            continue;
        }

        empty_clusters.push(cluster);
        match policy {
            EmptyClusterPolicy::Retain => centroid.assign(&old_centroids.row(cluster)),
            EmptyClusterPolicy::Reseed => {
                let index = rng.gen_range(0..observations.nrows());
                centroid.assign(&observations.row(index));
            }
        }
    }
    (centroids, empty_clusters)
}

/// Euclidean distance between each old centroid and the new centroid with the same index.
pub(crate) fn centroid_shifts<F: Float>(
    old_centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    new_centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Array1<F> {
    Zip::from(old_centroids.rows())
        .and(new_centroids.rows())
        .map_collect(|old, new| euclidean_distance(&old, &new))
}

/// Converged when no centroid moved by more than `tolerance`. A NaN shift never converges.
pub(crate) fn has_converged<F: Float>(
    shifts: &ArrayBase<impl Data<Elem = F>, Ix1>,
    tolerance: F,
) -> bool {
    shifts.iter().all(|&shift| shift <= tolerance)
}

/// Sum over all observations of the squared distance to the centroid of their cluster.
pub(crate) fn compute_sse<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    cluster_memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
) -> F {
    Zip::from(observations.rows())
        .and(cluster_memberships)
        .fold(F::zero(), |acc, observation, &cluster_membership| {
            acc + euclidean_distance(&observation, &centroids.row(cluster_membership)).powi(2)
        })
}

// Update `cluster_memberships` with the index of the cluster each observation belongs to.
pub(crate) fn update_cluster_memberships<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .for_each(|observation, cluster_membership| {
            *cluster_membership = closest_centroid(centroids, &observation).0
        });
}

/// Given a matrix of centroids with shape (n_centroids, n_features) and an observation,
/// return the index of the closest centroid (the index of the corresponding row in `centroids`)
/// and the distance to it. The first centroid reaching the minimum distance wins.
pub(crate) fn closest_centroid<F: Float>(
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_features)
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F) {
    let mut iterator = centroids.rows().into_iter().enumerate();

    let (mut closest_index, mut minimum_distance) = match iterator.next() {
        Some((index, centroid)) => (index, euclidean_distance(&centroid, observation)),
        None => return (0, F::infinity()),
    };

    for (centroid_index, centroid) in iterator {
        let distance = euclidean_distance(&centroid, observation);
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}
