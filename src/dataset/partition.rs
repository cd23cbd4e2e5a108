use ndarray::{Array2, ArrayBase, Axis, Data, Ix1, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::Float;

/// The points assigned to one centroid.
///
/// `indices` are positions in the source dataset, in the order the assignment pass visited
/// them, and `points` holds the matching rows.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<F> {
    indices: Vec<usize>,
    points: Array2<F>,
}

impl<F> Cluster<F> {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Member points with shape `(len, n_features)`
    pub fn points(&self) -> &Array2<F> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A mapping from cluster index `0..n_clusters` to its [`Cluster`].
///
/// Every point of the dataset it was built from belongs to exactly one cluster. Clusters may
/// be empty.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Partition<F> {
    clusters: Vec<Cluster<F>>,
}

impl<F: Float> Partition<F> {
    /// Group the rows of `observations` by the cluster index in `memberships`.
    ///
    /// Every membership must be smaller than `n_clusters`.
    pub fn from_memberships(
        n_clusters: usize,
        // (n_observations, n_features)
        observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
        // (n_observations,)
        memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
    ) -> Self {
        let mut indices = vec![Vec::new(); n_clusters];
        for (index, &cluster) in memberships.iter().enumerate() {
            indices[cluster].push(index);
        }

        let clusters = indices
            .into_iter()
            .map(|indices| Cluster {
                points: observations.select(Axis(0), &indices),
                indices,
            })
            .collect();
        Partition { clusters }
    }
}

impl<F> Partition<F> {
    pub fn clusters(&self) -> &[Cluster<F>] {
        &self.clusters
    }

    pub fn cluster(&self, index: usize) -> Option<&Cluster<F>> {
        self.clusters.get(index)
    }

    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Number of points per cluster
    pub fn sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Cluster::len).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster<F>> {
        self.clusters.iter()
    }
}

impl<'a, F> IntoIterator for &'a Partition<F> {
    type Item = &'a Cluster<F>;
    type IntoIter = std::slice::Iter<'a, Cluster<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
