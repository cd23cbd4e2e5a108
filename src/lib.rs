//! `kmeans-partition` groups fixed-length numeric feature vectors into a fixed number of
//! clusters with the k-means algorithm, and splits the source data into one text file per
//! cluster.
//!
//! ## The big picture
//!
//! The crate is organised around three pieces:
//! * a [`Dataset`]: the ordered points to cluster, all sharing one dimension;
//! * the clustering engine, [`KMeans`], configured through the builder returned by
//!   [`KMeans::params`] and run with [`Fit::fit`](traits::Fit::fit);
//! * the [`io`] collaborators, reading a dataset from whitespace separated text and
//!   persisting the resulting [`Partition`] as `cluster{i}.txt` files.
//!
//! ```no_run
//! use kmeans_partition::prelude::*;
//! use kmeans_partition::io::{load_dataset, persist_partition};
//!
//! let dataset: Dataset<f64> = load_dataset("synthetic_control_data.txt")?;
//! let model = KMeans::params(6).fit(&dataset)?;
//! println!("SSE: {} after {} iterations", model.sse(), model.n_iterations());
//! persist_partition(".", model.partition())?;
//! # Ok::<(), kmeans_partition::Error>(())
//! ```
//!
//! Runs are reproducible: the random number generator used for initialization is part of
//! the hyperparameters and can be seeded with [`KMeans::params_with_rng`].

pub mod dataset;
pub mod error;
pub mod io;
mod k_means;
pub mod param_guard;
pub mod prelude;
pub mod traits;
mod utils;

pub use dataset::{Cluster, Dataset, Float, Partition};
pub use error::{Error, Result};
pub use k_means::*;
pub use param_guard::ParamGuard;
pub use utils::{generate_blob, generate_blobs};
