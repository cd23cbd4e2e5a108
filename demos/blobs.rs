use kmeans_partition::io::persist_partition;
use kmeans_partition::traits::Fit;
use kmeans_partition::{generate_blobs, Dataset, KMeans};
use ndarray::{array, Axis};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;

// A routine K-means task: build a synthetic dataset, fit the algorithm on it
// and split the dataset into one text file per cluster.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    // Our random number generator, seeded for reproducibility
    let mut rng = Isaac64Rng::seed_from_u64(42);

    // For each our expected centroids, generate `n` data points around it (a "blob")
    let expected_centroids = array![[10., 10.], [1., 12.], [20., 30.], [-20., 30.],];
    let n = 10000;
    let dataset = Dataset::new(generate_blobs(n, &expected_centroids, &mut rng));

    // Configure our training algorithm
    let n_clusters = expected_centroids.len_of(Axis(0));
    let model = KMeans::params_with_rng(n_clusters, rng)
        .max_n_iterations(200)
        .tolerance(1e-5)
        .fit(&dataset)?;

    println!("SSE: {}", model.sse());
    println!("Iterations: {}", model.n_iterations());
    println!("Centroids:\n{}", model.centroids());

    // cluster0.txt .. cluster3.txt in the working directory
    persist_partition(".", model.partition())?;
    Ok(())
}
