use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use kmeans_partition::io::{load_dataset, persist_partition};
use kmeans_partition::prelude::*;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Init {
    /// Independent random indices, duplicates allowed
    Random,
    /// Distinct random points
    Distinct,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmptyCluster {
    /// Move the centroid onto a random point
    Reseed,
    /// Keep the previous centroid
    Retain,
}

/// Cluster the rows of a whitespace separated text file with k-means and write one
/// `cluster{i}.txt` file per cluster
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Options {
    /// Input file, one point per line
    #[arg(default_value = "synthetic_control_data.txt")]
    input: PathBuf,
    /// Number of clusters
    #[arg(short = 'k', long = "clusters", default_value_t = 6)]
    n_clusters: usize,
    /// Upper bound on assignment/update steps
    #[arg(long, default_value_t = 100)]
    max_iterations: u64,
    /// Largest centroid move still considered converged
    #[arg(long, default_value_t = 1e-4)]
    tolerance: f64,
    /// Seed of the random number generator, drawn from the OS when missing
    #[arg(long)]
    seed: Option<u64>,
    /// Centroid initialization
    #[arg(long, value_enum, default_value_t = Init::Random)]
    init: Init,
    /// Handling of clusters left without points
    #[arg(long, value_enum, default_value_t = EmptyCluster::Reseed)]
    empty_cluster: EmptyCluster,
    /// Directory receiving the cluster files
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Options::parse();

    let dataset: Dataset<f64> = load_dataset(&opt.input)
        .with_context(|| format!("failed to load {}", opt.input.display()))?;

    let rng = match opt.seed {
        Some(seed) => Isaac64Rng::seed_from_u64(seed),
        None => Isaac64Rng::from_entropy(),
    };
    let init = match opt.init {
        Init::Random => KMeansInit::Random,
        Init::Distinct => KMeansInit::RandomDistinct,
    };
    let empty_cluster = match opt.empty_cluster {
        EmptyCluster::Reseed => EmptyClusterPolicy::Reseed,
        EmptyCluster::Retain => EmptyClusterPolicy::Retain,
    };

    let model = KMeans::params_with_rng(opt.n_clusters, rng)
        .max_n_iterations(opt.max_iterations)
        .tolerance(opt.tolerance)
        .init_method(init)
        .empty_cluster(empty_cluster)
        .fit(&dataset)
        .context("k-means failed")?;

    persist_partition(&opt.output_dir, model.partition()).with_context(|| {
        format!(
            "failed to write clusters to {}",
            opt.output_dir.display()
        )
    })?;

    println!("SSE: {}", model.sse());
    println!("Iterations: {}", model.n_iterations());
    println!("Centroids: ");
    for centroid in model.centroids().rows() {
        let values = centroid
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>();
        println!("{}", values.join(" "));
    }

    Ok(())
}
