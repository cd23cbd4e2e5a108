use std::collections::HashMap;
use std::fs;
use std::io::Cursor;

use kmeans_partition::io::{load_dataset, persist_partition, read_dataset};
use kmeans_partition::prelude::*;
use kmeans_partition::{generate_blobs, KMeansParamsError};
use ndarray::array;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

// Multiset of points, keyed by their bit patterns
fn point_counts(records: &ndarray::Array2<f64>) -> HashMap<Vec<u64>, usize> {
    let mut counts = HashMap::new();
    for row in records.rows() {
        let key = row.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

#[test]
fn partition_survives_a_round_trip_through_text() {
    let mut rng = Isaac64Rng::seed_from_u64(42);
    let centroids = array![[0., 0., 0.], [8., 8., 8.], [-8., 8., 0.]];
    let dataset = Dataset::new(generate_blobs(40, &centroids, &mut rng));
    let model = KMeans::params_with_rng(3, rng).fit(&dataset).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let paths = persist_partition(dir.path(), model.partition()).unwrap();
    assert_eq!(paths.len(), 3);

    for (index, (path, cluster)) in paths.iter().zip(model.partition().iter()).enumerate() {
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("cluster{}.txt", index)
        );
        let reread: Dataset<f64> = load_dataset(path).unwrap();
        assert_eq!(reread.nsamples(), cluster.len());
        assert_eq!(point_counts(reread.records()), point_counts(cluster.points()));
    }
}

#[test]
fn empty_clusters_still_get_a_file() {
    let dataset = Dataset::new(array![[0.], [1.], [2.]]);
    let model = KMeans::params(3)
        .init_method(KMeansInit::Precomputed(array![[1.], [50.], [100.]]))
        .empty_cluster(EmptyClusterPolicy::Retain)
        .fit(&dataset)
        .unwrap();
    assert_eq!(model.cluster_sizes(), vec![3, 0, 0]);

    let dir = tempfile::tempdir().unwrap();
    let paths = persist_partition(dir.path(), model.partition()).unwrap();
    assert_eq!(paths.len(), 3);
    assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "0 \n1 \n2 \n");
    assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "");
    assert_eq!(fs::read_to_string(&paths[2]).unwrap(), "");
}

#[test]
fn text_to_partition() {
    let text = "0 0\n0 1\n10 0\n10 1\n";
    let dataset: Dataset<f64> = read_dataset(Cursor::new(text)).unwrap();
    let model = KMeans::params(2)
        .init_method(KMeansInit::Precomputed(array![[0., 0.], [10., 0.]]))
        .fit(&dataset)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let paths = persist_partition(dir.path(), model.partition()).unwrap();
    assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "0 0 \n0 1 \n");
    assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "10 0 \n10 1 \n");
}

#[test]
fn malformed_input_stops_before_clustering() {
    let res: Result<Dataset<f64>> = read_dataset(Cursor::new("1.0 2.0 3.0\n1.0 abc 3.0\n"));
    assert!(matches!(res, Err(Error::MalformedInput { line: 2, .. })));
}

#[test]
fn too_many_clusters_writes_nothing() {
    let dataset: Dataset<f64> = read_dataset(Cursor::new("1 2\n3 4\n")).unwrap();
    let res = KMeans::params(3).fit(&dataset);
    assert!(matches!(
        res,
        Err(Error::InvalidConfiguration(
            KMeansParamsError::TooManyClusters {
                n_clusters: 3,
                n_samples: 2
            }
        ))
    ));
}
