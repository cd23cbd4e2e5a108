//! Plain text input and output
//!
//! Datasets are read from text where each non-blank line holds one point as whitespace
//! separated numbers. A partition is written back as one `cluster{i}.txt` file per cluster,
//! in the same format.
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::{ArrayBase, Data, Ix2};
use tracing::{debug, info};

use crate::dataset::{Dataset, Float, Partition};
use crate::error::{Error, Result};

/// Parse a dataset from `reader`, one point per line. Blank lines are skipped.
pub fn read_dataset<F: Float, R: BufRead>(reader: R) -> Result<Dataset<F>> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let point = line
            .split_whitespace()
            .map(|token| {
                token.parse::<F>().map_err(|_| Error::MalformedInput {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        points.push(point);
    }

    Dataset::from_points(points)
}

/// Open the file at `path` and parse it with [`read_dataset`].
pub fn load_dataset<F: Float, P: AsRef<Path>>(path: P) -> Result<Dataset<F>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_dataset(BufReader::new(file))?;
    info!(
        path = %path.display(),
        n_samples = dataset.nsamples(),
        n_features = dataset.nfeatures(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Write one line per point: every coordinate followed by a space, then a newline.
pub fn write_cluster<F: Float, W: Write>(
    mut writer: W,
    // (n_points, n_features)
    points: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<()> {
    for point in points.rows() {
        for value in point.iter() {
            write!(writer, "{} ", value)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// File name of the `index`-th cluster
pub fn cluster_file_name(index: usize) -> String {
    format!("cluster{}.txt", index)
}

/// Write every cluster of `partition` to `dir/cluster{i}.txt`, empty clusters included,
/// and return the written paths in cluster order.
pub fn persist_partition<F: Float, P: AsRef<Path>>(
    dir: P,
    partition: &Partition<F>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::with_capacity(partition.n_clusters());
    for (index, cluster) in partition.iter().enumerate() {
        let path = dir.join(cluster_file_name(index));
        let file = File::create(&path)?;
        write_cluster(BufWriter::new(file), cluster.points())?;
        debug!(path = %path.display(), n_points = cluster.len(), "wrote cluster");
        paths.push(path);
    }
    info!(
        dir = %dir.display(),
        n_clusters = paths.len(),
        "persisted partition"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::io::{self, Cursor, Read};

    #[test]
    fn reads_whitespace_separated_rows() {
        let text = "  1.0 2.0\t3.0\n\n4 5 6   \n-7e1 8.5 0\n";
        let dataset: Dataset<f64> = read_dataset(Cursor::new(text)).unwrap();
        assert_eq!(
            dataset.records(),
            &array![[1., 2., 3.], [4., 5., 6.], [-70., 8.5, 0.]]
        );
    }

    #[test]
    fn empty_input_gives_empty_dataset() {
        let dataset: Dataset<f64> = read_dataset(Cursor::new("\n  \n")).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn rejects_non_numeric_token() {
        let res: Result<Dataset<f64>> = read_dataset(Cursor::new("0 0 0\n1.0 abc 3.0\n"));
        match res {
            Err(Error::MalformedInput { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        let res: Result<Dataset<f64>> = read_dataset(Cursor::new("1 2\n3 4\n5 6 7\n"));
        assert!(matches!(
            res,
            Err(Error::DimensionMismatch {
                row: 2,
                expected: 2,
                found: 3
            })
        ));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn read_failure_is_io_error() {
        let res: Result<Dataset<f64>> = read_dataset(BufReader::new(FailingReader));
        assert!(matches!(res, Err(Error::Io(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let res: Result<Dataset<f64>> = load_dataset("/definitely/not/here.txt");
        assert!(matches!(res, Err(Error::Io(_))));
    }

    #[test]
    fn writes_one_line_per_point() {
        let mut out = Vec::new();
        write_cluster(&mut out, &array![[1., 2.5], [-3., 0.125]]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2.5 \n-3 0.125 \n");
    }

    #[test]
    fn empty_cluster_writes_nothing() {
        let mut out = Vec::new();
        write_cluster(&mut out, &ndarray::Array2::<f64>::zeros((0, 4))).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn cluster_file_names() {
        assert_eq!(cluster_file_name(0), "cluster0.txt");
        assert_eq!(cluster_file_name(5), "cluster5.txt");
    }
}
