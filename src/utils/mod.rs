//! Utility functions for dataset preparation and inspection

use crate::core::{SparseVector, TextDataset};

/// Train/test partitioning
pub mod split {
    use crate::core::{DetectorError, Result};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// Row indices of a train/test partition
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SplitIndices {
        pub train: Vec<usize>,
        pub test: Vec<usize>,
    }

    /// Sizes of the train and test partitions for `n_samples` rows
    ///
    /// The test partition gets `ceil(test_size * n_samples)` rows.
    pub fn split_sizes(n_samples: usize, test_size: f64) -> Result<(usize, usize)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "Test size must be between 0 and 1, got: {test_size}"
            )));
        }

        let n_test = (test_size * n_samples as f64).ceil() as usize;
        let n_train = n_samples.saturating_sub(n_test);

        if n_train == 0 || n_test == 0 {
            return Err(DetectorError::InvalidParameter(format!(
                "With n_samples={n_samples} and test_size={test_size}, \
                 the resulting train set ({n_train}) or test set ({n_test}) is empty"
            )));
        }

        Ok((n_train, n_test))
    }

    /// Shuffle `0..n_samples` with a seeded RNG and cut it into test and train rows
    ///
    /// The first `n_test` shuffled indices form the test set. The same seed
    /// and row count always give the same partition.
    pub fn train_test_split(n_samples: usize, test_size: f64, seed: u64) -> Result<SplitIndices> {
        let (_, n_test) = split_sizes(n_samples, test_size)?;

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let train = indices.split_off(n_test);
        Ok(SplitIndices {
            train,
            test: indices,
        })
    }

    /// Pick the rows named by `indices`
    pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
        indices.iter().map(|&i| items[i].clone()).collect()
    }
}

/// Validation and preprocessing utilities
pub mod validation {
    use super::*;
    use std::collections::BTreeMap;

    /// Count rows per label
    pub fn check_label_balance<D: TextDataset>(dataset: &D) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in dataset.labels() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of rows whose text is empty or whitespace
    pub fn count_blank_texts<D: TextDataset>(dataset: &D) -> usize {
        dataset
            .texts()
            .iter()
            .filter(|t| t.trim().is_empty())
            .count()
    }
}

/// Statistical utilities for feature matrices
pub mod stats {
    use super::*;

    /// Calculate basic statistics for the rows of a sparse feature matrix
    pub fn sparse_vector_stats(rows: &[SparseVector]) -> SparseVectorStats {
        if rows.is_empty() {
            return SparseVectorStats::default();
        }

        let nnz_values: Vec<usize> = rows.iter().map(|r| r.nnz()).collect();

        let total_nnz: usize = nnz_values.iter().sum();
        let mean_nnz = total_nnz as f64 / rows.len() as f64;

        let max_nnz = *nnz_values.iter().max().unwrap_or(&0);
        let min_nnz = *nnz_values.iter().min().unwrap_or(&0);

        let variance = if rows.len() > 1 {
            nnz_values
                .iter()
                .map(|&x| (x as f64 - mean_nnz).powi(2))
                .sum::<f64>()
                / (rows.len() - 1) as f64
        } else {
            0.0
        };

        SparseVectorStats {
            mean_nnz,
            min_nnz,
            max_nnz,
            variance_nnz: variance,
            empty_rows: nnz_values.iter().filter(|&&n| n == 0).count(),
            total_rows: rows.len(),
        }
    }
}

/// Statistics for sparse vector analysis
#[derive(Debug, Clone, Default)]
pub struct SparseVectorStats {
    pub mean_nnz: f64,
    pub min_nnz: usize,
    pub max_nnz: usize,
    pub variance_nnz: f64,
    pub empty_rows: usize,
    pub total_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DetectorError, Document};
    use crate::data::CsvDataset;

    fn dataset(rows: &[(&str, &str)]) -> CsvDataset {
        CsvDataset::from_documents(rows.iter().map(|(t, l)| Document::new(*t, *l)).collect())
            .unwrap()
    }

    #[test]
    fn test_split_sizes() {
        assert_eq!(split::split_sizes(10, 0.2).unwrap(), (8, 2));
        assert_eq!(split::split_sizes(11, 0.2).unwrap(), (8, 3));
        assert_eq!(split::split_sizes(5, 0.2).unwrap(), (4, 1));
        assert_eq!(split::split_sizes(2, 0.2).unwrap(), (1, 1));
    }

    #[test]
    fn test_split_sizes_invalid() {
        assert!(matches!(
            split::split_sizes(1, 0.2),
            Err(DetectorError::InvalidParameter(_))
        ));
        assert!(matches!(
            split::split_sizes(0, 0.2),
            Err(DetectorError::InvalidParameter(_))
        ));
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(split::split_sizes(10, bad).is_err(), "test_size {bad} accepted");
        }
    }

    #[test]
    fn test_train_test_split_partitions_all_rows() {
        let split = split::train_test_split(23, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 5);
        assert_eq!(split.train.len(), 18);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn test_train_test_split_deterministic() {
        let a = split::train_test_split(50, 0.2, 42).unwrap();
        let b = split::train_test_split(50, 0.2, 42).unwrap();
        assert_eq!(a, b);

        let c = split::train_test_split(50, 0.2, 7).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_select() {
        let items = vec!["a", "b", "c", "d"];
        assert_eq!(split::select(&items, &[3, 0]), vec!["d", "a"]);
    }

    #[test]
    fn test_check_label_balance() {
        let data = dataset(&[("x", "1"), ("y", "0"), ("z", "1")]);
        let counts = validation::check_label_balance(&data);
        assert_eq!(counts["1"], 2);
        assert_eq!(counts["0"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_count_blank_texts() {
        let data = dataset(&[("", "1"), ("   ", "0"), ("hello", "1")]);
        assert_eq!(validation::count_blank_texts(&data), 2);
    }

    #[test]
    fn test_sparse_vector_stats() {
        let rows = vec![
            SparseVector::new(vec![0, 1], vec![1.0, 2.0]),
            SparseVector::empty(),
            SparseVector::new(vec![0, 1, 2, 3], vec![1.0, 2.0, 3.0, 4.0]),
        ];

        let stats = stats::sparse_vector_stats(&rows);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.mean_nnz, 2.0);
        assert_eq!(stats.min_nnz, 0);
        assert_eq!(stats.max_nnz, 4);
        assert_eq!(stats.empty_rows, 1);
        assert_eq!(stats.variance_nnz, 4.0);

        let empty = stats::sparse_vector_stats(&[]);
        assert_eq!(empty.total_rows, 0);
    }
}
