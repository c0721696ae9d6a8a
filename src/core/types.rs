//! Core type definitions for the phishing detector

use serde::{Deserialize, Serialize};

/// Prediction result containing the class index and its joint log likelihood
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Index into the sorted class set
    pub class: usize,
    /// Unnormalized joint log likelihood of the winning class
    pub log_likelihood: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(class: usize, log_likelihood: f64) -> Self {
        Self {
            class,
            log_likelihood,
        }
    }
}

/// Sparse vector representation with sorted indices
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    /// Sorted indices of non-zero elements
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the value at a specific index (0 if not present)
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Iterate over `(index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Compute squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum()
    }

    /// Compute L2 norm
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Scale to unit L2 norm in place. Zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }

    /// Number of non-zero elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A single labeled message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub label: String,
}

impl Document {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Name of the column holding the message text
    pub text_column: String,
    /// Name of the column holding the class label
    pub label_column: String,
    /// Fraction of rows held out for evaluation, in (0, 1)
    pub test_size: f64,
    /// Seed for the train/test shuffle
    pub random_state: u64,
    /// Additive (Laplace/Lidstone) smoothing for Naive Bayes
    pub alpha: f64,
    /// Learn class priors from the training data instead of using a uniform prior
    pub fit_prior: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            text_column: "text".to_string(),
            label_column: "label".to_string(),
            test_size: 0.2,
            random_state: 42,
            alpha: 1.0,
            fit_prior: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_vector_creation() {
        let indices = vec![2, 0, 4];
        let values = vec![2.0, 1.0, 3.0];
        let sv = SparseVector::new(indices, values);

        // Check that indices are sorted
        assert_eq!(sv.indices, vec![0, 2, 4]);
        assert_eq!(sv.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sparse_vector_get() {
        let sv = SparseVector::new(vec![1, 3, 5], vec![1.0, 2.0, 3.0]);

        assert_eq!(sv.get(0), 0.0);
        assert_eq!(sv.get(1), 1.0);
        assert_eq!(sv.get(3), 2.0);
        assert_eq!(sv.get(6), 0.0);
    }

    #[test]
    fn test_sparse_vector_normalize() {
        let mut sv = SparseVector::new(vec![0, 1], vec![3.0, 4.0]);
        assert_eq!(sv.norm(), 5.0);

        sv.normalize();
        assert!((sv.values[0] - 0.6).abs() < 1e-12);
        assert!((sv.values[1] - 0.8).abs() < 1e-12);

        let mut empty = SparseVector::empty();
        empty.normalize();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_sparse_vector_iter() {
        let sv = SparseVector::new(vec![4, 1], vec![2.0, 1.0]);
        let pairs: Vec<_> = sv.iter().collect();
        assert_eq!(pairs, vec![(1, 1.0), (4, 2.0)]);
        assert_eq!(sv.nnz(), 2);
    }

    #[test]
    fn test_detector_config_default() {
        let config = DetectorConfig::default();
        assert_eq!(config.text_column, "text");
        assert_eq!(config.label_column, "label");
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.random_state, 42);
        assert_eq!(config.alpha, 1.0);
        assert!(config.fit_prior);
    }

    #[test]
    #[should_panic(expected = "Indices and values must have same length")]
    fn test_sparse_vector_length_mismatch() {
        SparseVector::new(vec![0, 1], vec![1.0, 2.0, 3.0]);
    }
}
