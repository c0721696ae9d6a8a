//! Core traits for the phishing detector

use crate::core::{Prediction, SparseVector};

/// Labeled text dataset abstraction
pub trait TextDataset {
    /// Number of documents in the dataset
    fn len(&self) -> usize;

    /// Text of a single document
    ///
    /// # Panics
    /// Panics if index >= len()
    fn text(&self, i: usize) -> &str;

    /// Label of a single document
    ///
    /// # Panics
    /// Panics if index >= len()
    fn label(&self, i: usize) -> &str;

    /// All texts in row order
    fn texts(&self) -> Vec<&str> {
        (0..self.len()).map(|i| self.text(i)).collect()
    }

    /// All labels in row order
    fn labels(&self) -> Vec<&str> {
        (0..self.len()).map(|i| self.label(i)).collect()
    }

    /// Check if the dataset is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trained classifier over sparse feature rows
pub trait Classifier {
    /// Predict a single row
    fn predict(&self, features: &SparseVector) -> Prediction;

    /// Predict multiple rows
    fn predict_batch(&self, rows: &[SparseVector]) -> Vec<Prediction> {
        rows.iter().map(|r| self.predict(r)).collect()
    }

    /// Number of classes the model distinguishes
    fn n_classes(&self) -> usize;
}
