//! Multinomial Naive Bayes
//!
//! Per-class feature distributions are estimated from summed (possibly
//! fractional) feature values with additive smoothing:
//!
//! `log P(x_j | c) = ln((N_cj + alpha) / (N_c + alpha * n_features))`
//!
//! Prediction picks the class maximizing `log P(c) + sum_j x_j * log P(x_j | c)`.

use crate::core::{Classifier, DetectorError, Prediction, Result, SparseVector};
use log::{debug, warn};

/// Multinomial Naive Bayes classifier
#[derive(Debug, Clone)]
pub struct MultinomialNB {
    alpha: f64,
    fit_prior: bool,
    n_features: usize,
    class_count: Vec<f64>,
    feature_count: Vec<Vec<f64>>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNB {
    /// Create an unfitted model with `alpha = 1.0` and learned priors
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            fit_prior: true,
            n_features: 0,
            class_count: Vec::new(),
            feature_count: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        }
    }

    /// Set the additive smoothing parameter
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Learn class priors (`true`) or use a uniform prior (`false`)
    pub fn with_fit_prior(mut self, fit_prior: bool) -> Self {
        self.fit_prior = fit_prior;
        self
    }

    /// Fit on feature rows and their class indices
    ///
    /// `n_features` is the width of the feature matrix and `n_classes` the
    /// size of the class set; classes with no rows keep zero counts.
    pub fn fit(
        &mut self,
        rows: &[SparseVector],
        labels: &[usize],
        n_features: usize,
        n_classes: usize,
    ) -> Result<()> {
        if rows.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(DetectorError::DimensionMismatch {
                expected: rows.len(),
                actual: labels.len(),
            });
        }
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(DetectorError::InvalidParameter(format!(
                "Smoothing parameter alpha must be non-negative, got: {}",
                self.alpha
            )));
        }
        if n_classes == 0 {
            return Err(DetectorError::InvalidParameter(
                "At least one class is required".to_string(),
            ));
        }

        let mut class_count = vec![0.0; n_classes];
        let mut feature_count = vec![vec![0.0; n_features]; n_classes];

        for (row, &label) in rows.iter().zip(labels) {
            if label >= n_classes {
                return Err(DetectorError::InvalidLabel {
                    index: label,
                    n_classes,
                });
            }
            class_count[label] += 1.0;
            for (idx, value) in row.iter() {
                if idx >= n_features {
                    return Err(DetectorError::DimensionMismatch {
                        expected: n_features,
                        actual: idx + 1,
                    });
                }
                if !value.is_finite() || value < 0.0 {
                    return Err(DetectorError::InvalidDataset(format!(
                        "Feature values must be finite and non-negative, got {value} at index {idx}"
                    )));
                }
                feature_count[label][idx] += value;
            }
        }

        if self.alpha == 0.0 {
            warn!("alpha = 0 leaves unseen features with zero probability");
        }

        let feature_log_prob: Vec<Vec<f64>> = feature_count
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + self.alpha * n_features as f64;
                counts
                    .iter()
                    .map(|&c| ((c + self.alpha) / total).ln())
                    .collect::<Vec<f64>>()
            })
            .collect();

        let n_rows = rows.len() as f64;
        let class_log_prior: Vec<f64> = if self.fit_prior {
            class_count.iter().map(|&c| (c / n_rows).ln()).collect()
        } else {
            vec![-(n_classes as f64).ln(); n_classes]
        };

        for (class, &count) in class_count.iter().enumerate() {
            if count == 0.0 {
                debug!("Class {class} has no training rows");
            }
        }

        self.n_features = n_features;
        self.class_count = class_count;
        self.feature_count = feature_count;
        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        !self.class_log_prior.is_empty()
    }

    /// Joint log likelihood `log P(c) + log P(x | c)` for every class
    pub fn joint_log_likelihood(&self, features: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(&prior, log_probs)| {
                // Columns beyond the fitted width contribute nothing
                prior
                    + features
                        .iter()
                        .filter(|&(idx, _)| idx < self.n_features)
                        .map(|(idx, value)| value * log_probs[idx])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Posterior class probabilities, normalized with log-sum-exp
    pub fn predict_proba(&self, features: &SparseVector) -> Vec<f64> {
        let jll = self.joint_log_likelihood(features);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return vec![0.0; jll.len()];
        }
        let log_norm = max + jll.iter().map(|&v| (v - max).exp()).sum::<f64>().ln();
        jll.iter().map(|&v| (v - log_norm).exp()).collect()
    }

    /// Number of training rows seen per class
    pub fn class_count(&self) -> &[f64] {
        &self.class_count
    }

    /// Summed feature values per class
    pub fn feature_count(&self) -> &[Vec<f64>] {
        &self.feature_count
    }

    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    pub fn feature_log_prob(&self) -> &[Vec<f64>] {
        &self.feature_log_prob
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for MultinomialNB {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MultinomialNB {
    fn predict(&self, features: &SparseVector) -> Prediction {
        let jll = self.joint_log_likelihood(features);

        // Strict comparison keeps the lowest class index on ties
        let mut best = Prediction::new(0, f64::NEG_INFINITY);
        for (class, &score) in jll.iter().enumerate() {
            if score > best.log_likelihood {
                best = Prediction::new(class, score);
            }
        }
        best
    }

    fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }
}
