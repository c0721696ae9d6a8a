//! Evaluation metrics
//!
//! Accuracy, confusion matrix and a per-class classification report with
//! precision, recall, F1 and support.

use crate::core::{DetectorError, Result};
use log::warn;
use serde::Serialize;
use std::fmt;

/// Fraction of predictions equal to the true class
///
/// Returns 0.0 for empty input.
pub fn accuracy_score(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    if y_true.is_empty() {
        return Ok(0.0);
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

fn check_lengths(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(DetectorError::DimensionMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    Ok(())
}

/// Confusion counts indexed `[true class][predicted class]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn new(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Result<Self> {
        check_lengths(y_true, y_pred)?;
        let mut counts = vec![vec![0; n_classes]; n_classes];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t >= n_classes || p >= n_classes {
                return Err(DetectorError::InvalidLabel {
                    index: t.max(p),
                    n_classes,
                });
            }
            counts[t][p] += 1;
        }
        Ok(Self { counts })
    }

    pub fn get(&self, true_class: usize, predicted_class: usize) -> usize {
        self.counts[true_class][predicted_class]
    }

    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.counts[class][class]
    }

    /// Rows predicted as `class` that belong elsewhere
    pub fn false_positives(&self, class: usize) -> usize {
        self.predicted_count(class) - self.true_positives(class)
    }

    /// Rows of `class` predicted as something else
    pub fn false_negatives(&self, class: usize) -> usize {
        self.support(class) - self.true_positives(class)
    }

    /// Number of rows whose true class is `class`
    pub fn support(&self, class: usize) -> usize {
        self.counts[class].iter().sum()
    }

    /// Number of rows predicted as `class`
    pub fn predicted_count(&self, class: usize) -> usize {
        self.counts.iter().map(|row| row[class]).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Precision/recall/F1/support for one class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Averaged metrics over the listed classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Per-class summary of a set of predictions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

impl ClassificationReport {
    /// Build a report from true and predicted class indices
    ///
    /// `class_names[i]` names class index `i`. Only classes present in
    /// `y_true` or `y_pred` are listed.
    pub fn new(y_true: &[usize], y_pred: &[usize], class_names: &[String]) -> Result<Self> {
        if y_true.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }
        let matrix = ConfusionMatrix::new(y_true, y_pred, class_names.len())?;

        let classes: Vec<ClassMetrics> = (0..matrix.n_classes())
            .filter(|&c| matrix.support(c) > 0 || matrix.predicted_count(c) > 0)
            .map(|c| {
                let tp = matrix.true_positives(c);
                let label = &class_names[c];

                let precision = ratio(tp, matrix.predicted_count(c)).unwrap_or_else(|| {
                    warn!("Precision is ill-defined for label '{label}' with no predicted samples; set to 0.0");
                    0.0
                });
                let recall = ratio(tp, matrix.support(c)).unwrap_or_else(|| {
                    warn!("Recall is ill-defined for label '{label}' with no true samples; set to 0.0");
                    0.0
                });

                ClassMetrics {
                    label: label.clone(),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support: matrix.support(c),
                }
            })
            .collect();

        let total = matrix.total();
        let n_listed = classes.len() as f64;

        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|m| m.precision).sum::<f64>() / n_listed,
            recall: classes.iter().map(|m| m.recall).sum::<f64>() / n_listed,
            f1_score: classes.iter().map(|m| m.f1_score).sum::<f64>() / n_listed,
            support: total,
        };

        let weighted_avg = AverageMetrics {
            precision: weighted_mean(&classes, total, |m| m.precision),
            recall: weighted_mean(&classes, total, |m| m.recall),
            f1_score: weighted_mean(&classes, total, |m| m.f1_score),
            support: total,
        };

        let accuracy = accuracy_score(y_true, y_pred)?;

        Ok(Self {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
        })
    }

    /// Metrics for a class by label
    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.iter().find(|m| m.label == label)
    }
}

fn weighted_mean(
    classes: &[ClassMetrics],
    total: usize,
    value: impl Fn(&ClassMetrics) -> f64,
) -> f64 {
    classes
        .iter()
        .map(|m| value(m) * m.support as f64)
        .sum::<f64>()
        / total as f64
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

const DIGITS: usize = 2;
const LAST_LINE_HEADING: &str = "weighted avg";

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|m| m.label.chars().count())
            .chain([LAST_LINE_HEADING.len(), DIGITS])
            .max()
            .unwrap_or(LAST_LINE_HEADING.len());

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for m in &self.classes {
            write_row(f, width, &m.label, m.precision, m.recall, m.f1_score, m.support)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.prec$} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.weighted_avg.support,
            prec = DIGITS
        )?;

        let averages = [
            ("macro avg", &self.macro_avg),
            (LAST_LINE_HEADING, &self.weighted_avg),
        ];
        for (heading, avg) in averages {
            write_row(f, width, heading, avg.precision, avg.recall, avg.f1_score, avg.support)?;
        }
        Ok(())
    }
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    width: usize,
    heading: &str,
    precision: f64,
    recall: f64,
    f1_score: f64,
    support: usize,
) -> fmt::Result {
    writeln!(
        f,
        "{heading:>width$}  {precision:>9.prec$} {recall:>9.prec$} {f1_score:>9.prec$} {support:>9}",
        prec = DIGITS
    )
}
