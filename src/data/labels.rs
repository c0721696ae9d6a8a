//! Mapping between string labels and class indices

use crate::core::{DetectorError, Result};
use std::cmp::Ordering;

/// Encodes string labels as indices into a sorted class set
///
/// Classes are ordered numerically when every label parses as a number,
/// lexicographically otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Collect the distinct labels in `labels`
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        if labels.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }

        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();

        let numeric = classes.iter().all(|c| c.trim().parse::<f64>().is_ok());
        if numeric {
            classes.sort_by(|a, b| {
                let (x, y) = (parse_number(a), parse_number(b));
                x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b))
            });
        } else {
            classes.sort();
        }
        classes.dedup();

        Ok(Self { classes })
    }

    /// Index of `label` in the class set
    pub fn encode(&self, label: &str) -> Result<usize> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| DetectorError::InvalidDataset(format!("Unknown label: {label}")))
    }

    /// Encode every label
    pub fn encode_all<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        labels.iter().map(|l| self.encode(l.as_ref())).collect()
    }

    /// Label for a class index
    pub fn decode(&self, class: usize) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

fn parse_number(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}
