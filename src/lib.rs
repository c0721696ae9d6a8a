//! Phishing message detection with TF-IDF features and multinomial Naive Bayes
//!
//! The pipeline loads a labeled CSV, vectorizes the text column, holds out a
//! seeded test split, trains the classifier, and reports accuracy together
//! with per-class precision, recall and F1.

pub mod api;
pub mod bayes;
pub mod core;
pub mod data;
pub mod metrics;
pub mod text;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{Evaluation, PhishingDetector};
pub use crate::bayes::MultinomialNB;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{DetectorError, Result};
pub use crate::data::{CsvDataset, LabelEncoder};
pub use crate::metrics::{accuracy_score, ClassificationReport, ConfusionMatrix};
pub use crate::text::{TfidfVectorizer, Tokenizer};
pub use crate::utils::SparseVectorStats;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
