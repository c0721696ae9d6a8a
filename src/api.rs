//! High-level API for the phishing detection pipeline
//!
//! This module wires the pipeline steps together: load a labeled CSV,
//! vectorize the text with TF-IDF, hold out a test split, train a
//! multinomial Naive Bayes model, and report accuracy and per-class metrics.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use phishing_detector::api::PhishingDetector;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = PhishingDetector::new();
//! detector.load_data("phishing_data.csv")?;
//! detector.preprocess()?;
//! detector.train_model()?;
//! let evaluation = detector.evaluate_model()?;
//!
//! println!("Accuracy: {:.2}%", evaluation.accuracy * 100.0);
//! # Ok(())
//! # }
//! ```

use crate::bayes::MultinomialNB;
use crate::core::{
    Classifier, DetectorConfig, DetectorError, Result, SparseVector, TextDataset,
};
use crate::data::{CsvDataset, LabelEncoder};
use crate::metrics::{accuracy_score, ClassificationReport};
use crate::text::TfidfVectorizer;
use crate::utils::{split, stats, validation};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

/// Feature rows and class indices for both partitions
#[derive(Debug, Clone)]
struct PreparedData {
    x_train: Vec<SparseVector>,
    x_test: Vec<SparseVector>,
    y_train: Vec<usize>,
    y_test: Vec<usize>,
}

/// Result of evaluating the trained model on the held-out rows
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub report: ClassificationReport,
}

/// Phishing detection pipeline
///
/// Stages run in order: [`load_data`](Self::load_data),
/// [`preprocess`](Self::preprocess), [`train_model`](Self::train_model),
/// [`evaluate_model`](Self::evaluate_model). Each stage prints a status
/// line unless the detector is [`quiet`](Self::quiet).
pub struct PhishingDetector {
    config: DetectorConfig,
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNB,
    verbose: bool,
    data: Option<CsvDataset>,
    encoder: Option<LabelEncoder>,
    prepared: Option<PreparedData>,
    trained: bool,
}

impl PhishingDetector {
    /// Create a detector with the default configuration
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a detector from an explicit configuration
    pub fn with_config(config: DetectorConfig) -> Self {
        let classifier = MultinomialNB::new()
            .with_alpha(config.alpha)
            .with_fit_prior(config.fit_prior);
        Self {
            config,
            vectorizer: TfidfVectorizer::new(),
            classifier,
            verbose: true,
            data: None,
            encoder: None,
            prepared: None,
            trained: false,
        }
    }

    /// Set the held-out fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.config.test_size = test_size;
        self
    }

    /// Set the shuffle seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.config.random_state = seed;
        self
    }

    /// Set Naive Bayes smoothing
    ///
    /// Discards any fitted model; call [`train_model`](Self::train_model) again.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self.classifier = MultinomialNB::new()
            .with_alpha(alpha)
            .with_fit_prior(self.config.fit_prior);
        self.trained = false;
        self
    }

    /// Set the name of the text column
    pub fn with_text_column(mut self, column: impl Into<String>) -> Self {
        self.config.text_column = column.into();
        self
    }

    /// Set the name of the label column
    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.config.label_column = column.into();
        self
    }

    /// Suppress the stage status lines on stdout
    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }

    /// Load the labeled dataset from a CSV file
    ///
    /// Fails if the file lacks the configured text or label column.
    /// Loading resets any later stage.
    pub fn load_data<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!("Loading dataset from {path:?}");
        let dataset = CsvDataset::from_file_with_columns(
            path,
            &self.config.text_column,
            &self.config.label_column,
        )?;
        self.set_dataset(dataset);
        self.status("Data loaded successfully.");
        Ok(())
    }

    /// Use an already loaded dataset
    pub fn load_dataset(&mut self, dataset: CsvDataset) {
        self.set_dataset(dataset);
        self.status("Data loaded successfully.");
    }

    fn set_dataset(&mut self, dataset: CsvDataset) {
        info!("Loaded {} rows", dataset.len());

        let balance = validation::check_label_balance(&dataset);
        info!("Label counts: {balance:?}");
        if balance.len() < 2 {
            warn!("Dataset contains a single class; every prediction will be that class");
        }
        let blank = validation::count_blank_texts(&dataset);
        if blank > 0 {
            warn!("{blank} rows have empty text");
        }

        self.data = Some(dataset);
        self.encoder = None;
        self.prepared = None;
        self.trained = false;
    }

    /// Vectorize all texts with TF-IDF and split into train and test rows
    ///
    /// The vectorizer is fitted on the whole dataset before splitting.
    pub fn preprocess(&mut self) -> Result<()> {
        let data = self.data.as_ref().ok_or(DetectorError::NotLoaded)?;
        debug!(
            "Preprocessing config: {}",
            serde_json::to_string(&self.config).unwrap_or_default()
        );

        let texts = data.texts();
        let labels = data.labels();

        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&texts)?;
        let encoder = LabelEncoder::fit(&labels)?;
        let targets = encoder.encode_all(&labels)?;

        let matrix_stats = stats::sparse_vector_stats(&rows);
        debug!(
            "TF-IDF matrix: {} rows x {} terms, mean nnz {:.1}, {} empty rows",
            matrix_stats.total_rows,
            vectorizer.vocabulary_size(),
            matrix_stats.mean_nnz,
            matrix_stats.empty_rows
        );

        let indices = split::train_test_split(
            rows.len(),
            self.config.test_size,
            self.config.random_state,
        )?;
        info!(
            "Split {} rows into {} train / {} test (seed {})",
            rows.len(),
            indices.train.len(),
            indices.test.len(),
            self.config.random_state
        );

        self.prepared = Some(PreparedData {
            x_train: split::select(&rows, &indices.train),
            x_test: split::select(&rows, &indices.test),
            y_train: split::select(&targets, &indices.train),
            y_test: split::select(&targets, &indices.test),
        });
        self.vectorizer = vectorizer;
        self.encoder = Some(encoder);
        self.trained = false;

        self.status("Data preprocessing completed.");
        Ok(())
    }

    /// Fit the Naive Bayes model on the training rows
    pub fn train_model(&mut self) -> Result<()> {
        let prepared = self.prepared.as_ref().ok_or(DetectorError::NotPreprocessed)?;
        let n_classes = self
            .encoder
            .as_ref()
            .map(LabelEncoder::n_classes)
            .ok_or(DetectorError::NotPreprocessed)?;

        info!(
            "Training multinomial Naive Bayes on {} rows (alpha = {})",
            prepared.x_train.len(),
            self.classifier.alpha()
        );
        self.classifier.fit(
            &prepared.x_train,
            &prepared.y_train,
            self.vectorizer.vocabulary_size(),
            n_classes,
        )?;
        self.trained = true;

        self.status("Model training completed.");
        Ok(())
    }

    /// Score the trained model on the test rows
    pub fn evaluate_model(&self) -> Result<Evaluation> {
        let prepared = self.prepared.as_ref().ok_or(DetectorError::NotPreprocessed)?;
        let encoder = self.encoder.as_ref().ok_or(DetectorError::NotPreprocessed)?;
        if !self.trained {
            return Err(DetectorError::ModelNotTrained);
        }

        let predictions: Vec<usize> = self
            .classifier
            .predict_batch(&prepared.x_test)
            .iter()
            .map(|p| p.class)
            .collect();

        let accuracy = accuracy_score(&prepared.y_test, &predictions)?;
        let report = ClassificationReport::new(&prepared.y_test, &predictions, encoder.classes())?;
        info!("Evaluated {} test rows", prepared.y_test.len());

        if self.verbose {
            println!("Accuracy: {accuracy:?}");
            println!("Classification Report: {report}");
        }

        Ok(Evaluation { accuracy, report })
    }

    /// Run every stage on the CSV at `path`
    pub fn run<P: AsRef<Path>>(&mut self, path: P) -> Result<Evaluation> {
        self.load_data(path)?;
        self.preprocess()?;
        self.train_model()?;
        self.evaluate_model()
    }

    /// Classify a single message with the fitted vectorizer and model
    pub fn predict_text(&self, text: &str) -> Result<String> {
        let encoder = self.encoder.as_ref().ok_or(DetectorError::NotPreprocessed)?;
        if !self.trained {
            return Err(DetectorError::ModelNotTrained);
        }
        let row = self.vectorizer.transform(text)?;
        let prediction = self.classifier.predict(&row);
        encoder
            .decode(prediction.class)
            .map(str::to_string)
            .ok_or(DetectorError::InvalidLabel {
                index: prediction.class,
                n_classes: encoder.n_classes(),
            })
    }

    /// Train and test partition sizes, once preprocessed
    pub fn split_sizes(&self) -> Option<(usize, usize)> {
        self.prepared
            .as_ref()
            .map(|p| (p.x_train.len(), p.x_test.len()))
    }

    /// Sorted class labels, once preprocessed
    pub fn classes(&self) -> Option<&[String]> {
        self.encoder.as_ref().map(LabelEncoder::classes)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &MultinomialNB {
        &self.classifier
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    fn status(&self, message: &str) {
        if self.verbose {
            println!("{message}");
        }
    }
}

impl Default for PhishingDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;

    /// Run the whole pipeline on a CSV with default settings, without console output
    pub fn evaluate_csv<P: AsRef<Path>>(path: P) -> Result<Evaluation> {
        PhishingDetector::new().quiet().run(path)
    }

    /// Same as [`evaluate_csv`] with an explicit configuration
    pub fn evaluate_csv_with_config<P: AsRef<Path>>(
        path: P,
        config: DetectorConfig,
    ) -> Result<Evaluation> {
        PhishingDetector::with_config(config).quiet().run(path)
    }
}
