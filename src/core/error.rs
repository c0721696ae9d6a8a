//! Error types for the phishing detector

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Missing column '{column}' (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Empty vocabulary: documents contain no tokens")]
    EmptyVocabulary,

    #[error("Vectorizer not fitted")]
    NotFitted,

    #[error("No data loaded")]
    NotLoaded,

    #[error("Data not preprocessed")]
    NotPreprocessed,

    #[error("Model not trained")]
    ModelNotTrained,

    #[error("Invalid label: class index {index} out of range for {n_classes} classes")]
    InvalidLabel { index: usize, n_classes: usize },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
