//! CSV format dataset implementation
//!
//! Supports loading datasets from delimited files where:
//! - The first row is a header naming the columns
//! - One column holds the message text, another the class label
//! - Any other columns are ignored

use crate::core::{DetectorError, Document, Result, TextDataset};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default name of the text column
pub const DEFAULT_TEXT_COLUMN: &str = "text";
/// Default name of the label column
pub const DEFAULT_LABEL_COLUMN: &str = "label";

/// Dataset implementation for CSV files
#[derive(Debug, Clone)]
pub struct CsvDataset {
    documents: Vec<Document>,
}

impl CsvDataset {
    /// Load a dataset from a CSV file with `text` and `label` columns
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with_columns(path, DEFAULT_TEXT_COLUMN, DEFAULT_LABEL_COLUMN)
    }

    /// Load a dataset from a CSV file with explicit column names
    pub fn from_file_with_columns<P: AsRef<Path>>(
        path: P,
        text_column: &str,
        label_column: &str,
    ) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening dataset file {path:?}");
        let file = File::open(path)?;
        Self::from_reader_with_columns(BufReader::new(file), text_column, label_column)
    }

    /// Load a dataset from a reader with `text` and `label` columns
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_columns(reader, DEFAULT_TEXT_COLUMN, DEFAULT_LABEL_COLUMN)
    }

    /// Load a dataset from a reader with explicit column names
    pub fn from_reader_with_columns<R: Read>(
        reader: R,
        text_column: &str,
        label_column: &str,
    ) -> Result<Self> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }

        let text_idx = Self::column_index(&headers, text_column)?;
        let label_idx = Self::column_index(&headers, label_column)?;

        let mut documents = Vec::new();
        for record in reader.records() {
            let record = record?;
            // Field count is checked by the reader, so both lookups succeed
            let text = record.get(text_idx).unwrap_or_default();
            let label = record.get(label_idx).unwrap_or_default();
            documents.push(Document::new(text, label));
        }

        if documents.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }

        debug!(
            "Parsed {} rows ({} columns in header)",
            documents.len(),
            headers.len()
        );

        Ok(CsvDataset { documents })
    }

    /// Build a dataset from in-memory documents
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        if documents.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }
        Ok(CsvDataset { documents })
    }

    /// Borrow the loaded documents
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    fn column_index(headers: &::csv::StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DetectorError::MissingColumn {
                column: name.to_string(),
                available: headers.iter().collect::<Vec<_>>().join(", "),
            })
    }
}

impl TextDataset for CsvDataset {
    fn len(&self) -> usize {
        self.documents.len()
    }

    fn text(&self, i: usize) -> &str {
        &self.documents[i].text
    }

    fn label(&self, i: usize) -> &str {
        &self.documents[i].label
    }
}
