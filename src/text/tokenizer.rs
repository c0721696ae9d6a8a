//! Word tokenizer

use crate::core::{DetectorError, Result};
use regex::Regex;

/// Runs of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Regex-driven tokenizer with optional lowercasing
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
    lowercase: bool,
}

impl Tokenizer {
    /// Lowercasing tokenizer with the default token pattern
    ///
    /// [`DEFAULT_TOKEN_PATTERN`] is a fixed, known-valid regex, so this
    /// never fails.
    pub fn new() -> Self {
        Self::with_pattern(DEFAULT_TOKEN_PATTERN).expect("default token pattern is valid")
    }

    /// Tokenizer with a custom token pattern
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| DetectorError::InvalidParameter(format!("Invalid token pattern: {e}")))?;
        Ok(Self {
            pattern,
            lowercase: true,
        })
    }

    /// Toggle lowercasing before token extraction
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Split a document into tokens
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        if self.lowercase {
            let lowered = document.to_lowercase();
            self.extract(&lowered)
        } else {
            self.extract(document)
        }
    }

    fn extract(&self, document: &str) -> Vec<String> {
        self.pattern
            .find_iter(document)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
