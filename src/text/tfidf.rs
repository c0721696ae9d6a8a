//! TF-IDF vectorizer
//!
//! Converts documents into L2-normalized TF-IDF rows:
//! - Vocabulary is every distinct token of the fitted corpus, indexed in sorted order
//! - Term frequency is the raw token count
//! - IDF is smoothed: `ln((1 + n) / (1 + df)) + 1`

use crate::core::{DetectorError, Result, SparseVector};
use crate::text::Tokenizer;
use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

/// TF-IDF vectorizer over a [`Tokenizer`]
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer with the default tokenizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfitted vectorizer with a custom tokenizer
    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    /// Learn the vocabulary and IDF weights from `documents`
    ///
    /// Refitting replaces any previous vocabulary.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(DetectorError::EmptyDataset);
        }

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique: HashSet<String> =
                self.tokenizer.tokenize(doc.as_ref()).into_iter().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(DetectorError::EmptyVocabulary);
        }

        let mut terms: Vec<(String, usize)> = doc_freq.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_docs = documents.len() as f64;
        self.vocabulary = BTreeMap::new();
        self.idf = Vec::with_capacity(terms.len());
        for (idx, (term, df)) in terms.into_iter().enumerate() {
            self.idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
            self.vocabulary.insert(term, idx);
        }

        debug!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            self.vocabulary.len(),
            documents.len()
        );
        Ok(())
    }

    /// Transform one document into a TF-IDF row
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(DetectorError::NotFitted);
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.tokenizer.tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let (indices, values): (Vec<usize>, Vec<f64>) = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .unzip();

        let mut row = SparseVector::new(indices, values);
        row.normalize();
        Ok(row)
    }

    /// Transform every document
    pub fn transform_batch<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    /// Fit on `documents`, then transform them
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform_batch(documents)
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Term to column index mapping
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Number of feature columns
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF weight per column
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Terms in column order
    pub fn feature_names(&self) -> Vec<&str> {
        // BTreeMap iterates in sorted order, which is also column order
        self.vocabulary.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn corpus() -> Vec<&'static str> {
        vec![
            "verify your account now",
            "your lunch order is ready",
            "verify verify password",
        ]
    }

    #[test]
    fn test_vocabulary_sorted() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();

        assert_eq!(
            vectorizer.feature_names(),
            vec!["account", "is", "lunch", "now", "order", "password", "ready", "verify", "your"]
        );
        assert_eq!(vectorizer.vocabulary()["account"], 0);
        assert_eq!(vectorizer.vocabulary_size(), 9);
    }

    #[test]
    fn test_smoothed_idf() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();

        let verify = vectorizer.vocabulary()["verify"];
        let account = vectorizer.vocabulary()["account"];
        // n = 3, df(verify) = 2, df(account) = 1
        assert_abs_diff_eq!(vectorizer.idf()[verify], (4.0f64 / 3.0).ln() + 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vectorizer.idf()[account], 2.0f64.ln() + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_weights_and_norm() {
        let mut vectorizer = TfidfVectorizer::new();
        let rows = vectorizer.fit_transform(&corpus()).unwrap();
        assert_eq!(rows.len(), 3);

        for row in &rows {
            assert_abs_diff_eq!(row.norm(), 1.0, epsilon = 1e-12);
        }

        // "verify verify password": tf(verify) = 2, tf(password) = 1
        let verify = vectorizer.vocabulary()["verify"];
        let password = vectorizer.vocabulary()["password"];
        let w_verify = 2.0 * vectorizer.idf()[verify];
        let w_password = vectorizer.idf()[password];
        let norm = (w_verify * w_verify + w_password * w_password).sqrt();

        assert_eq!(rows[2].nnz(), 2);
        assert_abs_diff_eq!(rows[2].get(verify), w_verify / norm, epsilon = 1e-12);
        assert_abs_diff_eq!(rows[2].get(password), w_password / norm, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_terms_ignored() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();

        let row = vectorizer.transform("completely unseen words").unwrap();
        assert!(row.is_empty());

        let row = vectorizer.transform("VERIFY bitcoin").unwrap();
        assert_eq!(row.indices, vec![vectorizer.vocabulary()["verify"]]);
        assert_abs_diff_eq!(row.values[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_not_fitted() {
        let vectorizer = TfidfVectorizer::new();
        assert!(matches!(
            vectorizer.transform("hello"),
            Err(DetectorError::NotFitted)
        ));
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new();
        assert!(matches!(
            vectorizer.fit(&["a", "!", ""]),
            Err(DetectorError::EmptyVocabulary)
        ));

        let empty: [&str; 0] = [];
        assert!(matches!(
            vectorizer.fit(&empty),
            Err(DetectorError::EmptyDataset)
        ));
    }

    #[test]
    fn test_refit_replaces_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();
        vectorizer.fit(&["gift card"]).unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["card", "gift"]);
        assert_eq!(vectorizer.idf().len(), 2);
    }
}
