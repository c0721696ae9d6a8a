//! Text feature extraction
//!
//! Tokenization and TF-IDF weighting of raw messages.

pub mod tfidf;
pub mod tokenizer;

pub use self::tfidf::TfidfVectorizer;
pub use self::tokenizer::{Tokenizer, DEFAULT_TOKEN_PATTERN};
