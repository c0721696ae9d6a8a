//! Naive Bayes classifiers

pub mod multinomial;

pub use self::multinomial::MultinomialNB;
