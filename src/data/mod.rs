//! Data loading and dataset implementations
//!
//! This module provides the CSV loader for labeled messages and the
//! encoder that maps their labels onto class indices.

pub mod csv;
pub mod labels;

pub use self::csv::*;
pub use self::labels::*;
