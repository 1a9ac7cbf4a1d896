//! # Spamsift
//!
//! A spam message classifier built around an NLTK-compatible text
//! normalization pipeline.
//!
//! ## Features
//!
//! - Treebank tokenization, English stop words and Porter stemming
//! - TF-IDF vectorization from exported artifacts
//! - Naive Bayes and linear estimators
//! - A web form, a JSON API and a command line interface
//!
//! ## Example
//!
//! ```
//! use spamsift::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::default_english().unwrap();
//! let processed = normalizer.normalize("Congratulations! You have WON a free prize.");
//! assert_eq!(processed.as_str(), "congratul free prize");
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod ml;
pub mod normalizer;
pub mod service;
pub mod web;

pub mod prelude {
    pub use crate::error::{Result, SpamsiftError};
    pub use crate::ml::Verdict;
    pub use crate::normalizer::{NormalizedText, NormalizerConfig, TextNormalizer};
    pub use crate::service::{Analysis, ArtifactPaths, EmptyPolicy, Outcome, SpamClassifier};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
