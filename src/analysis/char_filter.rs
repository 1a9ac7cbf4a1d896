//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the whole text string before it is passed to the
//! tokenizer.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode case folding of the full text

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;

pub use lowercase::LowercaseCharFilter;
