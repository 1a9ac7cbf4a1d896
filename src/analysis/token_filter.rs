//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by a tokenizer (or by the previous
//! filter) and produce a new stream, dropping or rewriting tokens.
//!
//! # Available Filters
//!
//! - [`alphanumeric::AlphanumericFilter`] - Keeps tokens made only of letters and digits
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::token_filter::Filter;
//! use spamsift::analysis::token_filter::stop::StopFilter;
//! use spamsift::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![Token::new("the", 0), Token::new("prize", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "prize");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod alphanumeric;
pub mod stem;
pub mod stop;

// Re-export all filters for convenient access
pub use alphanumeric::AlphanumericFilter;
pub use stem::{PorterStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
