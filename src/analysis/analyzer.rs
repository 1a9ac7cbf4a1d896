//! Analyzer implementations that combine char filters, tokenizers and filters.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use spamsift::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use spamsift::analysis::char_filter::LowercaseCharFilter;
//! use spamsift::analysis::token_filter::StopFilter;
//! use spamsift::analysis::tokenizer::RegexTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()))
//!     .add_char_filter(Arc::new(LowercaseCharFilter::new()))
//!     .add_filter(Arc::new(StopFilter::new()));
//!
//! let texts: Vec<String> = analyzer
//!     .analyze("WIN the cash")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(texts, vec!["win", "cash"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod pipeline;

pub use pipeline::{PipelineAnalyzer, StageTrace};
