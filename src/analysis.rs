//! Text analysis module for Spamsift.
//!
//! This module provides the building blocks of the normalization pipeline:
//! char filters run over the raw text, a tokenizer splits it into tokens, and
//! token filters drop or rewrite tokens in sequence.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, PipelineAnalyzer, StageTrace};
pub use char_filter::CharFilter;
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
