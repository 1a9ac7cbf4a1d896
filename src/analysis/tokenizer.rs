//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-level step of the analysis pipeline,
//! responsible for splitting (already char-filtered) text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`treebank::TreebankTokenizer`] - Penn Treebank conventions with sentence splitting
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries (UAX #29)
//! - [`regex::RegexTokenizer`] - Custom regex-based tokenization
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::tokenizer::Tokenizer;
//! use spamsift::analysis::tokenizer::treebank::TreebankTokenizer;
//!
//! let tokenizer = TreebankTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("don't stop").unwrap().collect();
//! assert_eq!(tokens[0].text, "do");
//! assert_eq!(tokens[1].text, "n't");
//! assert_eq!(tokens[2].text, "stop");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::{Result, SpamsiftError};

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can sit inside the shared
/// classifier handle used by concurrent request handlers.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
pub mod regex;
pub mod sentence;
pub mod treebank;
pub mod unicode_word;

// Re-export all tokenizers for convenient access
pub use regex::RegexTokenizer;
pub use treebank::TreebankTokenizer;
pub use unicode_word::UnicodeWordTokenizer;

/// Selectable word tokenizers for the normalization pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerKind {
    /// Treebank rules, compatible with the tokenizer the models are trained on.
    #[default]
    Treebank,
    /// Unicode word boundaries.
    UnicodeWord,
}

impl TokenizerKind {
    /// Build the tokenizer this kind names.
    pub fn build(self) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerKind::Treebank => Arc::new(TreebankTokenizer::new()?),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        })
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Treebank => write!(f, "treebank"),
            TokenizerKind::UnicodeWord => write!(f, "unicode-word"),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = SpamsiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "treebank" => Ok(TokenizerKind::Treebank),
            "unicode-word" | "unicode_word" => Ok(TokenizerKind::UnicodeWord),
            other => Err(SpamsiftError::invalid_argument(format!(
                "unknown tokenizer '{other}' (expected 'treebank' or 'unicode-word')"
            ))),
        }
    }
}
