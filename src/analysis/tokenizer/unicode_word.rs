//! Unicode word tokenizer implementation.
//!
//! Splits text using Unicode word boundary rules (UAX #29). Segments that
//! are pure whitespace are dropped; punctuation segments are kept so the
//! downstream alphanumeric filter sees the same kind of input it sees from
//! the treebank tokenizer.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::tokenizer::Tokenizer;
//! use spamsift::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("free-entry, now").unwrap().collect();
//!
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["free", "-", "entry", ",", "now"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
///
/// Unlike the treebank tokenizer it keeps contractions whole ("don't") and
/// splits hyphenated compounds, so it produces a different token stream for
/// the same input. It is offered for comparison, not as the default.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split_word_bounds()
            .filter(|segment| !segment.chars().all(char::is_whitespace))
            .enumerate()
            .map(|(position, segment)| Token::new(segment, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_word_tokenizer() {
        let tokenizer = UnicodeWordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello, world!").unwrap().collect();

        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", ",", "world", "!"]);
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_keeps_contractions_whole() {
        let tokenizer = UnicodeWordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("don't café").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "don't");
        assert_eq!(tokens[1].text, "café");
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(UnicodeWordTokenizer::new().name(), "unicode_word");
    }
}
