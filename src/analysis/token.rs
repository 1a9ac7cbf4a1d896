//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline. Tokens
//! keep their position in the tokenizer output so that filters which drop
//! tokens never reorder the survivors.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::token::Token;
//!
//! let token = Token::new("prize", 3);
//! assert_eq!(token.text, "prize");
//! assert_eq!(token.position, 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the tokenizer output (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Replace the text of this token, keeping its position.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Tokens in tokenizer order, minus whatever earlier filters dropped.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Drain a stream into its token texts.
pub fn texts(tokens: TokenStream) -> Vec<String> {
    tokens.map(|token| token.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
    }

    #[test]
    fn test_with_text_keeps_position() {
        let token = Token::new("running", 4).with_text("run");
        assert_eq!(token.text, "run");
        assert_eq!(token.position, 4);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }

    #[test]
    fn test_texts() {
        let tokens = vec![Token::new("hello", 0), Token::new("world", 1)];

        assert_eq!(texts(Box::new(tokens.into_iter())), vec!["hello", "world"]);
    }
}
