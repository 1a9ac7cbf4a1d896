//! Regex-based tokenizer implementation.
//!
//! Extracts every match of a pattern as a token. When the pattern carries a
//! single capturing group, the group's text becomes the token instead of the
//! whole match, following the `token_pattern` contract of the exported
//! vectorizers.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, SpamsiftError};

/// The default vectorizer token pattern: words of two or more characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// A regex-based tokenizer that extracts tokens using regular expressions.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether the token is capture group 1 rather than the whole match
    use_group: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`DEFAULT_TOKEN_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_TOKEN_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    ///
    /// Patterns with more than one capturing group are rejected.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            SpamsiftError::initialization(format!("Invalid token pattern '{pattern}': {e}"))
        })?;

        // captures_len counts the implicit whole-match group
        let use_group = match regex.captures_len() {
            1 => false,
            2 => true,
            n => {
                return Err(SpamsiftError::initialization(format!(
                    "Token pattern '{pattern}' has {} capturing groups, at most one is allowed",
                    n - 1
                )));
            }
        };

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
            use_group,
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = if self.use_group {
            self.pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
                .enumerate()
                .map(|(position, text)| Token::new(text, position))
                .collect()
        } else {
            self.pattern
                .find_iter(text)
                .enumerate()
                .map(|(position, mat)| Token::new(mat.as_str(), position))
                .collect()
        };

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
