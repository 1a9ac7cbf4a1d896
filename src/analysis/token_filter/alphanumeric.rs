//! Alphanumeric filter implementation.
//!
//! Keeps only tokens that are non-empty and made entirely of letters and/or
//! digits. Punctuation tokens (`,` `!` `...`) and tokens that mix in symbols
//! (`£1000`, `n't`, `www.win.com`) are dropped.
//!
//! A char counts when its general category is a letter (`L*`) or a number
//! (`Nd`, `Nl`, `No`). Combining marks are rejected even where Unicode marks
//! them alphabetic, so Devanagari vowel signs fail as in Python `isalnum`.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::token_filter::Filter;
//! use spamsift::analysis::token_filter::alphanumeric::AlphanumericFilter;
//! use spamsift::analysis::token::Token;
//!
//! let filter = AlphanumericFilter::new();
//! let tokens = vec![Token::new("win", 0), Token::new("!", 1), Token::new("£5", 2)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "win");
//! ```

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that drops every token containing a non-alphanumeric character.
#[derive(Clone, Debug, Default)]
pub struct AlphanumericFilter;

impl AlphanumericFilter {
    /// Create a new alphanumeric filter.
    pub fn new() -> Self {
        AlphanumericFilter
    }

    /// Check whether a word passes the filter.
    pub fn is_alphanumeric(word: &str) -> bool {
        !word.is_empty() && word.chars().all(is_letter_or_number)
    }
}

fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

impl Filter for AlphanumericFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| Self::is_alphanumeric(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphanumeric"
    }
}
