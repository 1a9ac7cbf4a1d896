//! Stemming token filter.
//!
//! [`StemFilter`] delegates to a [`Stemmer`]. The only stemmer shipped is
//! [`PorterStemmer`], which reproduces NLTK's default Porter mode.

use std::fmt;
use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A suffix-stripping algorithm.
pub trait Stemmer: Send + Sync {
    /// Reduce `word` to its stem. `word` is expected to be lowercase.
    fn stem(&self, word: &str) -> String;

    fn name(&self) -> &'static str;
}

pub mod porter;

pub use porter::PorterStemmer;

/// Replaces each token's text with its stem.
///
/// Stemming is lazy: tokens are stemmed as the stream is pulled.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Stem with the Porter algorithm.
    pub fn new() -> Self {
        Self::with_stemmer(Arc::new(PorterStemmer::new()))
    }

    /// Stem with another algorithm.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }

    /// The algorithm in use.
    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(tokens.map(move |token| {
            let stem = stemmer.stem(&token.text);
            token.with_text(stem)
        })))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    struct Truncate;

    impl Stemmer for Truncate {
        fn stem(&self, word: &str) -> String {
            word.chars().take(3).collect()
        }

        fn name(&self) -> &'static str {
            "truncate"
        }
    }

    #[test]
    fn test_stem_filter() {
        let filter = StemFilter::new();
        let tokens = vec![
            Token::new("running", 0),
            Token::new("flies", 1),
            Token::new("prizes", 2),
        ];
        let token_stream = Box::new(tokens.into_iter());

        let result: Vec<Token> = filter.filter(token_stream).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "run");
        assert_eq!(result[1].text, "fli");
        assert_eq!(result[2].text, "prize");
        assert_eq!(result[2].position, 2);
    }

    #[test]
    fn test_custom_stemmer() {
        let filter = StemFilter::with_stemmer(Arc::new(Truncate));
        let tokens = vec![Token::new("winner", 0)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result[0].text, "win");
        assert_eq!(filter.stemmer().name(), "truncate");
        assert_eq!(format!("{filter:?}"), "StemFilter { stemmer: \"truncate\" }");
    }

    #[test]
    fn test_filter_name() {
        let filter = StemFilter::default();
        assert_eq!(filter.name(), "stem");
        assert_eq!(filter.stemmer().name(), "porter");
    }
}
