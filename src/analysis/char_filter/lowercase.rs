//! Lowercase char filter implementation.
//!
//! Folds the entire input to lowercase before tokenization. Running this
//! ahead of the tokenizer, rather than as a token filter, matters for the
//! tokenizer's abbreviation table, which only holds lowercase entries.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::char_filter::CharFilter;
//! use spamsift::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("You WON a Prize"), "you won a prize");
//! ```

use crate::analysis::char_filter::CharFilter;

/// A char filter that converts the whole text to lowercase.
///
/// ASCII-only input takes the fast path; everything else goes through
/// Unicode-aware [`str::to_lowercase`].
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_ascii() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Hello WORLD!"), "hello world!");
    }

    #[test]
    fn test_lowercase_unicode() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÉTÉ Straße"), "été straße");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}
