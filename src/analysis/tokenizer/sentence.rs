//! Sentence splitting for the treebank tokenizer.
//!
//! The treebank rules only detach a period at the very end of the string
//! they are given, so the text has to be cut into sentences first. The
//! splitter breaks after `.`, `?` or `!` (optionally followed by closing
//! quotes or brackets) when the word is followed by whitespace, unless the
//! period belongs to an ellipsis, an initial, or a known abbreviation.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::tokenizer::sentence::SentenceSplitter;
//!
//! let splitter = SentenceSplitter::new();
//! let sentences = splitter.split("call mr. smith now. it's urgent!");
//! assert_eq!(sentences, vec!["call mr. smith now.", "it's urgent!"]);
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

/// Abbreviations that do not end a sentence, lowercase and without the final period.
const ABBREVIATIONS: &[&str] = &[
    "a.m", "approx", "co", "corp", "dept", "dr", "e.g", "est", "etc", "i.e", "inc", "jr",
    "ltd", "mr", "mrs", "ms", "mt", "p.m", "prof", "rev", "sr", "st", "u.k", "u.s", "vs",
];

static ABBREVIATION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABBREVIATIONS.iter().copied().collect());

/// Characters that may trail sentence-final punctuation.
fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '»' | '”' | '’')
}

/// Characters that may precede a word, e.g. an opening quote.
fn is_opening(c: char) -> bool {
    matches!(c, '"' | '\'' | '(' | '[' | '{' | '«' | '“' | '‘' | '`')
}

/// Punkt-style sentence splitter over already lowercased text.
#[derive(Clone, Debug, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    /// Create a new sentence splitter.
    pub fn new() -> Self {
        SentenceSplitter
    }

    /// Split `text` into trimmed, non-empty sentences.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for (word_start, word) in words_with_offsets(text) {
            if self.ends_sentence(word) {
                let end = word_start + word.len();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }

        sentences
    }

    /// Whether a whitespace-delimited word closes its sentence.
    fn ends_sentence(&self, word: &str) -> bool {
        let core = word.trim_end_matches(is_closing);

        if core.ends_with('?') || core.ends_with('!') {
            return true;
        }

        let Some(stem) = core.strip_suffix('.') else {
            return false;
        };

        // ellipsis
        if stem.ends_with('.') {
            return false;
        }

        let stem = stem.trim_start_matches(is_opening);
        if stem.is_empty() {
            return false;
        }

        // single-letter initial such as "j."
        let mut chars = stem.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_alphabetic() {
                return false;
            }
        }

        !ABBREVIATION_SET.contains(stem)
    }
}

/// Iterate over whitespace-delimited words with their byte offsets.
fn words_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_whitespace().map(move |word| {
        // split_whitespace yields words in order, so each lies after the previous one
        let start = offset + text[offset..].find(word).unwrap_or(0);
        offset = start + word.len();
        (start, word)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation() {
        let splitter = SentenceSplitter::new();
        let sentences = splitter.split("you won. claim now!!! really? yes");
        assert_eq!(sentences, vec!["you won.", "claim now!!!", "really?", "yes"]);
    }

    #[test]
    fn test_keeps_abbreviations_and_initials() {
        let splitter = SentenceSplitter::new();
        let sentences = splitter.split("ask dr. j. smith etc. today.");
        assert_eq!(sentences, vec!["ask dr. j. smith etc. today."]);
    }

    #[test]
    fn test_ellipsis_does_not_split() {
        let splitter = SentenceSplitter::new();
        let sentences = splitter.split("well... maybe");
        assert_eq!(sentences, vec!["well... maybe"]);
    }

    #[test]
    fn test_closing_quote_after_period() {
        let splitter = SentenceSplitter::new();
        let sentences = splitter.split("he said \"stop.\" then left");
        assert_eq!(sentences, vec!["he said \"stop.\"", "then left"]);
    }

    #[test]
    fn test_decimal_numbers_do_not_split() {
        let splitter = SentenceSplitter::new();
        let sentences = splitter.split("only 3.50 today");
        assert_eq!(sentences, vec!["only 3.50 today"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let splitter = SentenceSplitter::new();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   \n\t").is_empty());
    }
}
