//! Treebank word tokenizer implementation.
//!
//! This tokenizer follows the Penn Treebank conventions used by NLTK's
//! `word_tokenize`, which is what the bundled models were trained on:
//!
//! - the text is split into sentences first (see [`super::sentence`]);
//! - punctuation such as `, ; : ! ? ( ) [ ] --` and `...` is detached;
//! - the period is only detached at the end of a sentence;
//! - clitics are split off: `don't` → `do n't`, `you're` → `you 're`;
//! - fused forms are split: `cannot` → `can not`, `gonna` → `gon na`;
//! - double quotes become ` `` ` and `''`.
//!
//! Symbols outside those rules (`£`, `/`, `-`, `+`, `=`) stay attached to
//! their word.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::tokenizer::Tokenizer;
//! use spamsift::analysis::tokenizer::treebank::TreebankTokenizer;
//!
//! let tokenizer = TreebankTokenizer::new().unwrap();
//! let texts: Vec<String> = tokenizer
//!     .tokenize("you won a free prize, claim now!")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(
//!     texts,
//!     vec!["you", "won", "a", "free", "prize", ",", "claim", "now", "!"]
//! );
//! ```

use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::sentence::SentenceSplitter;
use crate::error::{Result, SpamsiftError};

/// Opening quote handling, applied first.
const STARTING_QUOTES: &[(&str, &str)] = &[
    (r"([«“‘„]|[`]+)", " ${1} "),
    (r#"^""#, "``"),
    (r"(``)", " ${1} "),
    (r#"([ (\[{<])("|'{2})"#, "${1} `` "),
];

/// Punctuation handling. The final-period rule appears twice, as in the
/// reference rule table; only the first also looks past curly closing
/// quotes and spaces.
const PUNCTUATION: &[(&str, &str)] = &[
    (r#"([^.])(\.)([\])}>"'»”’ ]*)\s*$"#, "${1} ${2} ${3} "),
    (r"([:,])([^\d])", " ${1} ${2}"),
    (r"([:,])$", " ${1} "),
    (r"\.{2,}", " ${0} "),
    (r"[;@#$%&]", " ${0} "),
    (r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
    (r"[?!]", " ${0} "),
    (r"([^'])' ", "${1} ' "),
    (r"[*]", " ${0} "),
];

/// Parentheses, brackets and double dashes.
const BRACKETS: &[(&str, &str)] = &[(r"[\]\[(){}<>]", " ${0} "), (r"--", " -- ")];

/// Closing quotes and clitics, applied to the space-padded text.
const ENDING_QUOTES: &[(&str, &str)] = &[
    (r"([»”’])", " ${1} "),
    (r"''", " '' "),
    (r#"""#, " '' "),
    (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
    (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
];

/// Fused forms split into two tokens.
const CONTRACTIONS: &[(&str, &str)] = &[
    (r"(?i)\b(can)(not)\b", " ${1} ${2} "),
    (r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
    (r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
    (r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
    (r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
    (r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
    (r"(?i)\b(more)('n)\b", " ${1} ${2} "),
    (r"(?i)\b(wan)(na)(\s)", " ${1} ${2} ${3}"),
    (r"(?i) ('t)(is)\b", " ${1} ${2} "),
    (r"(?i) ('t)(was)\b", " ${1} ${2} "),
];

/// A compiled `(pattern, replacement)` rewrite.
#[derive(Clone, Debug)]
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }
}

fn compile(table: &[(&str, &'static str)]) -> Result<Vec<Rule>> {
    table
        .iter()
        .map(|&(pattern, replacement)| {
            let pattern = Regex::new(pattern).map_err(|e| {
                SpamsiftError::initialization(format!("Invalid tokenizer rule '{pattern}': {e}"))
            })?;
            Ok(Rule {
                pattern,
                replacement,
            })
        })
        .collect()
}

/// A tokenizer following Penn Treebank conventions.
///
/// All rule tables are compiled once in [`TreebankTokenizer::new`]; the
/// tokenizer is immutable afterwards and cheap to share behind an `Arc`.
#[derive(Clone, Debug)]
pub struct TreebankTokenizer {
    sentences: SentenceSplitter,
    starting_quotes: Vec<Rule>,
    /// An apostrophe opening a one-letter word that is not a clitic.
    quoted_letter: Regex,
    punctuation: Vec<Rule>,
    brackets: Vec<Rule>,
    ending_quotes: Vec<Rule>,
    contractions: Vec<Rule>,
}

impl TreebankTokenizer {
    /// Create a new treebank tokenizer, compiling its rule tables.
    pub fn new() -> Result<Self> {
        let quoted_letter = Regex::new(r"(?i)(')(\w)\b").map_err(|e| {
            SpamsiftError::initialization(format!("Invalid tokenizer rule: {e}"))
        })?;

        Ok(TreebankTokenizer {
            sentences: SentenceSplitter::new(),
            starting_quotes: compile(STARTING_QUOTES)?,
            quoted_letter,
            punctuation: compile(PUNCTUATION)?,
            brackets: compile(BRACKETS)?,
            ending_quotes: compile(ENDING_QUOTES)?,
            contractions: compile(CONTRACTIONS)?,
        })
    }

    /// Tokenize a single sentence into token strings.
    pub fn tokenize_sentence(&self, sentence: &str) -> Vec<String> {
        let mut text = sentence.to_string();

        for rule in &self.starting_quotes {
            text = rule.apply(&text).into_owned();
        }

        // Clitic letters (m, t, s, d, n) keep their apostrophe attached.
        text = self
            .quoted_letter
            .replace_all(&text, |caps: &Captures| {
                let letter = &caps[2];
                if matches!(
                    letter.to_ascii_lowercase().as_str(),
                    "m" | "t" | "s" | "d" | "n"
                ) {
                    caps[0].to_string()
                } else {
                    format!("{} {}", &caps[1], letter)
                }
            })
            .into_owned();

        for rule in self.punctuation.iter().chain(&self.brackets) {
            text = rule.apply(&text).into_owned();
        }

        text = format!(" {text} ");

        for rule in self.ending_quotes.iter().chain(&self.contractions) {
            text = rule.apply(&text).into_owned();
        }

        text.split_whitespace().map(str::to_string).collect()
    }
}

impl Tokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .sentences
            .split(text)
            .into_iter()
            .flat_map(|sentence| self.tokenize_sentence(sentence))
            .enumerate()
            .map(|(position, text)| Token::new(text, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "treebank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        TreebankTokenizer::new()
            .unwrap()
            .tokenize(input)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_separates_punctuation() {
        assert_eq!(
            texts("congratulations! you won a free prize, claim now!!!"),
            vec![
                "congratulations",
                "!",
                "you",
                "won",
                "a",
                "free",
                "prize",
                ",",
                "claim",
                "now",
                "!",
                "!",
                "!"
            ]
        );
    }

    #[test]
    fn test_splits_clitics() {
        assert_eq!(
            texts("i can't believe you're here, it's great"),
            vec![
                "i", "ca", "n't", "believe", "you", "'re", "here", ",", "it", "'s", "great"
            ]
        );
    }

    #[test]
    fn test_splits_fused_forms() {
        assert_eq!(
            texts("i cannot wait, gonna win"),
            vec!["i", "can", "not", "wait", ",", "gon", "na", "win"]
        );
    }

    #[test]
    fn test_final_period_only_per_sentence() {
        assert_eq!(
            texts("call mr. smith. reply stop."),
            vec!["call", "mr.", "smith", ".", "reply", "stop", "."]
        );
    }

    #[test]
    fn test_final_period_before_curly_quote() {
        assert_eq!(
            texts("he said “win cash.”"),
            vec!["he", "said", "“", "win", "cash", ".", "”"]
        );
        assert_eq!(
            texts("she wrote ‘call now.’ "),
            vec!["she", "wrote", "‘", "call", "now", ".", "’"]
        );
    }

    #[test]
    fn test_keeps_symbols_attached() {
        assert_eq!(
            texts("win £1000 cash-prize at www.win.com"),
            vec!["win", "£1000", "cash-prize", "at", "www.win.com"]
        );
    }

    #[test]
    fn test_commas_inside_numbers_stay() {
        assert_eq!(texts("won 1,000 pounds"), vec!["won", "1,000", "pounds"]);
    }

    #[test]
    fn test_quotes_and_brackets() {
        assert_eq!(
            texts("\"free\" (limited) offer"),
            vec!["``", "free", "''", "(", "limited", ")", "offer"]
        );
    }

    #[test]
    fn test_symbols_detached() {
        assert_eq!(
            texts("50% off & more... now"),
            vec!["50", "%", "off", "&", "more", "...", "now"]
        );
    }

    #[test]
    fn test_positions_span_sentences() {
        let tokenizer = TreebankTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("hi. bye.").unwrap().collect();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_input() {
        assert!(texts("").is_empty());
        assert!(texts("   ").is_empty());
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(TreebankTokenizer::new().unwrap().name(), "treebank");
    }
}
