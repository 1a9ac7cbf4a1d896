//! Porter stemming algorithm implementation.
//!
//! This is the Porter algorithm with the extensions used by NLTK's default
//! `PorterStemmer` mode, so that stems line up with vocabularies built by
//! that stemmer:
//!
//! - a small table of irregular forms (`skies` → `sky`, `dying` → `die`);
//! - words of one or two letters are returned untouched;
//! - `ies`/`ied` on four-letter words keep their `e` (`dies` → `die`);
//! - `alli` is reduced recursively, and `fulli` and `logi` are reduced in step 2;
//! - two-letter stems ending vowel-consonant count as `cvc`.
//!
//! # Algorithm
//!
//! The stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, then terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::token_filter::stem::Stemmer;
//! use spamsift::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("congratulations"), "congratul");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analysis::token_filter::stem::Stemmer;

/// A condition evaluated on the stem left after removing a suffix.
type Condition = fn(&[char]) -> bool;

/// A `(suffix, replacement, condition)` rewrite.
type Rule = (&'static str, &'static str, Condition);

/// Words with a fixed stem that bypass the rule steps.
static IRREGULAR_FORMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("sky", "sky"),
        ("skies", "sky"),
        ("dying", "die"),
        ("lying", "lie"),
        ("tying", "tie"),
        ("news", "news"),
        ("innings", "inning"),
        ("inning", "inning"),
        ("outings", "outing"),
        ("outing", "outing"),
        ("cannings", "canning"),
        ("canning", "canning"),
        ("howe", "howe"),
        ("proceed", "proceed"),
        ("exceed", "exceed"),
        ("succeed", "succeed"),
    ]
    .into_iter()
    .collect()
});

const STEP1A: &[Rule] = &[
    ("sses", "ss", always),
    ("ies", "i", always),
    ("ss", "ss", always),
    ("s", "", always),
];

const STEP1C: &[Rule] = &[("y", "i", ends_consonant_after_first)];

const STEP2: &[Rule] = &[
    ("ational", "ate", positive_measure),
    ("tional", "tion", positive_measure),
    ("enci", "ence", positive_measure),
    ("anci", "ance", positive_measure),
    ("izer", "ize", positive_measure),
    ("bli", "ble", positive_measure),
    ("alli", "al", positive_measure),
    ("entli", "ent", positive_measure),
    ("eli", "e", positive_measure),
    ("ousli", "ous", positive_measure),
    ("ization", "ize", positive_measure),
    ("ation", "ate", positive_measure),
    ("ator", "ate", positive_measure),
    ("alism", "al", positive_measure),
    ("iveness", "ive", positive_measure),
    ("fulness", "ful", positive_measure),
    ("ousness", "ous", positive_measure),
    ("aliti", "al", positive_measure),
    ("iviti", "ive", positive_measure),
    ("biliti", "ble", positive_measure),
    ("fulli", "ful", positive_measure),
    ("logi", "log", positive_measure_with_l),
];

const STEP3: &[Rule] = &[
    ("icate", "ic", positive_measure),
    ("ative", "", positive_measure),
    ("alize", "al", positive_measure),
    ("iciti", "ic", positive_measure),
    ("ical", "ic", positive_measure),
    ("ful", "", positive_measure),
    ("ness", "", positive_measure),
];

const STEP4: &[Rule] = &[
    ("al", "", measure_gt_1),
    ("ance", "", measure_gt_1),
    ("ence", "", measure_gt_1),
    ("er", "", measure_gt_1),
    ("ic", "", measure_gt_1),
    ("able", "", measure_gt_1),
    ("ible", "", measure_gt_1),
    ("ant", "", measure_gt_1),
    ("ement", "", measure_gt_1),
    ("ment", "", measure_gt_1),
    ("ent", "", measure_gt_1),
    ("ion", "", measure_gt_1_after_s_or_t),
    ("ou", "", measure_gt_1),
    ("ism", "", measure_gt_1),
    ("ate", "", measure_gt_1),
    ("iti", "", measure_gt_1),
    ("ous", "", measure_gt_1),
    ("ive", "", measure_gt_1),
    ("ize", "", measure_gt_1),
];

const STEP5B: &[Rule] = &[("ll", "l", measure_gt_1_with_l)];

fn is_consonant(word: &[char], i: usize) -> bool {
    match word[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

/// The number of vowel-consonant sequences, `m` in `[C](VC)^m[V]`.
fn measure(word: &[char]) -> usize {
    let mut m = 0;
    let mut previous_vowel = false;
    for i in 0..word.len() {
        let consonant = is_consonant(word, i);
        if consonant && previous_vowel {
            m += 1;
        }
        previous_vowel = !consonant;
    }
    m
}

fn contains_vowel(word: &[char]) -> bool {
    (0..word.len()).any(|i| !is_consonant(word, i))
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && is_consonant(word, n - 1)
}

/// `*o`: the stem ends consonant-vowel-consonant and the last letter is not
/// w, x or y. A two-letter vowel-consonant stem also qualifies.
fn ends_cvc(word: &[char]) -> bool {
    let n = word.len();
    (n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], 'w' | 'x' | 'y'))
        || (n == 2 && !is_consonant(word, 0) && is_consonant(word, 1))
}

fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

/// Remove `suffix` (which `word` must end with) and append `replacement`.
fn replace_suffix(word: &[char], suffix: &str, replacement: &str) -> Vec<char> {
    let mut stem = word[..word.len() - suffix.chars().count()].to_vec();
    stem.extend(replacement.chars());
    stem
}

fn always(_: &[char]) -> bool {
    true
}

fn positive_measure(stem: &[char]) -> bool {
    measure(stem) > 0
}

fn measure_gt_1(stem: &[char]) -> bool {
    measure(stem) > 1
}

fn measure_gt_1_after_s_or_t(stem: &[char]) -> bool {
    measure(stem) > 1 && matches!(stem.last(), Some('s' | 't'))
}

// `logi` and `ll` measure the word with the first letter of the suffix kept.
fn positive_measure_with_l(stem: &[char]) -> bool {
    let mut word = stem.to_vec();
    word.push('l');
    positive_measure(&word)
}

fn measure_gt_1_with_l(stem: &[char]) -> bool {
    let mut word = stem.to_vec();
    word.push('l');
    measure_gt_1(&word)
}

fn ends_consonant_after_first(stem: &[char]) -> bool {
    stem.len() > 1 && is_consonant(stem, stem.len() - 1)
}

/// Apply the first rule whose suffix matches. A matching rule whose
/// condition fails leaves the word unchanged and stops the search.
fn apply_rules(word: Vec<char>, rules: &[Rule]) -> Vec<char> {
    for &(suffix, replacement, condition) in rules {
        if ends_with(&word, suffix) {
            let stem = replace_suffix(&word, suffix, "");
            if condition(&stem) {
                return replace_suffix(&word, suffix, replacement);
            }
            return word;
        }
    }
    word
}

/// Porter stemming algorithm implementation.
///
/// The stemmer is stateless; all tables are shared statics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    fn step1a(&self, word: Vec<char>) -> Vec<char> {
        if word.len() == 4 && ends_with(&word, "ies") {
            return replace_suffix(&word, "ies", "ie");
        }
        apply_rules(word, STEP1A)
    }

    fn step1b(&self, word: Vec<char>) -> Vec<char> {
        if ends_with(&word, "ied") {
            let replacement = if word.len() == 4 { "ie" } else { "i" };
            return replace_suffix(&word, "ied", replacement);
        }

        if ends_with(&word, "eed") {
            let stem = replace_suffix(&word, "eed", "");
            if measure(&stem) > 0 {
                return replace_suffix(&word, "eed", "ee");
            }
            return word;
        }

        let Some(mut stem) = ["ed", "ing"]
            .into_iter()
            .filter(|suffix| ends_with(&word, suffix))
            .map(|suffix| replace_suffix(&word, suffix, ""))
            .find(|stem| contains_vowel(stem))
        else {
            return word;
        };

        for (suffix, replacement) in [("at", "ate"), ("bl", "ble"), ("iz", "ize")] {
            if ends_with(&stem, suffix) {
                return replace_suffix(&stem, suffix, replacement);
            }
        }

        if ends_double_consonant(&stem) {
            if !matches!(stem.last(), Some('l' | 's' | 'z')) {
                stem.pop();
            }
            return stem;
        }

        if measure(&stem) == 1 && ends_cvc(&stem) {
            stem.push('e');
        }
        stem
    }

    fn step1c(&self, word: Vec<char>) -> Vec<char> {
        apply_rules(word, STEP1C)
    }

    fn step2(&self, word: Vec<char>) -> Vec<char> {
        if ends_with(&word, "alli") && positive_measure(&replace_suffix(&word, "alli", "")) {
            return self.step2(replace_suffix(&word, "alli", "al"));
        }
        apply_rules(word, STEP2)
    }

    fn step3(&self, word: Vec<char>) -> Vec<char> {
        apply_rules(word, STEP3)
    }

    fn step4(&self, word: Vec<char>) -> Vec<char> {
        apply_rules(word, STEP4)
    }

    fn step5a(&self, word: Vec<char>) -> Vec<char> {
        if ends_with(&word, "e") {
            let stem = replace_suffix(&word, "e", "");
            let m = measure(&stem);
            if m > 1 || (m == 1 && !ends_cvc(&stem)) {
                return stem;
            }
        }
        word
    }

    fn step5b(&self, word: Vec<char>) -> Vec<char> {
        apply_rules(word, STEP5B)
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if let Some(stem) = IRREGULAR_FORMS.get(word.as_str()) {
            return (*stem).to_string();
        }

        let chars: Vec<char> = word.chars().collect();
        if chars.len() <= 2 {
            return word;
        }

        let chars = self.step1a(chars);
        let chars = self.step1b(chars);
        let chars = self.step1c(chars);
        let chars = self.step2(chars);
        let chars = self.step3(chars);
        let chars = self.step4(chars);
        let chars = self.step5a(chars);
        let chars = self.step5b(chars);

        chars.into_iter().collect()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
