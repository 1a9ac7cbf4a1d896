//! TF-IDF vectorizer for text feature extraction.
//!
//! The vectorizer is loaded from a [`VectorizerArtifact`] and only
//! transforms. Term extraction runs through a [`PipelineAnalyzer`]:
//!
//! ```text
//! lowercase (optional) → token_pattern → stop words (optional) → n-grams
//! ```
//!
//! Counts are then clipped (`binary`) or dampened (`sublinear_tf`), weighted
//! by idf and normalized. Terms outside the vocabulary are ignored, so an
//! input with no known term yields the zero vector.

use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::LowercaseCharFilter;
use crate::analysis::token;
use crate::analysis::token_filter::StopFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::{Result, SpamsiftError};
use crate::ml::FeatureVector;
use crate::ml::artifact::{Norm, VectorizerArtifact};

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Option<Vec<f64>>,
    /// Analyzer for term extraction.
    analyzer: PipelineAnalyzer,
    ngram_range: (usize, usize),
    binary: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("norm", &self.norm)
            .field("analyzer", &self.analyzer)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Build a vectorizer from a fitted artifact, validating it first.
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        artifact.validate()?;

        let tokenizer = Arc::new(RegexTokenizer::with_pattern(&artifact.token_pattern)?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer).with_name("vectorizer");
        if artifact.lowercase {
            analyzer = analyzer.add_char_filter(Arc::new(LowercaseCharFilter::new()));
        }
        if let Some(stop_words) = artifact.stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(stop_words)));
        }

        Ok(TfIdfVectorizer {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            analyzer,
            ngram_range: artifact.ngram_range,
            binary: artifact.binary,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Look up the column of a term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Extract the terms (n-grams included) of a document.
    pub fn terms(&self, document: &str) -> Result<Vec<String>> {
        let words = token::texts(self.analyzer.analyze(document)?);
        Ok(word_ngrams(&words, self.ngram_range))
    }

    /// Transform a document into a TF-IDF feature vector.
    pub fn transform(&self, document: &str) -> Result<FeatureVector> {
        let mut features: FeatureVector = vec![0.0; self.vocabulary.len()];

        for term in self.terms(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                features[idx] += 1.0;
            }
        }

        for value in features.iter_mut().filter(|v| **v > 0.0) {
            if self.binary {
                *value = 1.0;
            }
            if self.sublinear_tf {
                *value = value.ln() + 1.0;
            }
        }

        if let Some(idf) = &self.idf {
            for (value, weight) in features.iter_mut().zip(idf) {
                *value *= weight;
            }
        }

        match self.norm {
            Some(Norm::L2) => {
                let length = features.iter().map(|v| v * v).sum::<f64>().sqrt();
                scale(&mut features, length);
            }
            Some(Norm::L1) => {
                let length = features.iter().map(|v| v.abs()).sum::<f64>();
                scale(&mut features, length);
            }
            None => {}
        }

        if features.iter().any(|v| !v.is_finite()) {
            return Err(SpamsiftError::classification(
                "feature vector contains a non-finite value",
            ));
        }

        Ok(features)
    }
}

fn scale(features: &mut [f64], length: f64) {
    if length > 0.0 {
        for value in features.iter_mut() {
            *value /= length;
        }
    }
}

/// Unigrams first, then each longer n-gram size in order, words joined by a
/// single space.
fn word_ngrams(words: &[String], (min_n, max_n): (usize, usize)) -> Vec<String> {
    if max_n == 1 {
        return words.to_vec();
    }

    let mut terms = Vec::new();
    for n in min_n..=max_n.min(words.len()) {
        terms.extend(words.windows(n).map(|window| window.join(" ")));
    }
    terms
}
