//! Text normalization for classification.
//!
//! [`TextNormalizer`] runs the fixed pipeline the bundled models were fit on:
//!
//! ```text
//! lowercase → tokenize → alphanumeric filter → stop filter → Porter stem → join
//! ```
//!
//! The stage order is part of the model contract and cannot be configured.
//! Only the word tokenizer can be swapped (see [`NormalizerConfig`]).
//!
//! # Examples
//!
//! ```
//! use spamsift::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::default_english().unwrap();
//! let normalized = normalizer.normalize("Congratulations! You WON a free prize, claim now!!!");
//! assert_eq!(normalized.as_str(), "congratul free prize claim");
//! ```

use std::fmt;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer, StageTrace};
use crate::analysis::char_filter::LowercaseCharFilter;
use crate::analysis::token_filter::{AlphanumericFilter, StemFilter, StopFilter};
use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{Result, SpamsiftError};

/// Configuration of the normalization pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Word tokenizer used after case folding.
    pub tokenizer: TokenizerKind,
}

/// The space-joined token string handed to the vectorizer.
///
/// Every token is non-empty, alphanumeric and separated by exactly one space.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// The empty normalized text.
    pub fn empty() -> Self {
        NormalizedText(String::new())
    }

    fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for token in tokens {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(token.as_ref());
        }
        NormalizedText(text)
    }

    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the individual tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// Whether no token survived normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Converts raw messages into [`NormalizedText`].
///
/// The normalizer holds no per-call state; one instance is built at startup
/// and shared by every request.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    analyzer: PipelineAnalyzer,
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Build the normalizer, compiling the tokenizer rules.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let tokenizer = config.tokenizer.build()?;
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_filter(Arc::new(AlphanumericFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(StemFilter::new()))
            .with_name(format!("normalizer_{}", config.tokenizer));

        Ok(TextNormalizer { analyzer, config })
    }

    /// Build the default English normalizer.
    pub fn default_english() -> Result<Self> {
        Self::new(NormalizerConfig::default())
    }

    /// The configuration this normalizer was built with.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a message, reporting pipeline faults.
    pub fn try_normalize(&self, raw: &str) -> Result<NormalizedText> {
        let tokens = self
            .analyzer
            .analyze(raw)
            .map_err(|e| SpamsiftError::normalization(e.to_string()))?;

        Ok(NormalizedText::from_tokens(tokens.map(|t| t.text)))
    }

    /// Normalize a message.
    ///
    /// Never fails: a pipeline fault is logged and yields the empty text.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        self.try_normalize(raw).unwrap_or_else(|e| {
            warn!("Normalization failed, using empty text: {e}");
            NormalizedText::empty()
        })
    }

    /// Decode UTF-8 bytes and normalize them.
    pub fn normalize_bytes(&self, raw: &[u8]) -> Result<NormalizedText> {
        self.try_normalize(decode(raw)?)
    }

    /// Like [`TextNormalizer::trace`], decoding UTF-8 first.
    pub fn trace_bytes(&self, raw: &[u8]) -> Result<(NormalizedText, Vec<StageTrace>)> {
        self.trace(decode(raw)?)
    }

    /// Normalize a message and return the tokens after each stage.
    pub fn trace(&self, raw: &str) -> Result<(NormalizedText, Vec<StageTrace>)> {
        let (tokens, mut trace) = self
            .analyzer
            .analyze_with_trace(raw)
            .map_err(|e| SpamsiftError::normalization(e.to_string()))?;

        // Report the tokenize stage under one name whichever tokenizer ran.
        if let Some(stage) = trace.get_mut(self.analyzer.char_filters().len()) {
            stage.stage = "tokenize".to_string();
        }

        Ok((
            NormalizedText::from_tokens(tokens.iter().map(|t| t.text.as_str())),
            trace,
        ))
    }
}

fn decode(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw)
        .map_err(|e| SpamsiftError::normalization(format!("message is not valid UTF-8: {e}")))
}
