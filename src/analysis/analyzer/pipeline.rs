//! Pipeline analyzer that combines char filters, a tokenizer and token filters.
//!
//! # Architecture
//!
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: Normalizes raw text
//! 2. Tokenizer: Splits text into tokens
//! 3. Token Filters: Applied sequentially in the order they were added
//!
//! The order is fixed at construction time and never changes afterwards.
//!
//! # Examples
//!
//! ```
//! use spamsift::analysis::analyzer::Analyzer;
//! use spamsift::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use spamsift::analysis::char_filter::LowercaseCharFilter;
//! use spamsift::analysis::tokenizer::regex::RegexTokenizer;
//! use spamsift::analysis::token_filter::stop::StopFilter;
//! use std::sync::Arc;
//!
//! let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
//! let analyzer = PipelineAnalyzer::new(tokenizer)
//!     .add_char_filter(Arc::new(LowercaseCharFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])))
//!     .with_name("my_custom_analyzer");
//!
//! let tokens: Vec<_> = analyzer.analyze("Hello THE world AND test").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// The output of one pipeline stage, recorded by
/// [`PipelineAnalyzer::analyze_with_trace`].
///
/// Char filter stages hold the whole filtered text as their only entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageTrace {
    /// Name of the char filter, tokenizer or filter that ran.
    pub stage: String,
    /// Token texts after the stage.
    pub tokens: Vec<String>,
}

impl StageTrace {
    fn new(stage: &str, tokens: Vec<String>) -> Self {
        StageTrace {
            stage: stage.to_string(),
            tokens,
        }
    }
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the configured name of this analyzer.
    pub fn pipeline_name(&self) -> &str {
        &self.name
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    fn apply_char_filters(&self, text: &str) -> String {
        self.char_filters
            .iter()
            .fold(text.to_string(), |text, char_filter| char_filter.filter(&text))
    }

    /// Analyze the text and record the output of every stage.
    pub fn analyze_with_trace(&self, text: &str) -> Result<(Vec<Token>, Vec<StageTrace>)> {
        let mut trace = Vec::with_capacity(self.char_filters.len() + self.filters.len() + 1);

        let mut filtered_text = text.to_string();
        for char_filter in &self.char_filters {
            filtered_text = char_filter.filter(&filtered_text);
            trace.push(StageTrace::new(
                char_filter.name(),
                vec![filtered_text.clone()],
            ));
        }

        let mut tokens: Vec<Token> = self.tokenizer.tokenize(&filtered_text)?.collect();
        trace.push(StageTrace::new(self.tokenizer.name(), texts(&tokens)));

        for filter in &self.filters {
            tokens = filter.filter(Box::new(tokens.into_iter()))?.collect();
            trace.push(StageTrace::new(filter.name(), texts(&tokens)));
        }

        Ok((tokens, trace))
    }
}

fn texts(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(|t| t.text.clone()).collect()
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let filtered_text = self.apply_char_filters(text);

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
