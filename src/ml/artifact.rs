//! Serialized vectorizer and model artifacts.
//!
//! Artifacts are plain serde structs. The file extension picks the format:
//! `.json` is read with serde_json, `.bin` and `.bincode` with bincode.
//!
//! The field layout mirrors what a fitted scikit-learn `TfidfVectorizer`
//! and a naive Bayes or linear estimator expose, so an exporter only has to
//! dump their attributes.
//!
//! # Examples
//!
//! ```
//! use spamsift::ml::artifact::VectorizerArtifact;
//!
//! let artifact: VectorizerArtifact = serde_json::from_str(r#"{
//!     "vocabulary": {"free": 0, "prize": 1},
//!     "idf": [1.5, 2.0]
//! }"#).unwrap();
//!
//! assert!(artifact.validate().is_ok());
//! assert!(artifact.lowercase);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{Result, SpamsiftError};

/// On-disk encoding of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// serde_json text.
    Json,
    /// bincode 1.x binary.
    Bincode,
}

impl ArtifactFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(ArtifactFormat::Json),
            Some("bin") | Some("bincode") => Ok(ArtifactFormat::Bincode),
            _ => Err(SpamsiftError::initialization(format!(
                "unsupported artifact extension for {} (expected .json, .bin or .bincode)",
                path.display()
            ))),
        }
    }
}

/// Vector normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Unit Euclidean length.
    L2,
    /// Unit sum of absolute values.
    L1,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// State of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to column index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column, absent when idf weighting is off.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    /// Lowercase the document before extracting terms.
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Term extraction pattern. With one capture group, the group is the term.
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    /// Inclusive range of word n-gram sizes.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Terms removed before building n-grams.
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    /// Clip term counts to 1.
    #[serde(default)]
    pub binary: bool,
    /// Replace term counts with `1 + ln(tf)`.
    #[serde(default)]
    pub sublinear_tf: bool,
    /// Final vector normalization.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

impl VectorizerArtifact {
    /// Build an artifact with default settings around a vocabulary and idf table.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Option<Vec<f64>>) -> Self {
        VectorizerArtifact {
            vocabulary,
            idf,
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: None,
            binary: false,
            sublinear_tf: false,
            norm: default_norm(),
        }
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        let n_features = self.n_features();
        if n_features == 0 {
            return Err(SpamsiftError::initialization("vectorizer vocabulary is empty"));
        }

        let mut seen = vec![false; n_features];
        for (term, &index) in &self.vocabulary {
            if index >= n_features {
                return Err(SpamsiftError::initialization(format!(
                    "vocabulary index {index} for '{term}' is out of range for {n_features} terms"
                )));
            }
            if seen[index] {
                return Err(SpamsiftError::initialization(format!(
                    "vocabulary index {index} is assigned to more than one term"
                )));
            }
            seen[index] = true;
        }

        if let Some(idf) = &self.idf {
            if idf.len() != n_features {
                return Err(SpamsiftError::initialization(format!(
                    "idf has {} entries but the vocabulary has {n_features} terms",
                    idf.len()
                )));
            }
            ensure_finite("idf", idf)?;
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n < 1 || min_n > max_n {
            return Err(SpamsiftError::initialization(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let pattern = Regex::new(&self.token_pattern).map_err(|e| {
            SpamsiftError::initialization(format!(
                "token_pattern '{}' does not compile: {e}",
                self.token_pattern
            ))
        })?;
        if pattern.captures_len() > 2 {
            return Err(SpamsiftError::initialization(
                "token_pattern has more than one capture group",
            ));
        }

        Ok(())
    }
}

/// The fitted estimator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorArtifact {
    /// Multinomial naive Bayes.
    MultinomialNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
    /// Bernoulli naive Bayes.
    BernoulliNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
        /// Threshold for mapping features to 0/1, absent when the input is
        /// already binary.
        #[serde(default)]
        binarize: Option<f64>,
    },
    /// Binary linear model such as logistic regression or a linear SVM.
    Linear { coef: Vec<f64>, intercept: f64 },
}

impl EstimatorArtifact {
    /// Short name of the estimator family.
    pub fn kind(&self) -> &'static str {
        match self {
            EstimatorArtifact::MultinomialNb { .. } => "multinomial_nb",
            EstimatorArtifact::BernoulliNb { .. } => "bernoulli_nb",
            EstimatorArtifact::Linear { .. } => "linear",
        }
    }

    /// Number of feature columns the estimator expects.
    pub fn n_features(&self) -> Option<usize> {
        match self {
            EstimatorArtifact::MultinomialNb {
                feature_log_prob, ..
            }
            | EstimatorArtifact::BernoulliNb {
                feature_log_prob, ..
            } => feature_log_prob.first().map(Vec::len),
            EstimatorArtifact::Linear { coef, .. } => Some(coef.len()),
        }
    }
}

/// State of a fitted binary classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Class labels in column order. Must be `[0, 1]`.
    pub classes: Vec<i64>,
    /// Held-out accuracy recorded at training time, shown on the form page.
    #[serde(default)]
    pub reported_accuracy: Option<f64>,
    /// Estimator parameters.
    pub estimator: EstimatorArtifact,
}

impl ModelArtifact {
    /// Check internal consistency against the vectorizer's feature count.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes != [0, 1] {
            return Err(SpamsiftError::initialization(format!(
                "model classes must be [0, 1], found {:?}",
                self.classes
            )));
        }

        if let Some(accuracy) = self.reported_accuracy {
            if !accuracy.is_finite() || !(0.0..=1.0).contains(&accuracy) {
                return Err(SpamsiftError::initialization(format!(
                    "reported_accuracy {accuracy} is not within [0, 1]"
                )));
            }
        }

        match &self.estimator {
            EstimatorArtifact::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => validate_naive_bayes(class_log_prior, feature_log_prob, n_features, false),
            EstimatorArtifact::BernoulliNb {
                class_log_prior,
                feature_log_prob,
                binarize,
            } => {
                if let Some(threshold) = binarize {
                    ensure_finite("binarize", &[*threshold])?;
                }
                validate_naive_bayes(class_log_prior, feature_log_prob, n_features, true)
            }
            EstimatorArtifact::Linear { coef, intercept } => {
                check_dimension("coef", coef.len(), n_features)?;
                ensure_finite("coef", coef)?;
                ensure_finite("intercept", &[*intercept])
            }
        }
    }
}

fn validate_naive_bayes(
    class_log_prior: &[f64],
    feature_log_prob: &[Vec<f64>],
    n_features: usize,
    strictly_negative: bool,
) -> Result<()> {
    check_dimension("class_log_prior", class_log_prior.len(), 2)?;
    check_dimension("feature_log_prob rows", feature_log_prob.len(), 2)?;
    ensure_finite("class_log_prior", class_log_prior)?;

    for row in feature_log_prob {
        check_dimension("feature_log_prob", row.len(), n_features)?;
        ensure_finite("feature_log_prob", row)?;
        // log(1 - p) must stay finite.
        if strictly_negative && row.iter().any(|&v| v >= 0.0) {
            return Err(SpamsiftError::initialization(
                "feature_log_prob must be negative for a Bernoulli model",
            ));
        }
    }

    Ok(())
}

fn check_dimension(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(SpamsiftError::initialization(format!(
            "{name} has {actual} entries, expected {expected}"
        )));
    }
    Ok(())
}

fn ensure_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(SpamsiftError::initialization(format!(
            "{name}[{i}] is not a finite number"
        ))),
        None => Ok(()),
    }
}

/// Read an artifact from `path`.
///
/// Every failure, including an unknown extension, comes back as an
/// initialization error carrying the full context chain.
pub fn load_artifact<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let load = || -> anyhow::Result<T> {
        let format = ArtifactFormat::from_path(path)?;
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read {what} artifact {}", path.display()))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        let value = match format {
            ArtifactFormat::Json => serde_json::from_slice(&bytes)
                .with_context(|| format!("failed to parse {what} artifact {}", path.display()))?,
            ArtifactFormat::Bincode => bincode::deserialize(&bytes)
                .with_context(|| format!("failed to decode {what} artifact {}", path.display()))?,
        };
        Ok(value)
    };

    load().map_err(|e| SpamsiftError::initialization(format!("{e:#}")))
}

/// Write an artifact to `path` in the format its extension names.
pub fn save_artifact<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let bytes = match ArtifactFormat::from_path(path)? {
        ArtifactFormat::Json => serde_json::to_vec_pretty(value)?,
        ArtifactFormat::Bincode => bincode::serialize(value)?,
    };
    fs::write(path, bytes)?;
    Ok(())
}
