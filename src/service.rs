//! The classification service shared by the CLI and the web server.
//!
//! [`SpamClassifier`] bundles the normalizer, the vectorizer and the model.
//! It is built once at startup and is immutable afterwards, so one instance
//! behind an `Arc` serves every request without locking.
//!
//! A submission is analyzed in four steps:
//!
//! ```text
//! blank check → normalize → vectorize → classify
//! ```
//!
//! Failures after startup never escape [`SpamClassifier::analyze`]; they are
//! reported through [`Outcome`] so the caller can render them and keep
//! serving.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamsiftError};
use crate::ml::artifact::{ModelArtifact, VectorizerArtifact, load_artifact};
use crate::ml::{SpamModel, TfIdfVectorizer, Verdict};
use crate::normalizer::{NormalizedText, NormalizerConfig, TextNormalizer};

/// Warning shown for a submission with nothing to classify.
pub const EMPTY_MESSAGE_WARNING: &str = "Please enter a message";

/// Locations of the two model artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Fitted vectorizer state.
    pub vectorizer: PathBuf,
    /// Fitted classifier state.
    pub model: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        ArtifactPaths {
            vectorizer: PathBuf::from("vectorizer.json"),
            model: PathBuf::from("model.json"),
        }
    }
}

/// What to do with a non-blank message that normalizes to nothing.
///
/// Blank messages are always rejected before normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyPolicy {
    /// Classify the empty text anyway; the model sees a zero vector.
    #[default]
    Classify,
    /// Report [`Outcome::NoContent`] without classifying.
    Reject,
}

impl fmt::Display for EmptyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyPolicy::Classify => write!(f, "classify"),
            EmptyPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for EmptyPolicy {
    type Err = SpamsiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "classify" => Ok(EmptyPolicy::Classify),
            "reject" => Ok(EmptyPolicy::Reject),
            other => Err(SpamsiftError::invalid_argument(format!(
                "unknown empty policy '{other}' (expected 'classify' or 'reject')"
            ))),
        }
    }
}

/// How the analysis of one submission ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum Outcome {
    /// The model produced a verdict.
    Verdict(Verdict),
    /// There was nothing to classify.
    NoContent,
    /// Normalization faulted; the message is the user-facing diagnostic.
    NormalizationFailed(String),
    /// Vectorization or classification faulted.
    ClassificationFailed(String),
}

/// The result of analyzing one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// The normalized text, empty when normalization produced nothing or failed.
    pub processed: NormalizedText,
    /// How the analysis ended.
    pub outcome: Outcome,
}

impl Analysis {
    fn new(processed: NormalizedText, outcome: Outcome) -> Self {
        Analysis { processed, outcome }
    }

    /// The verdict, if one was reached.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.outcome {
            Outcome::Verdict(verdict) => Some(verdict),
            _ => None,
        }
    }

    /// The warning to show instead of a verdict.
    pub fn warning(&self) -> Option<&'static str> {
        match self.outcome {
            Outcome::NoContent => Some(EMPTY_MESSAGE_WARNING),
            _ => None,
        }
    }

    /// The error to show instead of a verdict.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::NormalizationFailed(message) | Outcome::ClassificationFailed(message) => {
                Some(message)
            }
            _ => None,
        }
    }
}

/// Normalizer, vectorizer and model behind one shared handle.
#[derive(Debug)]
pub struct SpamClassifier {
    normalizer: TextNormalizer,
    vectorizer: TfIdfVectorizer,
    model: SpamModel,
    empty_policy: EmptyPolicy,
}

impl SpamClassifier {
    /// Build a classifier from in-memory artifacts.
    pub fn from_artifacts(
        vectorizer: VectorizerArtifact,
        model: ModelArtifact,
        normalizer: NormalizerConfig,
    ) -> Result<Self> {
        let normalizer = TextNormalizer::new(normalizer)?;
        let vectorizer = TfIdfVectorizer::from_artifact(vectorizer)?;
        let model = SpamModel::from_artifact(model, vectorizer.vocabulary_size())?;

        Ok(SpamClassifier {
            normalizer,
            vectorizer,
            model,
            empty_policy: EmptyPolicy::default(),
        })
    }

    /// Load both artifacts from disk and build the classifier.
    ///
    /// Any failure is an initialization error.
    pub fn load(paths: &ArtifactPaths, normalizer: NormalizerConfig) -> Result<Self> {
        info!(
            "Loading vectorizer from {} and model from {}",
            paths.vectorizer.display(),
            paths.model.display()
        );

        let vectorizer: VectorizerArtifact = load_artifact(&paths.vectorizer, "vectorizer")?;
        let model: ModelArtifact = load_artifact(&paths.model, "model")?;
        let classifier = Self::from_artifacts(vectorizer, model, normalizer)?;

        info!(
            "Loaded {} model over {} features",
            classifier.model.estimator().name(),
            classifier.vectorizer.vocabulary_size()
        );
        Ok(classifier)
    }

    /// Set the policy for messages that normalize to nothing.
    pub fn with_empty_policy(mut self, empty_policy: EmptyPolicy) -> Self {
        self.empty_policy = empty_policy;
        self
    }

    /// Get the normalizer.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Get the vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// Get the model.
    pub fn model(&self) -> &SpamModel {
        &self.model
    }

    /// Get the empty message policy.
    pub fn empty_policy(&self) -> EmptyPolicy {
        self.empty_policy
    }

    /// Accuracy recorded with the model, if any.
    pub fn reported_accuracy(&self) -> Option<f64> {
        self.model.reported_accuracy()
    }

    /// Vectorize and classify already normalized text.
    pub fn classify_normalized(&self, processed: &NormalizedText) -> Result<Verdict> {
        let classify = || -> Result<Verdict> {
            let features = self.vectorizer.transform(processed.as_str())?;
            debug!(
                "Vectorized into {} non-zero features",
                features.iter().filter(|v| **v != 0.0).count()
            );
            self.model.classify(&features)
        };

        classify().map_err(|e| match e {
            SpamsiftError::Classification(_) => e,
            other => SpamsiftError::classification(other.to_string()),
        })
    }

    /// Analyze one submission.
    pub fn analyze(&self, message: &str) -> Analysis {
        if message.trim().is_empty() {
            debug!("Blank message, nothing to analyze");
            return Analysis::new(NormalizedText::empty(), Outcome::NoContent);
        }

        match self.normalizer.try_normalize(message) {
            Ok(processed) => self.analyze_normalized(processed),
            Err(e) => {
                warn!("{e}");
                Analysis::new(
                    NormalizedText::empty(),
                    Outcome::NormalizationFailed(e.to_string()),
                )
            }
        }
    }

    /// Analyze one submission given as raw bytes.
    ///
    /// Bytes that are not valid UTF-8 end as
    /// [`Outcome::NormalizationFailed`].
    pub fn analyze_bytes(&self, message: &[u8]) -> Analysis {
        match std::str::from_utf8(message) {
            Ok(text) => self.analyze(text),
            Err(_) => match self.normalizer.normalize_bytes(message) {
                Ok(processed) => self.analyze_normalized(processed),
                Err(e) => {
                    warn!("{e}");
                    Analysis::new(
                        NormalizedText::empty(),
                        Outcome::NormalizationFailed(e.to_string()),
                    )
                }
            },
        }
    }

    fn analyze_normalized(&self, processed: NormalizedText) -> Analysis {
        debug!("Normalized text: {processed:?}");

        if processed.is_empty() && self.empty_policy == EmptyPolicy::Reject {
            debug!("Message normalized to nothing, not classifying");
            return Analysis::new(processed, Outcome::NoContent);
        }

        let outcome = match self.classify_normalized(&processed) {
            Ok(verdict) => {
                debug!("Verdict: {verdict}");
                Outcome::Verdict(verdict)
            }
            Err(e) => {
                warn!("{e}");
                Outcome::ClassificationFailed(e.to_string())
            }
        };
        Analysis::new(processed, outcome)
    }
}
