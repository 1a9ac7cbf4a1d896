//! Pre-fit vectorizer and classifier models.
//!
//! Both models are loaded from artifact files exported by an external
//! training run (see [`artifact`]) and are immutable once loaded:
//!
//! - [`tfidf::TfIdfVectorizer`] turns normalized text into a [`FeatureVector`];
//! - [`classifier::SpamModel`] maps that vector onto a binary label.

pub mod artifact;
pub mod classifier;
pub mod tfidf;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use artifact::{ArtifactFormat, EstimatorArtifact, ModelArtifact, Norm, VectorizerArtifact};
pub use classifier::{Estimator, SpamModel};
pub use tfidf::TfIdfVectorizer;

/// A dense feature vector, one entry per vocabulary term.
pub type FeatureVector = Vec<f64>;

/// The verdict for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Label 1.
    Spam,
    /// Label 0.
    Ham,
}

impl Verdict {
    /// Build a verdict from a binary label, where 1 means spam.
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Verdict::Spam
        } else {
            Verdict::Ham
        }
    }

    /// The binary label of this verdict.
    pub fn label(self) -> u8 {
        match self {
            Verdict::Spam => 1,
            Verdict::Ham => 0,
        }
    }

    /// Whether this verdict flags the message as spam.
    pub fn is_spam(self) -> bool {
        self == Verdict::Spam
    }

    /// The message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Spam => "This is SPAM",
            Verdict::Ham => "This is NOT spam",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Spam => write!(f, "spam"),
            Verdict::Ham => write!(f, "ham"),
        }
    }
}
