//! Binary estimators over TF-IDF feature vectors.
//!
//! Every estimator produces one score per class and the predicted class is
//! the first index holding the highest score. A tie, including the all-zero
//! input, therefore always resolves to class 0.

use std::fmt;

use crate::error::{Result, SpamsiftError};
use crate::ml::Verdict;
use crate::ml::artifact::{EstimatorArtifact, ModelArtifact};

/// Estimator trait.
///
/// Implementations map a feature vector of a fixed width onto per-class
/// scores.
pub trait Estimator: Send + Sync + fmt::Debug {
    /// Per-class scores for a feature vector, in class order.
    fn scores(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Number of features this estimator expects.
    fn n_features(&self) -> usize;

    /// Get the name of this estimator for debugging and logging.
    fn name(&self) -> &'static str;

    /// Predict the class index with the highest score.
    fn predict(&self, features: &[f64]) -> Result<usize> {
        if features.len() != self.n_features() {
            return Err(SpamsiftError::classification(format!(
                "feature vector has {} entries, model expects {}",
                features.len(),
                self.n_features()
            )));
        }

        let scores = self.scores(features)?;
        argmax(&scores).ok_or_else(|| {
            SpamsiftError::classification(format!("{} produced no usable score", self.name()))
        })
    }
}

/// Index of the first maximum. `None` for an empty slice or any NaN.
fn argmax(scores: &[f64]) -> Option<usize> {
    if scores.iter().any(|s| s.is_nan()) {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Multinomial naive Bayes: `class_log_prior + X · feature_log_probᵀ`.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new(class_log_prior: Vec<f64>, feature_log_prob: Vec<Vec<f64>>) -> Self {
        MultinomialNb {
            class_log_prior,
            feature_log_prob,
        }
    }
}

impl Estimator for MultinomialNb {
    fn scores(&self, features: &[f64]) -> Result<Vec<f64>> {
        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| prior + dot(features, log_prob))
            .collect())
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn name(&self) -> &'static str {
        "multinomial_nb"
    }
}

/// Bernoulli naive Bayes.
///
/// Features are binarized at the threshold (when one is set) and absent
/// features contribute `log(1 - p)`.
#[derive(Debug, Clone)]
pub struct BernoulliNb {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    /// `log(1 - exp(feature_log_prob))`, precomputed.
    neg_log_prob: Vec<Vec<f64>>,
    binarize: Option<f64>,
}

impl BernoulliNb {
    pub fn new(
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
        binarize: Option<f64>,
    ) -> Self {
        let neg_log_prob = feature_log_prob
            .iter()
            .map(|row| row.iter().map(|p| (-p.exp()).ln_1p()).collect())
            .collect();

        BernoulliNb {
            class_log_prior,
            feature_log_prob,
            neg_log_prob,
            binarize,
        }
    }
}

impl Estimator for BernoulliNb {
    fn scores(&self, features: &[f64]) -> Result<Vec<f64>> {
        let binarized: Vec<f64> = match self.binarize {
            Some(threshold) => features
                .iter()
                .map(|&v| if v > threshold { 1.0 } else { 0.0 })
                .collect(),
            None => features.to_vec(),
        };

        Ok(self
            .class_log_prior
            .iter()
            .zip(self.feature_log_prob.iter().zip(&self.neg_log_prob))
            .map(|(prior, (log_prob, neg_log_prob))| {
                let present: f64 = binarized
                    .iter()
                    .zip(log_prob.iter().zip(neg_log_prob))
                    .map(|(x, (p, n))| x * (p - n))
                    .sum();
                prior + present + neg_log_prob.iter().sum::<f64>()
            })
            .collect())
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn name(&self) -> &'static str {
        "bernoulli_nb"
    }
}

/// Binary linear model. Class 1 when `coef · x + intercept > 0`.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        LinearModel { coef, intercept }
    }

    /// Signed distance to the decision boundary.
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        dot(&self.coef, features) + self.intercept
    }
}

impl Estimator for LinearModel {
    fn scores(&self, features: &[f64]) -> Result<Vec<f64>> {
        Ok(vec![0.0, self.decision_function(features)])
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

/// A loaded spam model: the estimator plus the metadata shipped with it.
#[derive(Debug)]
pub struct SpamModel {
    estimator: Box<dyn Estimator>,
    classes: Vec<i64>,
    reported_accuracy: Option<f64>,
}

impl SpamModel {
    /// Build a model from an artifact, validating it against the number of
    /// features the vectorizer produces.
    pub fn from_artifact(artifact: ModelArtifact, n_features: usize) -> Result<Self> {
        artifact.validate(n_features)?;

        let estimator: Box<dyn Estimator> = match artifact.estimator {
            EstimatorArtifact::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => Box::new(MultinomialNb::new(class_log_prior, feature_log_prob)),
            EstimatorArtifact::BernoulliNb {
                class_log_prior,
                feature_log_prob,
                binarize,
            } => Box::new(BernoulliNb::new(class_log_prior, feature_log_prob, binarize)),
            EstimatorArtifact::Linear { coef, intercept } => {
                Box::new(LinearModel::new(coef, intercept))
            }
        };

        Ok(SpamModel {
            estimator,
            classes: artifact.classes,
            reported_accuracy: artifact.reported_accuracy,
        })
    }

    /// Classify a feature vector.
    pub fn classify(&self, features: &[f64]) -> Result<Verdict> {
        let index = self.estimator.predict(features)?;
        let label = self.classes.get(index).copied().ok_or_else(|| {
            SpamsiftError::classification(format!("class index {index} is out of range"))
        })?;
        Ok(Verdict::from_label(u8::from(label == 1)))
    }

    /// The estimator behind this model.
    pub fn estimator(&self) -> &dyn Estimator {
        self.estimator.as_ref()
    }

    /// Accuracy recorded when the model was trained.
    pub fn reported_accuracy(&self) -> Option<f64> {
        self.reported_accuracy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multinomial() -> ModelArtifact {
        ModelArtifact {
            classes: vec![0, 1],
            reported_accuracy: Some(0.95),
            estimator: EstimatorArtifact::MultinomialNb {
                // ham is more likely a priori
                class_log_prior: vec![-0.2, -1.7],
                // feature 0 ("free") leans spam, feature 1 ("hello") leans ham
                feature_log_prob: vec![vec![-3.0, -0.1], vec![-0.1, -3.0]],
            },
        }
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[1.0, 1.0]), Some(0));
        assert_eq!(argmax(&[0.0, 2.0, 2.0]), Some(1));
        assert_eq!(argmax(&[-1.0, -3.0]), Some(0));
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f64::NAN, 1.0]), None);
    }

    #[test]
    fn test_multinomial_nb() {
        let model = SpamModel::from_artifact(multinomial(), 2).unwrap();

        assert_eq!(model.classify(&[1.0, 0.0]).unwrap(), Verdict::Spam);
        assert_eq!(model.classify(&[0.0, 1.0]).unwrap(), Verdict::Ham);
        assert_eq!(model.reported_accuracy(), Some(0.95));
        assert_eq!(model.estimator().name(), "multinomial_nb");
    }

    #[test]
    fn test_zero_vector_gets_definite_label() {
        let model = SpamModel::from_artifact(multinomial(), 2).unwrap();
        // only the priors count, ham wins
        assert_eq!(model.classify(&[0.0, 0.0]).unwrap(), Verdict::Ham);
    }

    #[test]
    fn test_bernoulli_nb() {
        let artifact = ModelArtifact {
            classes: vec![0, 1],
            reported_accuracy: None,
            estimator: EstimatorArtifact::BernoulliNb {
                class_log_prior: vec![(0.5f64).ln(), (0.5f64).ln()],
                feature_log_prob: vec![vec![(0.1f64).ln()], vec![(0.8f64).ln()]],
                binarize: Some(0.0),
            },
        };
        let model = SpamModel::from_artifact(artifact, 1).unwrap();

        // present: ham 0.1 vs spam 0.8; absent: ham 0.9 vs spam 0.2
        assert_eq!(model.classify(&[0.4]).unwrap(), Verdict::Spam);
        assert_eq!(model.classify(&[0.0]).unwrap(), Verdict::Ham);

        let scores = model.estimator().scores(&[1.0]).unwrap();
        assert!((scores[0] - (0.5f64 * 0.1).ln()).abs() < 1e-9);
        assert!((scores[1] - (0.5f64 * 0.8).ln()).abs() < 1e-9);
    }

    #[test]
    fn test_linear_model() {
        let artifact = ModelArtifact {
            classes: vec![0, 1],
            reported_accuracy: None,
            estimator: EstimatorArtifact::Linear {
                coef: vec![2.0, -1.0],
                intercept: -0.5,
            },
        };
        let model = SpamModel::from_artifact(artifact, 2).unwrap();

        assert_eq!(model.classify(&[1.0, 0.0]).unwrap(), Verdict::Spam);
        assert_eq!(model.classify(&[0.0, 1.0]).unwrap(), Verdict::Ham);
        // decision exactly zero is not spam
        assert_eq!(model.classify(&[0.25, 0.0]).unwrap(), Verdict::Ham);
    }

    #[test]
    fn test_dimension_mismatch_is_classification_error() {
        let model = SpamModel::from_artifact(multinomial(), 2).unwrap();
        let err = model.classify(&[1.0]).unwrap_err();

        assert!(matches!(err, SpamsiftError::Classification(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_mismatched_artifact_rejected() {
        let err = SpamModel::from_artifact(multinomial(), 3).unwrap_err();
        assert!(err.is_fatal());
    }
}
