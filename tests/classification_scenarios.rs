use std::collections::HashMap;
use std::path::Path;

use tempfile::TempDir;

use spamsift::error::Result;
use spamsift::ml::artifact::save_artifact;
use spamsift::ml::{EstimatorArtifact, ModelArtifact, VectorizerArtifact, Verdict};
use spamsift::normalizer::NormalizerConfig;
use spamsift::service::{ArtifactPaths, EmptyPolicy, Outcome, SpamClassifier};

const TERMS: [&str; 6] = ["free", "prize", "claim", "hello", "today", "call"];

fn vectorizer_artifact() -> VectorizerArtifact {
    let vocabulary: HashMap<String, usize> = TERMS
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), i))
        .collect();
    VectorizerArtifact::new(vocabulary, Some(vec![1.2, 1.4, 1.6, 1.1, 1.3, 1.0]))
}

fn ln(row: [f64; 6]) -> Vec<f64> {
    row.iter().map(|p| p.ln()).collect()
}

fn multinomial_model() -> ModelArtifact {
    ModelArtifact {
        classes: vec![0, 1],
        reported_accuracy: Some(0.968),
        estimator: EstimatorArtifact::MultinomialNb {
            class_log_prior: vec![0.6_f64.ln(), 0.4_f64.ln()],
            feature_log_prob: vec![
                ln([0.05, 0.05, 0.05, 0.35, 0.35, 0.15]),
                ln([0.3, 0.3, 0.2, 0.05, 0.05, 0.1]),
            ],
        },
    }
}

fn bernoulli_model() -> ModelArtifact {
    ModelArtifact {
        classes: vec![0, 1],
        reported_accuracy: None,
        estimator: EstimatorArtifact::BernoulliNb {
            class_log_prior: vec![0.5_f64.ln(), 0.5_f64.ln()],
            feature_log_prob: vec![
                ln([0.1, 0.1, 0.1, 0.6, 0.6, 0.3]),
                ln([0.6, 0.6, 0.5, 0.1, 0.1, 0.2]),
            ],
            binarize: Some(0.0),
        },
    }
}

fn write_artifacts(
    dir: &Path,
    extension: &str,
    vectorizer: &VectorizerArtifact,
    model: &ModelArtifact,
) -> Result<ArtifactPaths> {
    let paths = ArtifactPaths {
        vectorizer: dir.join(format!("vectorizer.{extension}")),
        model: dir.join(format!("model.{extension}")),
    };
    save_artifact(vectorizer, &paths.vectorizer)?;
    save_artifact(model, &paths.model)?;
    Ok(paths)
}

#[test]
fn json_artifacts_classify_spam_and_ham() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = write_artifacts(dir.path(), "json", &vectorizer_artifact(), &multinomial_model())?;
    let classifier = SpamClassifier::load(&paths, NormalizerConfig::default())?;

    assert_eq!(classifier.reported_accuracy(), Some(0.968));
    assert_eq!(classifier.model().estimator().name(), "multinomial_nb");

    let spam = classifier.analyze("Congratulations! You WON a free prize, claim now!!!");
    assert_eq!(spam.processed.as_str(), "congratul free prize claim");
    assert_eq!(spam.verdict(), Some(Verdict::Spam));

    let ham = classifier.analyze("Hello, how are you today?");
    assert_eq!(ham.processed.as_str(), "hello today");
    assert_eq!(ham.verdict(), Some(Verdict::Ham));
    Ok(())
}

#[test]
fn bincode_artifacts_match_json_artifacts() -> Result<()> {
    let dir = TempDir::new()?;
    let json = write_artifacts(dir.path(), "json", &vectorizer_artifact(), &bernoulli_model())?;
    let bincode = write_artifacts(dir.path(), "bin", &vectorizer_artifact(), &bernoulli_model())?;

    let from_json = SpamClassifier::load(&json, NormalizerConfig::default())?;
    let from_bincode = SpamClassifier::load(&bincode, NormalizerConfig::default())?;
    assert_eq!(from_bincode.model().estimator().name(), "bernoulli_nb");

    for message in [
        "Claim your FREE prize, call today",
        "hello, are you free today?",
        "zebra xylophone",
        "!!!",
    ] {
        assert_eq!(
            from_json.analyze(message),
            from_bincode.analyze(message),
            "message {message:?}"
        );
    }

    let spam = from_bincode.analyze("Claim your FREE prize");
    assert_eq!(spam.verdict(), Some(Verdict::Spam));
    Ok(())
}

#[test]
fn message_without_content_words_follows_empty_policy() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = write_artifacts(dir.path(), "json", &vectorizer_artifact(), &multinomial_model())?;

    // Priors favor ham when no feature fires.
    let classifier = SpamClassifier::load(&paths, NormalizerConfig::default())?;
    let analysis = classifier.analyze("Are you there?");
    assert!(analysis.processed.is_empty());
    assert_eq!(analysis.verdict(), Some(Verdict::Ham));

    let classifier = classifier.with_empty_policy(EmptyPolicy::Reject);
    let analysis = classifier.analyze("Are you there?");
    assert_eq!(analysis.outcome, Outcome::NoContent);
    assert!(analysis.warning().is_some());
    Ok(())
}

#[test]
fn mismatched_artifacts_fail_to_load() -> Result<()> {
    let dir = TempDir::new()?;
    let model = ModelArtifact {
        classes: vec![0, 1],
        reported_accuracy: None,
        estimator: EstimatorArtifact::Linear {
            coef: vec![1.0, -1.0, 0.5],
            intercept: 0.0,
        },
    };
    let paths = write_artifacts(dir.path(), "json", &vectorizer_artifact(), &model)?;

    let err = SpamClassifier::load(&paths, NormalizerConfig::default()).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().starts_with("Initialization failed"));
    Ok(())
}

#[test]
fn corrupt_and_unknown_artifacts_fail_to_load() -> Result<()> {
    let dir = TempDir::new()?;
    let paths = write_artifacts(dir.path(), "json", &vectorizer_artifact(), &multinomial_model())?;

    std::fs::write(&paths.model, b"{ not json")?;
    let err = SpamClassifier::load(&paths, NormalizerConfig::default()).unwrap_err();
    assert!(err.to_string().contains("failed to parse model artifact"));

    let pickled = ArtifactPaths {
        vectorizer: dir.path().join("vectorizer.pkl"),
        model: paths.model.clone(),
    };
    std::fs::write(&pickled.vectorizer, b"\x80\x04")?;
    let err = SpamClassifier::load(&pickled, NormalizerConfig::default()).unwrap_err();
    assert!(err.to_string().contains("unsupported artifact extension"));
    Ok(())
}

#[test]
fn bundled_demo_artifacts_load_and_classify() -> Result<()> {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("demo");
    let paths = ArtifactPaths {
        vectorizer: demo.join("vectorizer.json"),
        model: demo.join("model.json"),
    };
    let classifier = SpamClassifier::load(&paths, NormalizerConfig::default())?;

    let spam = classifier.analyze("Congratulations! You WON a free prize, claim now!!!");
    assert_eq!(spam.verdict(), Some(Verdict::Spam));

    let ham = classifier.analyze("I'll be home late tonight, save me some dinner");
    assert_eq!(ham.verdict(), Some(Verdict::Ham));
    Ok(())
}
