//! Command implementations for the Spamsift CLI.

use std::io::Read;
use std::sync::Arc;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::normalizer::TextNormalizer;
use crate::service::SpamClassifier;
use crate::web::{self, ServerConfig};

/// Execute a CLI command.
pub fn execute_command(args: SpamsiftArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Normalize(normalize_args) => normalize(normalize_args.clone(), &args),
        Command::Validate(validate_args) => validate(validate_args.clone(), &args),
    }
}

/// Read the message argument, falling back to stdin.
fn read_message(message: Option<String>) -> Result<Vec<u8>> {
    match message {
        Some(message) => Ok(message.into_bytes()),
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Serve the web form until interrupted.
fn serve(args: ServeArgs, _cli_args: &SpamsiftArgs) -> Result<()> {
    let classifier = SpamClassifier::load(
        &args.artifacts.paths(),
        args.pipeline.normalizer_config(),
    )?
    .with_empty_policy(args.empty_policy);

    let config = ServerConfig { bind: args.bind };
    info!(
        "Serving with {} tokenizer, empty policy '{}'",
        args.pipeline.tokenizer, args.empty_policy
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::serve(Arc::new(classifier), &config))
}

/// Classify one message.
fn classify(args: ClassifyArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let classifier = SpamClassifier::load(
        &args.artifacts.paths(),
        args.pipeline.normalizer_config(),
    )?
    .with_empty_policy(args.empty_policy);

    let message = read_message(args.message)?;
    let analysis = classifier.analyze_bytes(&message);

    output_result(
        "Classification completed",
        &ClassifyResult::from(&analysis),
        cli_args,
    )
}

/// Print the normalized form of a message.
///
/// A message that cannot be normalized prints an empty result with the
/// diagnostic instead of failing the command.
fn normalize(args: NormalizeArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let normalizer = TextNormalizer::new(args.pipeline.normalizer_config())?;
    let message = read_message(args.message)?;

    let normalized = if args.trace {
        normalizer
            .trace_bytes(&message)
            .map(|(processed, stages)| (processed, Some(stages)))
    } else {
        normalizer
            .normalize_bytes(&message)
            .map(|processed| (processed, None))
    };

    let result = match normalized {
        Ok((processed, stages)) => NormalizeResult::new(processed, stages),
        Err(e) => {
            warn!("{e}");
            NormalizeResult::failed(&e)
        }
    };

    output_result("Normalization completed", &result, cli_args)
}

/// Load both artifacts and report what they contain.
fn validate(args: ValidateArgs, cli_args: &SpamsiftArgs) -> Result<()> {
    let paths = args.artifacts.paths();
    if cli_args.verbosity() > 1 {
        println!("Validating {}", paths.vectorizer.display());
        println!("Validating {}", paths.model.display());
    }

    let classifier = SpamClassifier::load(&paths, args.pipeline.normalizer_config())?;

    output_result(
        "Artifacts are valid",
        &ValidationResult {
            vectorizer: paths.vectorizer.to_string_lossy().to_string(),
            model: paths.model.to_string_lossy().to_string(),
            estimator: classifier.model().estimator().name().to_string(),
            vocabulary_size: classifier.vectorizer().vocabulary_size(),
            reported_accuracy: classifier.reported_accuracy(),
            tokenizer: args.pipeline.tokenizer.to_string(),
        },
        cli_args,
    )
}
