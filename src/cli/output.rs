//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::StageTrace;
use crate::cli::args::{OutputFormat, SpamsiftArgs};
use crate::error::{Result, SpamsiftError};
use crate::ml::Verdict;
use crate::normalizer::NormalizedText;
use crate::service::Analysis;

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub verdict: Option<Verdict>,
    pub label: Option<u8>,
    pub message: Option<String>,
    pub processed: String,
    pub warning: Option<String>,
    pub error: Option<String>,
}

impl From<&Analysis> for ClassifyResult {
    fn from(analysis: &Analysis) -> Self {
        let verdict = analysis.verdict();
        ClassifyResult {
            verdict,
            label: verdict.map(Verdict::label),
            message: verdict.map(|v| v.message().to_string()),
            processed: analysis.processed.to_string(),
            warning: analysis.warning().map(str::to_string),
            error: analysis.error().map(str::to_string),
        }
    }
}

/// Result structure for normalization.
#[derive(Debug, Serialize)]
pub struct NormalizeResult {
    pub processed: String,
    pub tokens: usize,
    pub stages: Option<Vec<StageTrace>>,
    pub error: Option<String>,
}

impl NormalizeResult {
    /// Wrap a successful normalization.
    pub fn new(processed: NormalizedText, stages: Option<Vec<StageTrace>>) -> Self {
        NormalizeResult {
            tokens: processed.tokens().count(),
            processed: processed.into_string(),
            stages,
            error: None,
        }
    }

    /// An empty result carrying the diagnostic of a failed normalization.
    pub fn failed(error: &SpamsiftError) -> Self {
        NormalizeResult {
            processed: String::new(),
            tokens: 0,
            stages: None,
            error: Some(error.to_string()),
        }
    }
}

/// Result structure for artifact validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    pub vectorizer: String,
    pub model: String,
    pub estimator: String,
    pub vocabulary_size: usize,
    pub reported_accuracy: Option<f64>,
    pub tokenizer: String,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SpamsiftArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SpamsiftArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("ClassifyResult") => {
            output_classify_result_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("NormalizeResult") => {
            output_normalize_result_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output a classification in human format.
fn output_classify_result_human(value: &serde_json::Value, args: &SpamsiftArgs) -> Result<()> {
    fn field<'a>(value: &'a serde_json::Value, name: &str) -> Option<&'a str> {
        value.get(name).and_then(|v| v.as_str())
    }

    if let Some(warning) = field(value, "warning") {
        println!("Warning: {warning}");
    }
    if let Some(error) = field(value, "error") {
        println!("Error: {error}");
    }
    if let Some(message) = field(value, "message") {
        println!("{message}");
        if args.verbosity() > 0 {
            println!("Processed text: {}", field(value, "processed").unwrap_or_default());
        }
    }
    Ok(())
}

/// Output a normalization in human format.
fn output_normalize_result_human(value: &serde_json::Value, _args: &SpamsiftArgs) -> Result<()> {
    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        println!("Error: {error}");
    }

    if let Some(stages) = value.get("stages").and_then(|s| s.as_array()) {
        for stage in stages {
            let name = stage.get("stage").and_then(|s| s.as_str()).unwrap_or("?");
            let tokens = stage
                .get("tokens")
                .map(format_value)
                .unwrap_or_default();
            println!("{name:>12}: {tokens}");
        }
        println!();
    }

    if let Some(processed) = value.get("processed").and_then(|p| p.as_str()) {
        println!("{processed}");
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &SpamsiftArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SpamsiftArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}
