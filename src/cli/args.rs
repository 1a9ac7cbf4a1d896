//! Command line argument parsing for the Spamsift CLI using clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::normalizer::NormalizerConfig;
use crate::service::{ArtifactPaths, EmptyPolicy};

/// Spamsift - classify messages as spam or not spam
#[derive(Parser, Debug, Clone)]
#[command(name = "spamsift")]
#[command(about = "Classify messages as spam or not spam with a pre-trained model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpamsiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpamsiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the web form and JSON API
    Serve(ServeArgs),

    /// Classify one message
    Classify(ClassifyArgs),

    /// Print the normalized form of a message
    Normalize(NormalizeArgs),

    /// Load and check the model artifacts
    Validate(ValidateArgs),
}

/// Locations of the model artifacts
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Vectorizer artifact (.json, .bin or .bincode)
    #[arg(long, env = "SPAMSIFT_VECTORIZER", default_value = "vectorizer.json")]
    pub vectorizer: PathBuf,

    /// Model artifact (.json, .bin or .bincode)
    #[arg(long, env = "SPAMSIFT_MODEL", default_value = "model.json")]
    pub model: PathBuf,
}

impl ArtifactArgs {
    /// Convert into library artifact paths.
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            vectorizer: self.vectorizer.clone(),
            model: self.model.clone(),
        }
    }
}

/// Normalization pipeline settings
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Word tokenizer (treebank or unicode-word)
    #[arg(long, env = "SPAMSIFT_TOKENIZER", default_value = "treebank")]
    pub tokenizer: TokenizerKind,
}

impl PipelineArgs {
    /// Convert into a normalizer configuration.
    pub fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            tokenizer: self.tokenizer,
        }
    }
}

/// Arguments for serving the web form
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Treatment of messages that normalize to nothing (classify or reject)
    #[arg(long, env = "SPAMSIFT_EMPTY_POLICY", default_value = "classify")]
    pub empty_policy: EmptyPolicy,

    /// Address to listen on
    #[arg(long, env = "SPAMSIFT_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,
}

/// Arguments for classifying a message
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Message to classify (read from stdin when omitted)
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Treatment of messages that normalize to nothing (classify or reject)
    #[arg(long, env = "SPAMSIFT_EMPTY_POLICY", default_value = "classify")]
    pub empty_policy: EmptyPolicy,
}

/// Arguments for normalizing a message
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Message to normalize (read from stdin when omitted)
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Show the tokens after every pipeline stage
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for validating artifacts
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
