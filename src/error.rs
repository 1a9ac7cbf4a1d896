//! Error types for the Spamsift library.
//!
//! All errors are represented by the [`SpamsiftError`] enum. Its first three
//! variants mirror the three places a submission can fail: loading the
//! artifacts at startup, normalizing the message, and classifying it.
//!
//! # Examples
//!
//! ```
//! use spamsift::error::{SpamsiftError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpamsiftError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Spamsift operations.
#[derive(Error, Debug)]
pub enum SpamsiftError {
    /// Required artifacts or linguistic data could not be loaded at startup.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// Fault while tokenizing, filtering or stemming a message.
    #[error("Text processing error: {0}")]
    Normalization(String),

    /// Fault while vectorizing or classifying a normalized message.
    #[error("Analysis failed: {0}")]
    Classification(String),

    /// Invalid argument passed by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary artifact serialization/deserialization errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpamsiftError.
pub type Result<T> = std::result::Result<T, SpamsiftError>;

impl SpamsiftError {
    /// Create a new initialization error.
    pub fn initialization<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Initialization(msg.into())
    }

    /// Create a new normalization error.
    pub fn normalization<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Normalization(msg.into())
    }

    /// Create a new classification error.
    pub fn classification<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::Classification(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpamsiftError::InvalidArgument(msg.into())
    }

    /// Whether this error must stop the process before serving.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SpamsiftError::Initialization(_))
    }
}
