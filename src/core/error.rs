//! Error handling for the client generation pipeline.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every variant is fatal to a run;
//! the binary maps any of them to exit code 1.
//!
//! # Examples
//!
//! ```
//! use fetch_client_gen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("API_ENDPOINT is not set"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pipeline operations
#[derive(Debug, Error)]
pub enum Error {
    /// A required external tool is not installed
    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure (DNS, connection, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with an unexpected status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Login failed or returned an unusable body
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The code generator could not be run or exited unsuccessfully
    #[error("Generator error: {0}")]
    Generator(String),

    /// Generated output is missing or in an unexpected state
    #[error("Output error: {0}")]
    Output(String),

    /// Source patching could not be applied
    #[error("Patch error: {0}")]
    Patch(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid patch pattern
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new output error
    pub fn output<S: Into<String>>(msg: S) -> Self {
        Self::Output(msg.into())
    }

    /// Create a new generator error
    pub fn generator<S: Into<String>>(msg: S) -> Self {
        Self::Generator(msg.into())
    }
}
