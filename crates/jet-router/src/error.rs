//! Error types for jet-router

use thiserror::Error;

/// Result type alias for router construction
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors raised while compiling a route mapping
#[derive(Debug, Error)]
pub enum Error {
    /// Verb-map key outside the supported vocabulary
    #[error("{0}: unknown request method")]
    UnknownMethod(String),

    /// Malformed path pattern
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Same parameter name used twice in one pattern
    #[error("Duplicate parameter {name:?} in pattern {pattern:?}")]
    DuplicateParam { pattern: String, name: String },

    /// Synthesized expression rejected by the regex engine
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
