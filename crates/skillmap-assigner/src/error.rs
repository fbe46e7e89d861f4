//! Error types for the Assigner

use thiserror::Error;

/// Errors that can occur while building an assigner
#[derive(Error, Debug)]
pub enum AssignerError {
    /// A course-name pattern does not compile
    #[error("Invalid name pattern in rule '{rule}': {source}")]
    InvalidPattern {
        /// Rule name
        rule: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A rule targets something that is not a tag code
    #[error("Invalid rule '{rule}': {reason}")]
    InvalidRule {
        /// Rule name
        rule: String,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML could not be parsed or written
    #[error("TOML error: {0}")]
    Toml(String),
}
