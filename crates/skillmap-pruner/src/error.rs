//! Error types for pruning rules

use thiserror::Error;

/// Errors that can occur while building a pruner
///
/// Applying rules never fails; only rule configuration can.
#[derive(Error, Debug)]
pub enum PrunerError {
    /// A rule names a target that is not a valid code or category
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
