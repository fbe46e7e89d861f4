//! Evidence error types

use thiserror::Error;

/// Errors raised while building a tool catalog
///
/// Matching itself never fails; only catalog construction can.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// A strategy pattern could not be compiled
    #[error("Pattern error for tool '{tool}': {source}")]
    Pattern {
        /// Tool whose strategy failed
        tool: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Catalog configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog TOML could not be parsed or written
    #[error("TOML error: {0}")]
    Toml(String),
}
