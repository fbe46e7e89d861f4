//! Error types for the CLI application.

use skillmap_assigner::AssignerError;
use skillmap_evidence::EvidenceError;
use skillmap_pruner::PrunerError;
use skillmap_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Everything here happens at the batch boundary; per-course evaluation
/// cannot fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error (file I/O, JSON, taxonomy file)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Tool catalog could not be built
    #[error("Catalog error: {0}")]
    Evidence(#[from] EvidenceError),

    /// Prune rules could not be built
    #[error("Prune rule error: {0}")]
    Pruner(#[from] PrunerError),

    /// Assignment rules could not be built
    #[error("Assignment rule error: {0}")]
    Assigner(#[from] AssignerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
