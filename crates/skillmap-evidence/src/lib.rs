//! Skillmap Evidence
//!
//! Decides whether a course profile genuinely references a tool.
//!
//! Tool names fall into three tiers:
//! - **Unambiguous** names are matched as case-insensitive substrings
//! - **Ambiguous** names are interpreted through a [`MatchStrategy`] with
//!   word boundaries, exclusion phrases, context windows, version-string
//!   filtering, domain suffixes and companion phrases
//! - Any other name falls back to the substring rule
//!
//! The [`ToolScreen`] stage applies the validator to every tool assignment
//! in a snapshot and removes the unsupported ones.
//!
//! # Examples
//!
//! ```
//! use skillmap_evidence::EvidenceValidator;
//!
//! let validator = EvidenceValidator::builtin().unwrap();
//!
//! assert!(!validator.mentioned("Cursor", "Move the Cursor position with the arrow keys."));
//! assert!(validator.mentioned("Cursor", "Then open Cursor and start coding."));
//! ```

#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod screen;
mod validator;

pub use catalog::{CompiledStrategy, ToolCatalog};
pub use config::{CatalogConfig, ContextSide, MatchStrategy, DEFAULT_WINDOW};
pub use error::EvidenceError;
pub use screen::{CourseScreening, ScreenReport, ToolRemoval, ToolScreen};
pub use validator::{EvidenceValidator, MatchReason, Verdict};
