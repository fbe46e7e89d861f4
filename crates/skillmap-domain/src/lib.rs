//! Skillmap Domain Layer
//!
//! Core model for labelling courses against a skill taxonomy and a tool
//! catalog. Defines the value objects every engine shares and the trait
//! interfaces that infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Course**: identifier, name, topic set and free-text profile
//! - **Tag**: a (code, weight) pair, weight being primary (0.8) or secondary (0.3)
//! - **ToolAssignment**: catalog tools detected for a course plus a tool weight
//! - **Taxonomy**: lookup of valid codes
//! - **Tier**: how much disambiguation a tool name requires
//! - **Snapshot**: the in-memory store a batch run mutates
//!
//! ## Architecture
//!
//! - Only one external dependency (uuid, for run identifiers)
//! - Pure value types, no I/O
//! - Trait definitions for storage, matching and pipeline stages

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod course;
pub mod run;
pub mod snapshot;
pub mod tag;
pub mod taxonomy;
pub mod tier;
pub mod tool;
pub mod traits;

// Re-exports for convenience
pub use course::{CourseId, CourseProfile, CourseRecord};
pub use run::RunId;
pub use snapshot::Snapshot;
pub use tag::{Tag, TagCode, TagSet, Weight};
pub use taxonomy::{Taxonomy, TaxonomyEntry};
pub use tier::Tier;
pub use tool::ToolAssignment;
pub use traits::{MentionCheck, SnapshotStore, Stage};
