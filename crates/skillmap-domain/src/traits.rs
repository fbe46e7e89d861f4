//! Trait definitions for the seams between crates
//!
//! Storage and matching are implemented in other crates; the engines only
//! see these interfaces.

use crate::{RunId, Snapshot};

/// Bulk load and save of the full snapshot at the batch boundary
///
/// Implemented by the infrastructure layer (skillmap-store)
pub trait SnapshotStore {
    /// Error type for store operations
    type Error;

    /// Read the full snapshot once
    fn load(&self) -> Result<Snapshot, Self::Error>;

    /// Write the full snapshot once
    fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

/// Decides whether a tool is genuinely referenced in a document
///
/// Implemented by skillmap-evidence. Implementations must be pure: the same
/// arguments always give the same answer.
pub trait MentionCheck {
    /// `true` if `text` carries evidence for `tool`
    fn mentioned(&self, tool: &str, text: &str) -> bool;

    /// Human-readable account of the decision, used in audit logs
    fn describe(&self, tool: &str, text: &str) -> String {
        if self.mentioned(tool, text) {
            "mentioned".to_string()
        } else {
            "not mentioned".to_string()
        }
    }
}

/// One step of the batch pipeline operating on the shared snapshot
///
/// Stages only append (assignment) or only remove (screening, pruning), so
/// re-applying a stage to its own output changes nothing.
pub trait Stage {
    /// Audit report produced by one application
    type Report;

    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Apply the stage to every course in the snapshot
    fn apply(&self, snapshot: &mut Snapshot, run: RunId) -> Self::Report;
}
