//! Removal log for pruning runs

use skillmap_domain::{CourseId, RunId, Tag};
use std::collections::BTreeMap;

/// One tag removed (or, in dry-run mode, that would be removed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRemoval {
    /// Course the tag belonged to
    pub course_id: CourseId,

    /// Course name
    pub course_name: String,

    /// Removed tag
    pub tag: Tag,

    /// Rule that removed it
    pub rule: String,

    /// Signal that failed to justify the tag
    pub signal: String,
}

/// Removal log collected during one pruning pass
///
/// Tracks removals per (code, weight) and how many tags each rule kept.
#[derive(Debug, Clone)]
pub struct PruneReport {
    /// Run this pass belonged to
    pub run: RunId,

    /// Whether the snapshot was left untouched
    pub dry_run: bool,

    /// Courses evaluated
    pub courses_checked: usize,

    /// Courses that lost at least one tag
    pub courses_modified: usize,

    /// Every removal in evaluation order
    pub removals: Vec<TagRemoval>,

    /// Tags examined and kept, per rule name
    pub kept: BTreeMap<String, usize>,
}

impl PruneReport {
    /// Create an empty report
    pub fn new(run: RunId, dry_run: bool) -> Self {
        Self {
            run,
            dry_run,
            courses_checked: 0,
            courses_modified: 0,
            removals: Vec::new(),
            kept: BTreeMap::new(),
        }
    }

    /// Record a removal
    pub fn record_removal(&mut self, removal: TagRemoval) {
        self.removals.push(removal);
    }

    /// Record tags a rule kept
    pub fn record_kept(&mut self, rule: &str, count: usize) {
        if count > 0 {
            *self.kept.entry(rule.to_string()).or_insert(0) += count;
        }
    }

    /// Total removals across all rules
    pub fn total_removed(&self) -> usize {
        self.removals.len()
    }

    /// Total tags kept across all rules
    pub fn total_kept(&self) -> usize {
        self.kept.values().sum()
    }

    /// Removals grouped by (code, weight), ordered by code then weight
    pub fn by_tag(&self) -> BTreeMap<Tag, Vec<&TagRemoval>> {
        let mut grouped: BTreeMap<Tag, Vec<&TagRemoval>> = BTreeMap::new();
        for removal in &self.removals {
            grouped.entry(removal.tag).or_default().push(removal);
        }
        grouped
    }

    /// Generate the human-readable removal log
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Prune Summary".to_string(),
            "=============".to_string(),
            format!("Run: {}", self.run),
            format!("Courses checked: {}", self.courses_checked),
            format!("Courses modified: {}", self.courses_modified),
            format!("Total removals: {}", self.total_removed()),
        ];
        if self.dry_run {
            lines.push("DRY RUN: nothing was changed".to_string());
        }

        for (tag, removals) in self.by_tag() {
            lines.push(String::new());
            lines.push(format!("--- {}: {} removals ---", tag, removals.len()));
            for removal in removals {
                lines.push(format!(
                    "  {}: {} | {}",
                    removal.course_id, removal.course_name, removal.signal
                ));
            }
        }

        lines.join("\n")
    }
}
