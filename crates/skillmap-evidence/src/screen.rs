//! Tool screening stage
//!
//! Re-checks every assigned tool against the course profile text and drops
//! the ones the text does not support. Screening only ever removes.

use crate::EvidenceValidator;
use skillmap_domain::{CourseId, MentionCheck, RunId, Snapshot, Stage};
use std::collections::BTreeMap;

/// One tool dropped from one course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRemoval {
    /// Course the tool was removed from
    pub course_id: CourseId,

    /// Course name at the time of removal
    pub course_name: String,

    /// Removed tool name
    pub tool: String,

    /// Why the text did not support it
    pub reason: String,
}

/// Per-course outcome for a course that lost at least one tool
#[derive(Debug, Clone, PartialEq)]
pub struct CourseScreening {
    /// Course identifier
    pub course_id: CourseId,

    /// Course name
    pub course_name: String,

    /// Tools before screening
    pub before: Vec<String>,

    /// Tools after screening
    pub after: Vec<String>,

    /// Tool weight after screening
    pub tool_weight: f64,
}

/// Audit of one screening pass
#[derive(Debug, Clone)]
pub struct ScreenReport {
    /// Run this pass belonged to
    pub run: RunId,

    /// Courses with at least one assigned tool
    pub courses_checked: usize,

    /// Courses that lost tools
    pub courses_modified: Vec<CourseScreening>,

    /// Every removal in snapshot order
    pub removals: Vec<ToolRemoval>,

    /// Courses screened against an empty default profile
    pub missing_profiles: Vec<CourseId>,
}

impl ScreenReport {
    fn new(run: RunId) -> Self {
        Self {
            run,
            courses_checked: 0,
            courses_modified: Vec::new(),
            removals: Vec::new(),
            missing_profiles: Vec::new(),
        }
    }

    /// Number of tools removed across all courses
    pub fn total_removed(&self) -> usize {
        self.removals.len()
    }

    /// Removals grouped by tool name
    pub fn by_tool(&self) -> BTreeMap<&str, Vec<&ToolRemoval>> {
        let mut grouped: BTreeMap<&str, Vec<&ToolRemoval>> = BTreeMap::new();
        for removal in &self.removals {
            grouped.entry(removal.tool.as_str()).or_default().push(removal);
        }
        grouped
    }

    /// Removal count per tool, most frequent first, ties by name
    pub fn removal_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .by_tool()
            .into_iter()
            .map(|(tool, removals)| (tool, removals.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        counts
    }

    /// Plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Tool Screening Summary".to_string(),
            "======================".to_string(),
            format!("Run: {}", self.run),
            format!("Courses with tools: {}", self.courses_checked),
            format!("Courses modified: {}", self.courses_modified.len()),
            format!("Tools removed: {}", self.total_removed()),
        ];

        if !self.removals.is_empty() {
            lines.push(String::new());
            lines.push("Removals by tool:".to_string());
            for (tool, count) in self.removal_counts() {
                lines.push(format!("  {}: {}", tool, count));
            }
        }

        if !self.missing_profiles.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Courses without profile: {}",
                self.missing_profiles.len()
            ));
        }

        lines.join("\n")
    }
}

/// Pipeline stage that removes unsupported tool assignments
#[derive(Debug, Clone)]
pub struct ToolScreen<M: MentionCheck = EvidenceValidator> {
    check: M,
}

impl<M: MentionCheck> ToolScreen<M> {
    /// Create a screen around a mention check
    pub fn new(check: M) -> Self {
        Self { check }
    }

    /// The mention check in use
    pub fn check(&self) -> &M {
        &self.check
    }
}

impl<M: MentionCheck> Stage for ToolScreen<M> {
    type Report = ScreenReport;

    fn name(&self) -> &'static str {
        "validate-tools"
    }

    fn apply(&self, snapshot: &mut Snapshot, run: RunId) -> ScreenReport {
        let mut report = ScreenReport::new(run);
        report.missing_profiles = snapshot
            .records()
            .iter()
            .filter(|r| !r.tools.is_empty() && !snapshot.has_profile(r.id))
            .map(|r| r.id)
            .collect();

        for id in &report.missing_profiles {
            tracing::warn!(course = %id, "No profile for course, screening against empty text");
        }

        snapshot.for_each_course(|record, profile| {
            if record.tools.is_empty() {
                return;
            }
            report.courses_checked += 1;

            let before = record.tools.tools().to_vec();
            let mut reasons = Vec::new();
            let removed = record.tools.retain(|tool| {
                if self.check.mentioned(tool, &profile.text) {
                    true
                } else {
                    reasons.push(self.check.describe(tool, &profile.text));
                    false
                }
            });

            if removed.is_empty() {
                return;
            }

            tracing::debug!(
                course = %record.id,
                removed = ?removed,
                "Removed unsupported tools"
            );

            for (tool, reason) in removed.into_iter().zip(reasons) {
                report.removals.push(ToolRemoval {
                    course_id: record.id,
                    course_name: record.name.clone(),
                    tool,
                    reason,
                });
            }
            report.courses_modified.push(CourseScreening {
                course_id: record.id,
                course_name: record.name.clone(),
                before,
                after: record.tools.tools().to_vec(),
                tool_weight: record.tools.tool_weight(),
            });
        });

        tracing::info!(
            run = %run,
            checked = report.courses_checked,
            modified = report.courses_modified.len(),
            removed = report.total_removed(),
            "Tool screening complete"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillmap_domain::{CourseProfile, CourseRecord, ToolAssignment};

    fn course(id: u64, tools: &[&str], text: &str) -> (CourseRecord, CourseProfile) {
        let mut record = CourseRecord::new(CourseId::new(id), format!("Course {}", id));
        record.tools = ToolAssignment::new(tools.iter().map(|t| t.to_string()).collect(), 0.8);
        let mut profile = CourseProfile::empty(CourseId::new(id));
        profile.text = text.to_string();
        (record, profile)
    }

    fn screen() -> ToolScreen {
        ToolScreen::new(EvidenceValidator::builtin().unwrap())
    }

    #[test]
    fn test_unsupported_tool_removed() {
        let (record, profile) = course(
            42,
            &["Cursor", "Figma"],
            "Move the Cursor position with the arrow keys. Design in Figma.",
        );
        let mut snapshot = Snapshot::from_parts(vec![record], vec![profile]);

        let report = screen().apply(&mut snapshot, RunId::new());

        let record = snapshot.record(CourseId::new(42)).unwrap();
        assert_eq!(record.tools.tools(), &["Figma".to_string()]);
        assert_eq!(record.tools.tool_weight(), 0.8);
        assert_eq!(report.total_removed(), 1);
        assert_eq!(report.removals[0].tool, "Cursor");
        assert_eq!(report.removals[0].reason, "only inside excluded phrases");
    }

    #[test]
    fn test_last_tool_removed_zeroes_weight() {
        let (record, profile) = course(1, &["Devin"], "Devin will host the Friday session.");
        let mut snapshot = Snapshot::from_parts(vec![record], vec![profile]);

        let report = screen().apply(&mut snapshot, RunId::new());

        let record = snapshot.record(CourseId::new(1)).unwrap();
        assert!(record.tools.is_empty());
        assert_eq!(record.tools.tool_weight(), 0.0);
        assert_eq!(report.courses_modified[0].tool_weight, 0.0);
    }

    #[test]
    fn test_missing_profile_screens_against_empty_text() {
        let (record, _) = course(7, &["Figma"], "");
        let mut snapshot = Snapshot::from_parts(vec![record], Vec::new());

        let report = screen().apply(&mut snapshot, RunId::new());

        assert_eq!(report.missing_profiles, vec![CourseId::new(7)]);
        assert!(snapshot.record(CourseId::new(7)).unwrap().tools.is_empty());
        assert_eq!(report.removals[0].reason, "empty text");
    }

    #[test]
    fn test_courses_without_tools_are_skipped() {
        let (record, profile) = course(3, &[], "Cursor everywhere");
        let mut snapshot = Snapshot::from_parts(vec![record], vec![profile]);

        let report = screen().apply(&mut snapshot, RunId::new());

        assert_eq!(report.courses_checked, 0);
        assert!(report.courses_modified.is_empty());
    }

    #[test]
    fn test_screening_twice_changes_nothing() {
        let (a, pa) = course(1, &["Cursor", "v0", "Replit"], "Build with v0.2 in Replit");
        let (b, pb) = course(2, &["Claude", "Bolt"], "Use Claude Code; bolt on extras");
        let mut snapshot = Snapshot::from_parts(vec![a, b], vec![pa, pb]);
        let stage = screen();

        stage.apply(&mut snapshot, RunId::new());
        let after_first = snapshot.clone();
        let second = stage.apply(&mut snapshot, RunId::new());

        assert_eq!(second.total_removed(), 0);
        assert_eq!(snapshot, after_first);
    }

    #[test]
    fn test_removal_counts_sorted() {
        let (a, pa) = course(1, &["Cursor", "Devin"], "nothing relevant");
        let (b, pb) = course(2, &["Cursor"], "nothing relevant");
        let mut snapshot = Snapshot::from_parts(vec![a, b], vec![pa, pb]);

        let report = screen().apply(&mut snapshot, RunId::new());

        assert_eq!(report.removal_counts(), vec![("Cursor", 2), ("Devin", 1)]);
        assert!(report.summary().contains("Tools removed: 3"));
    }
}
