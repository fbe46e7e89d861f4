//! Core Assigner implementation

use crate::config::{AssignerConfig, AssignmentRuleConfig};
use crate::error::AssignerError;
use crate::types::{AssignmentReport, Decision, Signal};
use regex::{Regex, RegexBuilder};
use skillmap_domain::{CourseProfile, CourseRecord, RunId, Snapshot, Stage, Tag, TagCode, Weight};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// A validated assignment rule with its name patterns compiled
#[derive(Debug, Clone)]
pub struct AssignmentRule {
    name: String,
    code: TagCode,
    strong_topics: BTreeSet<String>,
    name_pattern: Option<Regex>,
    tools: BTreeSet<String>,
    tool_count_threshold: usize,
    tool_weight_threshold: f64,
}

impl AssignmentRule {
    /// Compile a declarative rule
    pub fn compile(config: &AssignmentRuleConfig) -> Result<Self, AssignerError> {
        let code = TagCode::parse(config.code.trim()).ok_or_else(|| AssignerError::InvalidRule {
            rule: config.name.clone(),
            reason: format!("'{}' is not a tag code", config.code),
        })?;

        let name_pattern = if config.name_patterns.is_empty() {
            None
        } else {
            let joined = config
                .name_patterns
                .iter()
                .map(|p| format!("(?:{})", p))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&joined)
                .case_insensitive(true)
                .build()
                .map_err(|source| AssignerError::InvalidPattern {
                    rule: config.name.clone(),
                    source,
                })?;
            Some(regex)
        };

        Ok(Self {
            name: config.name.clone(),
            code,
            strong_topics: config.strong_topics.clone(),
            name_pattern,
            tools: config.tools.clone(),
            tool_count_threshold: config.tool_count_threshold,
            tool_weight_threshold: config.tool_weight_threshold,
        })
    }

    /// Rule name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Code this rule assigns
    pub fn code(&self) -> TagCode {
        self.code
    }

    /// Decide which tag, if any, the rule adds to a course
    ///
    /// Returns `None` when the code is already present or no signal holds.
    pub fn decide(&self, record: &CourseRecord, profile: &CourseProfile) -> Option<Decision> {
        if record.tags.contains_code(self.code) {
            return None;
        }

        let mut primary_signals = Vec::new();

        let strong: Vec<String> = profile
            .topics
            .iter()
            .filter(|t| self.strong_topics.contains(*t))
            .cloned()
            .collect();
        if !strong.is_empty() {
            primary_signals.push(Signal::StrongTopics(strong));
        }

        if let Some(m) = self.name_pattern.as_ref().and_then(|re| re.find(&record.name)) {
            primary_signals.push(Signal::NamePattern(m.as_str().to_string()));
        }

        let count = record.tools.count_in(&self.tools);
        let weight = record.tools.tool_weight();
        let tool_evidence = Signal::ToolEvidence { count, weight };
        if count >= self.tool_count_threshold && weight >= self.tool_weight_threshold {
            primary_signals.push(tool_evidence.clone());
        }

        let (tag_weight, signals) = if !primary_signals.is_empty() {
            (Weight::Primary, primary_signals)
        } else if count >= 1 {
            (Weight::Secondary, vec![tool_evidence])
        } else {
            return None;
        };

        Some(Decision {
            course_id: record.id,
            course_name: record.name.clone(),
            rule: self.name.clone(),
            tag: Tag::new(self.code, tag_weight),
            signals,
        })
    }
}

/// Derives new tags from signals already present in the snapshot
///
/// # Examples
///
/// ```
/// use skillmap_domain::{CourseId, CourseProfile, CourseRecord, RunId, Snapshot, Stage};
/// use skillmap_assigner::Assigner;
///
/// let record = CourseRecord::new(CourseId::new(1), "Vibe Coding for PMs");
/// let mut snapshot = Snapshot::from_parts(vec![record], Vec::<CourseProfile>::new());
///
/// let assigner = Assigner::builtin().unwrap();
/// let report = assigner.apply(&mut snapshot, RunId::new());
///
/// assert_eq!(report.total_added(), 1);
/// assert_eq!(snapshot.records()[0].tags.as_slice()[0].to_string(), "A5@0.8");
/// ```
#[derive(Debug, Clone)]
pub struct Assigner {
    rules: Vec<AssignmentRule>,
    dry_run: bool,
}

impl Assigner {
    /// Validate and compile a configuration
    pub fn new(config: &AssignerConfig) -> Result<Self, AssignerError> {
        config.validate()?;
        let rules = config
            .rules
            .iter()
            .map(AssignmentRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            dry_run: config.dry_run,
        })
    }

    /// Assigner with the default rule
    pub fn builtin() -> Result<Self, AssignerError> {
        Self::new(&AssignerConfig::default())
    }

    /// Compiled rules
    pub fn rules(&self) -> &[AssignmentRule] {
        &self.rules
    }

    /// Switch dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Stage for Assigner {
    type Report = AssignmentReport;

    fn name(&self) -> &'static str {
        "assign"
    }

    fn apply(&self, snapshot: &mut Snapshot, run: RunId) -> AssignmentReport {
        let mut report = AssignmentReport::new(run, self.dry_run);

        snapshot.for_each_course(|record, profile| {
            report.courses_checked += 1;

            for rule in &self.rules {
                if record.tags.contains_code(rule.code) {
                    report.skipped_existing += 1;
                    continue;
                }
                let Some(decision) = rule.decide(record, profile) else {
                    continue;
                };

                debug!(
                    course = %record.id,
                    tag = %decision.tag,
                    signals = %decision.signals_label(),
                    "Assigning tag"
                );
                if !self.dry_run {
                    record.tags.insert_if_absent(decision.tag);
                }
                report.decisions.push(decision);
            }
        });

        info!(
            run = %run,
            checked = report.courses_checked,
            primary = report.at_weight(Weight::Primary).len(),
            secondary = report.at_weight(Weight::Secondary).len(),
            dry_run = self.dry_run,
            "Assignment complete"
        );

        report
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use skillmap_domain::{CourseId, ToolAssignment};

    const TOOLS: &[&str] = &["Cursor", "Lovable", "Bolt", "v0", "Replit", "Figma", "Notion"];
    const TOPICS: &[&str] = &["Prototyping", "Coding with AI", "Growth", "Design"];

    proptest! {
        /// Property: assigning twice leaves the same tag set as assigning once
        #[test]
        fn test_assignment_idempotent(
            name in "[A-Za-z &]{0,30}",
            tools in prop::sample::subsequence(TOOLS.to_vec(), 0..TOOLS.len()),
            topics in prop::sample::subsequence(TOPICS.to_vec(), 0..TOPICS.len()),
            primary_weight in any::<bool>(),
        ) {
            let mut record = CourseRecord::new(CourseId::new(1), name);
            let weight = if primary_weight { 0.8 } else { 0.3 };
            record.tools = ToolAssignment::new(tools.iter().map(|t| t.to_string()).collect(), weight);
            let mut profile = CourseProfile::empty(CourseId::new(1));
            profile.topics = topics.iter().map(|t| t.to_string()).collect();
            let mut snapshot = Snapshot::from_parts(vec![record], vec![profile]);
            let assigner = Assigner::builtin().unwrap();

            assigner.apply(&mut snapshot, RunId::new());
            let once = snapshot.clone();
            let second = assigner.apply(&mut snapshot, RunId::new());

            prop_assert_eq!(second.total_added(), 0);
            prop_assert_eq!(snapshot, once);
        }
    }
}
