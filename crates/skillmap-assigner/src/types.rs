//! Audit types for assignment runs

use skillmap_domain::{CourseId, RunId, Tag, Weight};
use std::fmt;

/// A signal that held when a tag was assigned
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Course topics that belong to the strong-topic set
    StrongTopics(Vec<String>),

    /// Text of the course name matched by a name pattern
    NamePattern(String),

    /// Matching catalog tools and the course tool weight
    ToolEvidence {
        /// Number of matching tools
        count: usize,
        /// Course-level tool weight
        weight: f64,
    },
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::StrongTopics(topics) => write!(f, "topics={{{}}}", topics.join(", ")),
            Signal::NamePattern(text) => write!(f, "name matches '{}'", text),
            Signal::ToolEvidence { count, weight } => {
                write!(f, "tools={} tool_weight={}", count, weight)
            }
        }
    }
}

/// One tag added to one course
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Course identifier
    pub course_id: CourseId,

    /// Course name
    pub course_name: String,

    /// Rule that made the decision
    pub rule: String,

    /// Tag added
    pub tag: Tag,

    /// Every signal that held
    pub signals: Vec<Signal>,
}

impl Decision {
    /// Signals joined for display
    pub fn signals_label(&self) -> String {
        self.signals
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Audit of one assignment pass
#[derive(Debug, Clone)]
pub struct AssignmentReport {
    /// Run this pass belonged to
    pub run: RunId,

    /// Whether the snapshot was left untouched
    pub dry_run: bool,

    /// Courses evaluated
    pub courses_checked: usize,

    /// (course, rule) pairs skipped because the code was already present
    pub skipped_existing: usize,

    /// Every tag added, in evaluation order
    pub decisions: Vec<Decision>,
}

impl AssignmentReport {
    /// Create an empty report
    pub fn new(run: RunId, dry_run: bool) -> Self {
        Self {
            run,
            dry_run,
            courses_checked: 0,
            skipped_existing: 0,
            decisions: Vec::new(),
        }
    }

    /// Decisions at the given weight
    pub fn at_weight(&self, weight: Weight) -> Vec<&Decision> {
        self.decisions.iter().filter(|d| d.tag.weight == weight).collect()
    }

    /// Number of tags added
    pub fn total_added(&self) -> usize {
        self.decisions.len()
    }

    /// Plain-text audit listing
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Assignment Summary".to_string(),
            "==================".to_string(),
            format!("Run: {}", self.run),
            format!("Courses checked: {}", self.courses_checked),
            format!("Already tagged: {}", self.skipped_existing),
        ];
        if self.dry_run {
            lines.push("DRY RUN: nothing was changed".to_string());
        }

        for (label, weight) in [("Primary", Weight::Primary), ("Secondary", Weight::Secondary)] {
            let decisions = self.at_weight(weight);
            lines.push(String::new());
            lines.push(format!("=== {} assignments ({}) ===", label, weight));
            for d in &decisions {
                lines.push(format!(
                    "  [{}] {}  {}",
                    d.course_id,
                    d.course_name,
                    d.signals_label()
                ));
            }
            lines.push(format!("Total {}: {}", label.to_lowercase(), decisions.len()));
        }

        lines.push(String::new());
        lines.push(format!("Total assignments: {}", self.total_added()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillmap_domain::TagCode;

    fn decision(weight: Weight, signals: Vec<Signal>) -> Decision {
        Decision {
            course_id: CourseId::new(3),
            course_name: "Ship It".to_string(),
            rule: "prototyping".to_string(),
            tag: Tag::new(TagCode::parse("A5").unwrap(), weight),
            signals,
        }
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(
            Signal::StrongTopics(vec!["Prototyping".to_string()]).to_string(),
            "topics={Prototyping}"
        );
        assert_eq!(
            Signal::ToolEvidence { count: 2, weight: 0.3 }.to_string(),
            "tools=2 tool_weight=0.3"
        );
    }

    #[test]
    fn test_report_split_by_weight() {
        let mut report = AssignmentReport::new(RunId::new(), false);
        report.decisions.push(decision(
            Weight::Primary,
            vec![
                Signal::NamePattern("Prototype".to_string()),
                Signal::ToolEvidence { count: 3, weight: 0.8 },
            ],
        ));
        report.decisions.push(decision(
            Weight::Secondary,
            vec![Signal::ToolEvidence { count: 1, weight: 0.3 }],
        ));

        assert_eq!(report.at_weight(Weight::Primary).len(), 1);
        assert_eq!(report.total_added(), 2);

        let summary = report.summary();
        assert!(summary.contains("name matches 'Prototype'; tools=3 tool_weight=0.8"));
        assert!(summary.contains("Total secondary: 1"));
    }
}
