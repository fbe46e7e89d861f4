//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::pipeline::BatchReport;
use colored::*;
use serde_json::{json, Value};
use skillmap_assigner::AssignmentReport;
use skillmap_domain::{Taxonomy, Tier};
use skillmap_evidence::{ScreenReport, Verdict};
use skillmap_pruner::PruneReport;
use skillmap_store::LoadReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the reports of one batch.
    pub fn format_batch(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&batch_json(report))?),
            OutputFormat::Table => Ok(self.format_batch_table(report)),
            OutputFormat::Quiet => Ok(format_batch_quiet(report)),
        }
    }

    fn format_batch_table(&self, report: &BatchReport) -> String {
        let mut sections = Vec::new();

        let mode = if report.dry_run { " (dry run)" } else { "" };
        sections.push(self.colorize(&format!("Run {}{}", report.run, mode), "cyan"));
        sections.push(report.load.summary());
        if !report.load.is_clean() {
            sections.push(self.warning(&format!(
                "{} entries discarded at load, {} course(s) without profile",
                report.load.total_discarded(),
                report.load.missing_profiles.len()
            )));
        }

        if let Some(assignment) = &report.assignment {
            sections.push(self.heading("Assigned tags"));
            sections.push(self.assignment_table(assignment));
        }
        if let Some(screening) = &report.screening {
            sections.push(self.heading("Removed tools"));
            sections.push(self.screening_table(screening));
        }
        if let Some(pruning) = &report.pruning {
            sections.push(self.heading("Removed tags"));
            sections.push(self.pruning_table(pruning));
        }

        sections.join("\n\n")
    }

    fn assignment_table(&self, report: &AssignmentReport) -> String {
        if report.decisions.is_empty() {
            return self.colorize("No tags assigned.", "yellow");
        }

        let mut decisions: Vec<_> = report.decisions.iter().collect();
        decisions.sort_by(|a, b| a.tag.cmp(&b.tag).then(a.course_id.cmp(&b.course_id)));

        let mut builder = Builder::default();
        builder.push_record(["Tag", "Course ID", "Course", "Rule", "Signals"]);
        for decision in decisions {
            builder.push_record([
                decision.tag.to_string(),
                decision.course_id.to_string(),
                decision.course_name.clone(),
                decision.rule.clone(),
                decision.signals_label(),
            ]);
        }
        render(builder)
    }

    fn screening_table(&self, report: &ScreenReport) -> String {
        if report.removals.is_empty() {
            return self.colorize("No tools removed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Tool", "Course ID", "Course", "Reason"]);
        for (tool, removals) in report.by_tool() {
            for removal in removals {
                builder.push_record([
                    tool.to_string(),
                    removal.course_id.to_string(),
                    removal.course_name.clone(),
                    removal.reason.clone(),
                ]);
            }
        }
        render(builder)
    }

    fn pruning_table(&self, report: &PruneReport) -> String {
        if report.removals.is_empty() {
            return self.colorize("No tags removed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Tag", "Course ID", "Course", "Rule", "Unmet condition"]);
        for (tag, removals) in report.by_tag() {
            for removal in removals {
                builder.push_record([
                    tag.to_string(),
                    removal.course_id.to_string(),
                    removal.course_name.clone(),
                    removal.rule.clone(),
                    removal.signal.clone(),
                ]);
            }
        }
        render(builder)
    }

    /// Format a single validator verdict.
    pub fn format_verdict(&self, tool: &str, verdict: &Verdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "tool": tool,
                "tier": verdict.tier.as_str(),
                "mentioned": verdict.mentioned,
                "reason": verdict.reason.to_string(),
            }))?),
            OutputFormat::Quiet => Ok(verdict.mentioned.to_string()),
            OutputFormat::Table => {
                let message = format!("{} ({}): {}", tool, verdict.tier.as_str(), verdict.reason);
                Ok(if verdict.mentioned {
                    self.success(&message)
                } else {
                    self.error(&message)
                })
            }
        }
    }

    /// Format catalog entries.
    pub fn format_catalog(&self, entries: &[(&str, Tier)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = entries
                    .iter()
                    .map(|(name, tier)| json!({ "tool": name, "tier": tier.as_str() }))
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|(name, _)| name.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No tools found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Tool", "Tier"]);
                for (name, tier) in entries {
                    builder.push_record([*name, tier.as_str()]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a parsed taxonomy.
    pub fn format_taxonomy(&self, taxonomy: &Taxonomy) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<Value> = taxonomy
                    .iter()
                    .map(|entry| {
                        json!({
                            "skill_code": entry.code.to_string(),
                            "skill_name": entry.name,
                            "category": entry.category,
                            "example_topics": entry.example_topics.len(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(taxonomy.len().to_string()),
            OutputFormat::Table => {
                if taxonomy.is_empty() {
                    return Ok(self.colorize("No skills found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Code", "Skill", "Category", "Topics"]);
                for entry in taxonomy.iter() {
                    builder.push_record([
                        entry.code.to_string(),
                        entry.name.clone(),
                        entry.category.clone(),
                        entry.example_topics.len().to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, title: &str) -> String {
        if self.color_enabled {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn format_batch_quiet(report: &BatchReport) -> String {
    let mut lines = Vec::new();
    if let Some(assignment) = &report.assignment {
        lines.push(format!("assigned {}", assignment.total_added()));
    }
    if let Some(screening) = &report.screening {
        lines.push(format!("tools_removed {}", screening.total_removed()));
    }
    if let Some(pruning) = &report.pruning {
        lines.push(format!("tags_removed {}", pruning.total_removed()));
    }
    lines.join("\n")
}

fn load_json(report: &LoadReport) -> Value {
    json!({
        "mappings_read": report.mappings_read,
        "profiles_read": report.profiles_read,
        "discarded_codes": report
            .discarded_codes
            .iter()
            .map(|(id, code)| json!({ "course_id": id.value(), "code": code }))
            .collect::<Vec<_>>(),
        "discarded_weights": report
            .discarded_weights
            .iter()
            .map(|(id, code, weight)| json!({ "course_id": id.value(), "code": code, "weight": weight }))
            .collect::<Vec<_>>(),
        "duplicate_codes": report
            .duplicate_codes
            .iter()
            .map(|(id, code)| json!({ "course_id": id.value(), "code": code.to_string() }))
            .collect::<Vec<_>>(),
        "duplicate_courses": report.duplicate_courses.iter().map(|id| id.value()).collect::<Vec<_>>(),
        "missing_profiles": report.missing_profiles.iter().map(|id| id.value()).collect::<Vec<_>>(),
    })
}

fn assignment_json(report: &AssignmentReport) -> Value {
    json!({
        "courses_checked": report.courses_checked,
        "skipped_existing": report.skipped_existing,
        "added": report
            .decisions
            .iter()
            .map(|d| {
                json!({
                    "course_id": d.course_id.value(),
                    "course_name": d.course_name,
                    "rule": d.rule,
                    "code": d.tag.code.to_string(),
                    "weight": d.tag.weight.value(),
                    "signals": d.signals.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn screening_json(report: &ScreenReport) -> Value {
    json!({
        "courses_checked": report.courses_checked,
        "courses_modified": report.courses_modified.len(),
        "removed": report
            .removals
            .iter()
            .map(|r| {
                json!({
                    "course_id": r.course_id.value(),
                    "course_name": r.course_name,
                    "tool": r.tool,
                    "reason": r.reason,
                })
            })
            .collect::<Vec<_>>(),
        "by_tool": report
            .removal_counts()
            .into_iter()
            .map(|(tool, count)| json!({ "tool": tool, "count": count }))
            .collect::<Vec<_>>(),
    })
}

fn pruning_json(report: &PruneReport) -> Value {
    json!({
        "courses_checked": report.courses_checked,
        "courses_modified": report.courses_modified,
        "kept": report.kept,
        "removed": report
            .removals
            .iter()
            .map(|r| {
                json!({
                    "course_id": r.course_id.value(),
                    "course_name": r.course_name,
                    "code": r.tag.code.to_string(),
                    "weight": r.tag.weight.value(),
                    "rule": r.rule,
                    "signal": r.signal,
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn batch_json(report: &BatchReport) -> Value {
    json!({
        "run": report.run.to_string(),
        "dry_run": report.dry_run,
        "load": load_json(&report.load),
        "assignment": report.assignment.as_ref().map(assignment_json),
        "screening": report.screening.as_ref().map(screening_json),
        "pruning": report.pruning.as_ref().map(pruning_json),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillmap_domain::{CourseId, RunId, Tag, TagCode, Weight};
    use skillmap_evidence::{EvidenceValidator, ToolRemoval};
    use skillmap_pruner::TagRemoval;

    fn batch() -> BatchReport {
        let run = RunId::new();
        let mut pruning = PruneReport::new(run, false);
        pruning.courses_checked = 2;
        pruning.record_removal(TagRemoval {
            course_id: CourseId::new(7),
            course_name: "Intro to Baking".to_string(),
            tag: Tag::new(TagCode::parse("E1").unwrap(), Weight::Secondary),
            rule: "design-secondary".to_string(),
            signal: "topics={}".to_string(),
        });

        let screening = ScreenReport {
            run,
            courses_checked: 1,
            courses_modified: Vec::new(),
            removals: vec![ToolRemoval {
                course_id: CourseId::new(7),
                course_name: "Intro to Baking".to_string(),
                tool: "Cursor".to_string(),
                reason: "only inside excluded phrases".to_string(),
            }],
            missing_profiles: Vec::new(),
        };

        BatchReport {
            run,
            dry_run: false,
            load: LoadReport::default(),
            assignment: None,
            screening: Some(screening),
            pruning: Some(pruning),
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_batch(&batch()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["pruning"]["removed"][0]["code"], "E1");
        assert_eq!(value["pruning"]["removed"][0]["weight"], 0.3);
        assert_eq!(value["screening"]["by_tool"][0]["tool"], "Cursor");
        assert!(value["assignment"].is_null());
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_batch(&batch()).unwrap();
        assert_eq!(output, "tools_removed 1\ntags_removed 1");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_batch(&batch()).unwrap();
        assert!(output.contains("Removed tags"));
        assert!(output.contains("E1@0.3"));
        assert!(output.contains("Unmet condition"));
        assert!(output.contains("only inside excluded phrases"));
    }

    #[test]
    fn test_verdict_formats() {
        let validator = EvidenceValidator::builtin().unwrap();
        let verdict = validator.explain("v0", "released as v0.3");

        let table = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            table.format_verdict("v0", &verdict).unwrap(),
            "✗ v0 (ambiguous): only as version strings"
        );

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_verdict("v0", &verdict).unwrap(), "false");
    }

    #[test]
    fn test_empty_catalog() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_catalog(&[]).unwrap();
        assert!(output.contains("No tools found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let msg = formatter.success("test");
        assert_eq!(msg, "✓ test");
    }
}
