//! Compiled pruning rules and their pure evaluation

use crate::config::{KeepCondition, PruneRuleConfig};
use crate::PrunerError;
use skillmap_domain::{CourseProfile, CourseRecord, Tag, TagCode, Weight};
use std::fmt;

/// Which tags a rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    /// One exact (code, weight) pair
    Exact {
        /// Targeted code
        code: TagCode,
        /// Targeted weight
        weight: Weight,
    },

    /// Every code of a category at one weight
    Category {
        /// Category letter
        letter: char,
        /// Targeted weight
        weight: Weight,
    },
}

impl RuleTarget {
    /// Parse `"A1"` / `"B*"` plus a weight string
    pub fn parse(target: &str, weight: &str) -> Option<Self> {
        let weight = Weight::parse(weight)?;
        let target = target.trim();
        if let Some(letter) = target.strip_suffix('*') {
            let mut chars = letter.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => Some(RuleTarget::Category { letter: c, weight }),
                _ => None,
            };
        }
        TagCode::parse(target).map(|code| RuleTarget::Exact { code, weight })
    }

    /// Weight of the targeted tags
    pub fn weight(&self) -> Weight {
        match self {
            RuleTarget::Exact { weight, .. } | RuleTarget::Category { weight, .. } => *weight,
        }
    }

    /// Category letter of the targeted tags
    pub fn category(&self) -> char {
        match self {
            RuleTarget::Exact { code, .. } => code.category(),
            RuleTarget::Category { letter, .. } => *letter,
        }
    }

    /// Tags of `record` this target selects, in list order
    pub fn select(&self, record: &CourseRecord) -> Vec<Tag> {
        match *self {
            RuleTarget::Exact { code, weight } => {
                if record.tags.contains(code, weight) {
                    vec![Tag::new(code, weight)]
                } else {
                    Vec::new()
                }
            }
            RuleTarget::Category { letter, weight } => record.tags.matching(letter, weight),
        }
    }
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTarget::Exact { code, weight } => write!(f, "{}@{}", code, weight),
            RuleTarget::Category { letter, weight } => write!(f, "{}*@{}", letter, weight),
        }
    }
}

/// A validated rule ready for evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct PruneRule {
    /// Rule name
    pub name: String,

    /// Targeted tags
    pub target: RuleTarget,

    /// Conditions, any one of which keeps a tag
    pub keep: Vec<KeepCondition>,
}

impl PruneRule {
    /// Compile a declarative rule
    pub fn compile(config: &PruneRuleConfig) -> Result<Self, PrunerError> {
        let target = RuleTarget::parse(&config.target, &config.weight).ok_or_else(|| {
            PrunerError::InvalidRule {
                rule: config.name.clone(),
                reason: format!(
                    "target '{}' with weight '{}' is not a code or category wildcard",
                    config.target, config.weight
                ),
            }
        })?;

        Ok(Self {
            name: config.name.clone(),
            target,
            keep: config.keep.clone(),
        })
    }
}

/// Why a tag was kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// Secondary tag protected by a primary tag in the same category
    Protected,

    /// The n-th configured condition held
    Condition(usize),
}

/// One tag the rule decided to remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// Tag to remove
    pub tag: Tag,

    /// Signal that failed to justify it
    pub signal: String,
}

/// Result of evaluating one rule on one course
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Tags to remove
    pub removals: Vec<Removal>,

    /// Tags the rule looked at and kept
    pub kept: Vec<(Tag, KeepReason)>,
}

impl RuleOutcome {
    /// Whether the rule removes nothing
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    /// Remove every listed tag from `record`
    pub fn apply_to(&self, record: &mut CourseRecord) {
        for removal in &self.removals {
            record.tags.remove(removal.tag.code, removal.tag.weight);
        }
    }
}

/// Evaluate one rule against one course without mutating it
///
/// Every tag the target selects is judged against the record as passed in,
/// so removals decided in this call never influence each other.
pub fn evaluate(record: &CourseRecord, profile: &CourseProfile, rule: &PruneRule) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for tag in rule.target.select(record) {
        match keep_reason(tag, record, profile, &rule.keep) {
            Some(reason) => outcome.kept.push((tag, reason)),
            None => outcome.removals.push(Removal {
                tag,
                signal: format!("topics={{{}}}", profile.topics_label()),
            }),
        }
    }

    outcome
}

fn keep_reason(
    tag: Tag,
    record: &CourseRecord,
    profile: &CourseProfile,
    conditions: &[KeepCondition],
) -> Option<KeepReason> {
    if tag.weight == Weight::Secondary
        && record.tags.has_primary_in_category(tag.code.category(), Some(tag.code))
    {
        return Some(KeepReason::Protected);
    }

    conditions
        .iter()
        .position(|condition| holds(condition, tag, record, profile))
        .map(KeepReason::Condition)
}

fn holds(condition: &KeepCondition, tag: Tag, record: &CourseRecord, profile: &CourseProfile) -> bool {
    match condition {
        KeepCondition::CategoryPrimary => record
            .tags
            .has_primary_in_category(tag.code.category(), Some(tag.code)),
        KeepCondition::TopicsAny(topics) => profile.has_any_topic(topics),
        KeepCondition::TopicsAll(groups) => {
            !groups.is_empty() && groups.iter().all(|group| profile.has_any_topic(group))
        }
        KeepCondition::NameKeywords(keywords) => {
            let name = record.name.to_lowercase();
            keywords.iter().any(|kw| name.contains(&kw.to_lowercase()))
        }
        KeepCondition::ToolPresent(tool) => record.tools.contains(tool),
    }
}
