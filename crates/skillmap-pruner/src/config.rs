//! Configuration for pruning rules
//!
//! Rules are declared as data and compiled into [`PruneRule`](crate::PruneRule)s
//! when a [`Pruner`](crate::Pruner) is built.

use crate::PrunerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Condition under which a targeted tag survives
///
/// In TOML, `CategoryPrimary` is written as the bare string
/// `"category_primary"` and the others as one-key inline tables, e.g.
/// `{ topics_any = ["Design", "UX"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepCondition {
    /// Another code in the target's category is held at primary weight
    CategoryPrimary,

    /// The course topic set intersects this set
    TopicsAny(BTreeSet<String>),

    /// The course topic set intersects every one of these sets
    TopicsAll(Vec<BTreeSet<String>>),

    /// The lower-cased course name contains any of these keywords
    NameKeywords(Vec<String>),

    /// This tool is in the course's tool list
    ToolPresent(String),
}

/// Declarative form of one pruning rule
///
/// `target` is either a full code (`"A1"`) or a category wildcard (`"B*"`);
/// `weight` is `"primary"`, `"secondary"`, `"0.8"` or `"0.3"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneRuleConfig {
    /// Name used in logs and the removal log
    pub name: String,

    /// Code or category wildcard
    pub target: String,

    /// Weight of the targeted tags
    pub weight: String,

    /// Conditions, any one of which keeps the tag
    #[serde(default)]
    pub keep: Vec<KeepCondition>,
}

/// Configuration for the pruning engine
///
/// # Examples
///
/// ```
/// use skillmap_pruner::PruneConfig;
///
/// let config = PruneConfig::default();
/// assert_eq!(config.rules.len(), 5);
/// assert!(!config.dry_run);
///
/// let config = PruneConfig::empty();
/// assert!(config.rules.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    /// Compute the removal log without mutating any course
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Ordered rules; each sees the result of the ones before it
    #[serde(default)]
    pub rules: Vec<PruneRuleConfig>,
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Topics of courses about AI product work
pub fn product_ai_topics() -> BTreeSet<String> {
    set(&[
        "AI",
        "Agentic AI",
        "Product Strategy",
        "Product Management Certifications",
        "Working with LLMs",
        "Developing AI Models",
        "Machine Learning",
        "AI Evals",
        "RAG",
        "System Design",
        "APIs",
        "Prototyping",
        "Coding with AI",
        "A/B Testing",
        "Experimentation",
        "Security",
        "Data Analysis",
        "Optimization",
        "Project Management",
        "Growth",
        "B2B",
        "Productivity",
        "Strategy",
        "User Research",
    ])
}

/// Topics of design and UX courses
pub fn design_topics() -> BTreeSet<String> {
    set(&["Design", "Design Systems", "Design Sprints", "Figma", "UX", "Healthcare"])
}

/// Topics of courses with technical AI content
pub fn technical_ai_topics() -> BTreeSet<String> {
    set(&[
        "AI",
        "Agentic AI",
        "Working with LLMs",
        "Developing AI Models",
        "Machine Learning",
        "AI Evals",
        "RAG",
        "System Design",
        "APIs",
        "Coding with AI",
        "Prototyping",
        "Data Analysis",
        "Programming",
        "Security",
    ])
}

const PRODUCT_NAME_KEYWORDS: &[&str] = &[
    "product",
    "pm ",
    "ai ",
    "artificial intelligence",
    "agent",
    "llm",
    "prototype",
    "eval",
    "strategy",
];

impl Default for PruneConfig {
    /// The five catch-all rules
    ///
    /// - A1@0.8: kept for product/AI topics, another A primary, or a product name
    /// - A1@0.3: same, plus "pricing" in the name
    /// - A3@0.3: kept for evaluation names or topics, or strong AI context
    /// - E1@0.3: kept for design topics, design names, or Figma in the tools
    /// - B*@0.3: kept for technical topics, a B primary, or a technical name
    fn default() -> Self {
        let mut secondary_product_keywords = list(PRODUCT_NAME_KEYWORDS);
        secondary_product_keywords.push("pricing".to_string());

        Self {
            dry_run: false,
            rules: vec![
                PruneRuleConfig {
                    name: "product-ai-primary".to_string(),
                    target: "A1".to_string(),
                    weight: "primary".to_string(),
                    keep: vec![
                        KeepCondition::TopicsAny(product_ai_topics()),
                        KeepCondition::CategoryPrimary,
                        KeepCondition::NameKeywords(list(PRODUCT_NAME_KEYWORDS)),
                    ],
                },
                PruneRuleConfig {
                    name: "product-ai-secondary".to_string(),
                    target: "A1".to_string(),
                    weight: "secondary".to_string(),
                    keep: vec![
                        KeepCondition::TopicsAny(product_ai_topics()),
                        KeepCondition::CategoryPrimary,
                        KeepCondition::NameKeywords(secondary_product_keywords),
                    ],
                },
                PruneRuleConfig {
                    name: "ai-evaluation-secondary".to_string(),
                    target: "A3".to_string(),
                    weight: "secondary".to_string(),
                    keep: vec![
                        KeepCondition::NameKeywords(list(&[
                            "eval",
                            "test",
                            "a/b",
                            "experiment",
                            "measure",
                            "metric",
                            "quality",
                            "forecast",
                        ])),
                        KeepCondition::TopicsAny(set(&["AI Evals", "A/B Testing", "Experimentation"])),
                        KeepCondition::TopicsAll(vec![product_ai_topics(), technical_ai_topics()]),
                    ],
                },
                PruneRuleConfig {
                    name: "design-secondary".to_string(),
                    target: "E1".to_string(),
                    weight: "secondary".to_string(),
                    keep: vec![
                        KeepCondition::TopicsAny(design_topics()),
                        KeepCondition::NameKeywords(list(&["design", "ux", "figma", "visual", "ui"])),
                        KeepCondition::ToolPresent("Figma".to_string()),
                    ],
                },
                PruneRuleConfig {
                    name: "technical-secondary".to_string(),
                    target: "B*".to_string(),
                    weight: "secondary".to_string(),
                    keep: vec![
                        KeepCondition::TopicsAny(technical_ai_topics()),
                        KeepCondition::CategoryPrimary,
                        KeepCondition::NameKeywords(list(&[
                            "engineer",
                            "technical",
                            "api",
                            "code",
                            "build",
                            "system",
                            "architect",
                            "rag",
                            "agent",
                            "llm",
                            "model",
                            "ml ",
                            "data",
                        ])),
                    ],
                },
            ],
        }
    }
}

impl PruneConfig {
    /// Configuration without any rules
    pub fn empty() -> Self {
        Self {
            dry_run: false,
            rules: Vec::new(),
        }
    }

    /// Default rules in dry-run mode
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Check rule names are unique and non-empty
    ///
    /// Target and weight syntax is checked when the rules are compiled.
    pub fn validate(&self) -> Result<(), PrunerError> {
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err(PrunerError::Config(format!(
                    "rule targeting '{}' has an empty name",
                    rule.target
                )));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(PrunerError::Config(format!(
                    "duplicate rule name '{}'",
                    rule.name
                )));
            }
        }
        Ok(())
    }

    /// Parse from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, PrunerError> {
        toml::from_str(toml_str).map_err(|e| PrunerError::Toml(e.to_string()))
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, PrunerError> {
        toml::to_string_pretty(self).map_err(|e| PrunerError::Toml(e.to_string()))
    }
}
