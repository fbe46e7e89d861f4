//! Configuration for the Assigner

use crate::AssignerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Declarative form of one assignment rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRuleConfig {
    /// Name used in logs and the audit
    pub name: String,

    /// Tag code the rule assigns
    pub code: String,

    /// Topics that make the tag primary
    #[serde(default)]
    pub strong_topics: BTreeSet<String>,

    /// Case-insensitive regexes over the course name that make the tag primary
    #[serde(default)]
    pub name_patterns: Vec<String>,

    /// Catalog tools counted as evidence
    #[serde(default)]
    pub tools: BTreeSet<String>,

    /// Tool count at or above which, together with the weight threshold, the tag is primary
    #[serde(default = "default_tool_count_threshold")]
    pub tool_count_threshold: usize,

    /// Tool weight at or above which, together with the count threshold, the tag is primary
    #[serde(default = "default_tool_weight_threshold")]
    pub tool_weight_threshold: f64,
}

fn default_tool_count_threshold() -> usize {
    3
}

fn default_tool_weight_threshold() -> f64 {
    0.8
}

impl AssignmentRuleConfig {
    /// Prototyping & Vibe Coding (A5)
    pub fn prototyping() -> Self {
        Self {
            name: "prototyping".to_string(),
            code: "A5".to_string(),
            strong_topics: ["Prototyping", "Coding with AI"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            name_patterns: [
                r"prototype",
                r"prototyping",
                r"vibe\s*cod",
                r"builder\s+bootcamp",
                r"build\s+and\s+ship",
                r"build\s*&\s*ship",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            tools: ["Cursor", "Lovable", "Bolt", "v0", "Replit", "Windsurf", "Devin"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            tool_count_threshold: default_tool_count_threshold(),
            tool_weight_threshold: default_tool_weight_threshold(),
        }
    }
}

/// Configuration for the Assigner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignerConfig {
    /// Compute the audit without adding tags
    #[serde(default)]
    pub dry_run: bool,

    /// Rules applied in order
    #[serde(default)]
    pub rules: Vec<AssignmentRuleConfig>,
}

impl Default for AssignerConfig {
    /// The prototyping rule only
    fn default() -> Self {
        Self {
            dry_run: false,
            rules: vec![AssignmentRuleConfig::prototyping()],
        }
    }
}

impl AssignerConfig {
    /// Configuration without any rules
    pub fn empty() -> Self {
        Self {
            dry_run: false,
            rules: Vec::new(),
        }
    }

    /// Validate the configuration
    ///
    /// Pattern syntax is checked when the rules are compiled.
    pub fn validate(&self) -> Result<(), AssignerError> {
        let mut names = BTreeSet::new();
        let mut codes = BTreeSet::new();
        for rule in &self.rules {
            if !names.insert(rule.name.as_str()) {
                return Err(AssignerError::Config(format!(
                    "duplicate rule name '{}'",
                    rule.name
                )));
            }
            if !codes.insert(rule.code.as_str()) {
                return Err(AssignerError::Config(format!(
                    "code '{}' is assigned by more than one rule",
                    rule.code
                )));
            }
            if rule.tool_count_threshold == 0 {
                return Err(AssignerError::Config(format!(
                    "rule '{}': tool_count_threshold must be greater than 0",
                    rule.name
                )));
            }
            if !(0.0..=1.0).contains(&rule.tool_weight_threshold) {
                return Err(AssignerError::Config(format!(
                    "rule '{}': tool_weight_threshold must be between 0 and 1",
                    rule.name
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, AssignerError> {
        toml::from_str(toml_str).map_err(|e| AssignerError::Toml(e.to_string()))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, AssignerError> {
        toml::to_string_pretty(self).map_err(|e| AssignerError::Toml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AssignerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rules[0].code, "A5");
        assert_eq!(config.rules[0].tools.len(), 7);
    }

    #[test]
    fn test_invalid_thresholds() {
        let mut config = AssignerConfig::default();
        config.rules[0].tool_count_threshold = 0;
        assert!(config.validate().is_err());

        let mut config = AssignerConfig::default();
        config.rules[0].tool_weight_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let mut config = AssignerConfig::default();
        let mut second = AssignmentRuleConfig::prototyping();
        second.name = "again".to_string();
        config.rules.push(second);
        assert!(matches!(config.validate(), Err(AssignerError::Config(_))));
    }

    #[test]
    fn test_toml_defaults_thresholds() {
        let config = AssignerConfig::from_toml(
            r#"
            [[rules]]
            name = "data"
            code = "C2"
            strong_topics = ["Data Analysis"]
            "#,
        )
        .unwrap();

        let rule = &config.rules[0];
        assert_eq!(rule.tool_count_threshold, 3);
        assert_eq!(rule.tool_weight_threshold, 0.8);
        assert!(rule.name_patterns.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AssignerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = AssignerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
