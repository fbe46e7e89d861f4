//! Catalog configuration: tier tables and per-tool match strategies
//!
//! Adding an ambiguous tool is a data change: give it a [`MatchStrategy`]
//! in the `ambiguous` table, either in code or in TOML:
//!
//! ```toml
//! unambiguous = ["Figma", "Zapier"]
//!
//! [ambiguous.Relay]
//! domain_suffixes = [".app"]
//! context_vocabulary = ["app", "automation", "workflow"]
//! window = 150
//! ```

use crate::EvidenceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default context window in characters
pub const DEFAULT_WINDOW: usize = 150;

/// Which side of an occurrence the context window covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSide {
    /// Text preceding the occurrence only
    Before,
    /// Text following the occurrence only
    After,
    /// Both sides, occurrence included
    #[default]
    Both,
}

/// Disambiguation strategy for one ambiguous tool name
///
/// Each field switches on one primitive; the evaluator applies whichever are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStrategy {
    /// Name must appear as a standalone token
    #[serde(default = "default_true")]
    pub word_boundary: bool,

    /// Anchor matching respects case (a capitalized occurrence is the evidence)
    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    /// Phrases in which the token has an unrelated sense; masked out before
    /// looking for a surviving occurrence
    #[serde(default)]
    pub exclusion_phrases: Vec<String>,

    /// Domain terms, one of which must appear near an occurrence
    #[serde(default)]
    pub context_vocabulary: Vec<String>,

    /// Character distance for the context vocabulary (inclusive)
    #[serde(default = "default_window")]
    pub window: usize,

    /// Side of the occurrence the window covers
    #[serde(default)]
    pub context_side: ContextSide,

    /// Context terms must appear as whole words
    #[serde(default)]
    pub context_word_boundary: bool,

    /// Reject occurrences followed by `.<digit>` (version strings)
    #[serde(default)]
    pub numeric_suffix_exclusion: bool,

    /// Suffixes such as `.app` which, glued to the name, prove a mention
    #[serde(default)]
    pub domain_suffixes: Vec<String>,

    /// Phrases that prove a mention outright (e.g. "Claude Code")
    #[serde(default)]
    pub companion_phrases: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

impl Default for MatchStrategy {
    fn default() -> Self {
        Self::standalone()
    }
}

impl MatchStrategy {
    /// Case-sensitive standalone token, no other primitive
    pub fn standalone() -> Self {
        Self {
            word_boundary: true,
            case_sensitive: true,
            exclusion_phrases: Vec::new(),
            context_vocabulary: Vec::new(),
            window: DEFAULT_WINDOW,
            context_side: ContextSide::Both,
            context_word_boundary: false,
            numeric_suffix_exclusion: false,
            domain_suffixes: Vec::new(),
            companion_phrases: Vec::new(),
        }
    }

    /// Mask these phrases before testing
    pub fn excluding(mut self, phrases: &[&str]) -> Self {
        self.exclusion_phrases = to_strings(phrases);
        self
    }

    /// Require one of `terms` within `window` characters
    pub fn with_context(mut self, terms: &[&str], window: usize) -> Self {
        self.context_vocabulary = to_strings(terms);
        self.window = window;
        self
    }

    /// Look for context only in the text preceding an occurrence
    pub fn context_before(mut self) -> Self {
        self.context_side = ContextSide::Before;
        self
    }

    /// Match context terms as whole words ("app" does not hit "apply")
    pub fn whole_word_context(mut self) -> Self {
        self.context_word_boundary = true;
        self
    }

    /// Skip occurrences that look like version strings
    pub fn version_safe(mut self) -> Self {
        self.numeric_suffix_exclusion = true;
        self
    }

    /// Accept `name + suffix` unconditionally
    pub fn with_domains(mut self, suffixes: &[&str]) -> Self {
        self.domain_suffixes = to_strings(suffixes);
        self
    }

    /// Accept any of these phrases unconditionally
    pub fn with_companions(mut self, phrases: &[&str]) -> Self {
        self.companion_phrases = to_strings(phrases);
        self
    }

    fn validate(&self, tool: &str) -> Result<(), EvidenceError> {
        let phrase_lists = [
            ("exclusion_phrases", &self.exclusion_phrases),
            ("context_vocabulary", &self.context_vocabulary),
            ("domain_suffixes", &self.domain_suffixes),
            ("companion_phrases", &self.companion_phrases),
        ];
        for (field, list) in phrase_lists {
            if list.iter().any(|p| p.trim().is_empty()) {
                return Err(EvidenceError::Config(format!(
                    "{} for '{}' contains a blank entry",
                    field, tool
                )));
            }
        }
        if !self.context_vocabulary.is_empty() && self.window == 0 {
            return Err(EvidenceError::Config(format!(
                "window for '{}' must be greater than 0",
                tool
            )));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Tier tables for the tool catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Names matched by case-insensitive substring
    #[serde(default)]
    pub unambiguous: Vec<String>,

    /// Names bound to a disambiguation strategy
    #[serde(default)]
    pub ambiguous: BTreeMap<String, MatchStrategy>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CatalogConfig {
    /// Catalog with no entries; every lookup falls back to substring matching
    pub fn empty() -> Self {
        Self {
            unambiguous: Vec::new(),
            ambiguous: BTreeMap::new(),
        }
    }

    /// The shipped catalog
    pub fn builtin() -> Self {
        let unambiguous = to_strings(&[
            "ChatGPT",
            "OpenAI API",
            "Claude Code",
            "Lovable",
            "Figma",
            "LangChain",
            "LangGraph",
            "n8n",
            "Replit",
            "Zapier",
            "Custom GPTs",
            "NotebookLM",
            "DALL-E",
            "Hugging Face",
            "Pinecone",
            "Google Colab",
            "Notion AI",
            "Stable Diffusion",
            "Midjourney",
            "GPT-4",
        ]);

        let mut ambiguous = BTreeMap::new();
        ambiguous.insert(
            "Claude".to_string(),
            MatchStrategy::standalone()
                .with_companions(&["Claude Code"])
                .with_context(
                    &["Anthropic", "Sonnet", "Opus", "Haiku", "API", "model", "AI", "LLM", "chatbot"],
                    150,
                ),
        );
        ambiguous.insert(
            "Cursor".to_string(),
            MatchStrategy::standalone().excluding(&["cursor position", "text cursor", "mouse cursor"]),
        );
        ambiguous.insert(
            "Bolt".to_string(),
            MatchStrategy::standalone().excluding(&["bolt on", "nuts and bolts"]),
        );
        ambiguous.insert("v0".to_string(), MatchStrategy::standalone().version_safe());
        ambiguous.insert(
            "Make".to_string(),
            MatchStrategy::standalone()
                .with_domains(&[".com"])
                .with_companions(&["Make automation", "Make scenario", "Make integration"])
                .with_context(&["tool", "tools", "platform", "software", "app"], 30)
                .context_before()
                .whole_word_context(),
        );
        ambiguous.insert("Gemini".to_string(), MatchStrategy::standalone());
        ambiguous.insert("Copilot".to_string(), MatchStrategy::standalone());
        ambiguous.insert("Perplexity".to_string(), MatchStrategy::standalone());
        ambiguous.insert(
            "Windsurf".to_string(),
            MatchStrategy::standalone().excluding(&["windsurfing"]),
        );
        ambiguous.insert(
            "Devin".to_string(),
            MatchStrategy::standalone().with_context(
                &["AI", "agent", "coding", "engineer", "tool", "software"],
                150,
            ),
        );
        ambiguous.insert(
            "Relay".to_string(),
            MatchStrategy::standalone()
                .with_domains(&[".app"])
                .with_context(&["app", "automation", "workflow"], 150),
        );

        Self {
            unambiguous,
            ambiguous,
        }
    }

    /// Lay `other` over this catalog
    ///
    /// Entries in `other` win; a name listed in one table of `other` is
    /// removed from the other table of `self`.
    pub fn overlay(mut self, other: CatalogConfig) -> Self {
        for name in other.unambiguous {
            self.ambiguous.remove(&name);
            if !self.unambiguous.contains(&name) {
                self.unambiguous.push(name);
            }
        }
        for (name, strategy) in other.ambiguous {
            self.unambiguous.retain(|n| n != &name);
            self.ambiguous.insert(name, strategy);
        }
        self
    }

    /// Validate the tables
    pub fn validate(&self) -> Result<(), EvidenceError> {
        for name in &self.unambiguous {
            if name.trim().is_empty() {
                return Err(EvidenceError::Config("blank tool name".to_string()));
            }
            if self.ambiguous.contains_key(name) {
                return Err(EvidenceError::Config(format!(
                    "'{}' is listed as both unambiguous and ambiguous",
                    name
                )));
            }
        }
        if let Some(dup) = first_duplicate(&self.unambiguous) {
            return Err(EvidenceError::Config(format!("'{}' is listed twice", dup)));
        }
        for (name, strategy) in &self.ambiguous {
            if name.trim().is_empty() {
                return Err(EvidenceError::Config("blank tool name".to_string()));
            }
            strategy.validate(name)?;
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EvidenceError> {
        toml::from_str(toml_str).map_err(|e| EvidenceError::Toml(e.to_string()))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, EvidenceError> {
        toml::to_string_pretty(self).map_err(|e| EvidenceError::Toml(e.to_string()))
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    names
        .iter()
        .enumerate()
        .find(|(i, n)| names[..*i].contains(n))
        .map(|(_, n)| n.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = CatalogConfig::builtin();
        assert!(config.validate().is_ok());
        assert_eq!(config.unambiguous.len(), 20);
        assert_eq!(config.ambiguous.len(), 11);
    }

    #[test]
    fn test_builtin_bindings() {
        let config = CatalogConfig::builtin();
        assert!(config.ambiguous["v0"].numeric_suffix_exclusion);
        assert_eq!(config.ambiguous["Relay"].domain_suffixes, vec![".app".to_string()]);
        assert_eq!(config.ambiguous["Make"].window, 30);
        assert_eq!(config.ambiguous["Make"].context_side, ContextSide::Before);
        assert!(config.ambiguous["Make"].context_word_boundary);
        assert_eq!(config.ambiguous["Devin"].context_side, ContextSide::Both);
        assert!(config.ambiguous["Gemini"].exclusion_phrases.is_empty());
    }

    #[test]
    fn test_overlay_moves_names_between_tables() {
        let overlay = CatalogConfig {
            unambiguous: vec!["Gemini".to_string()],
            ambiguous: [("Figma".to_string(), MatchStrategy::standalone())].into_iter().collect(),
        };
        let merged = CatalogConfig::builtin().overlay(overlay);

        assert!(merged.unambiguous.contains(&"Gemini".to_string()));
        assert!(!merged.ambiguous.contains_key("Gemini"));
        assert!(merged.ambiguous.contains_key("Figma"));
        assert!(!merged.unambiguous.contains(&"Figma".to_string()));
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut config = CatalogConfig::empty();
        config.unambiguous = vec!["Figma".to_string(), "Figma".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_window_with_context_rejected() {
        let mut config = CatalogConfig::empty();
        config.ambiguous.insert(
            "Devin".to_string(),
            MatchStrategy::standalone().with_context(&["agent"], 0),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_defaults_fill_missing_fields() {
        let config = CatalogConfig::from_toml(
            r#"
            unambiguous = ["Zapier"]

            [ambiguous.Relay]
            domain_suffixes = [".app"]
            "#,
        )
        .unwrap();

        let relay = &config.ambiguous["Relay"];
        assert!(relay.word_boundary);
        assert!(relay.case_sensitive);
        assert_eq!(relay.window, DEFAULT_WINDOW);
        assert!(relay.context_vocabulary.is_empty());
        assert_eq!(relay.context_side, ContextSide::Both);
        assert!(!relay.context_word_boundary);
    }

    #[test]
    fn test_toml_context_side() {
        let config = CatalogConfig::from_toml(
            r#"
            [ambiguous.Make]
            context_vocabulary = ["tool", "app"]
            window = 30
            context_side = "before"
            context_word_boundary = true
            "#,
        )
        .unwrap();

        let make = &config.ambiguous["Make"];
        assert_eq!(make.context_side, ContextSide::Before);
        assert!(make.context_word_boundary);
        assert!(CatalogConfig::from_toml("[ambiguous.Make]\ncontext_side = \"above\"\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CatalogConfig::builtin();
        let parsed = CatalogConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
