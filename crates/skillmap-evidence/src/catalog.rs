//! Compiled tool catalog
//!
//! Every name is bound to its [`Tier`] and, for ambiguous names, to compiled
//! patterns when the catalog is built. Nothing is compiled at call time.

use crate::config::{CatalogConfig, MatchStrategy};
use crate::EvidenceError;
use regex::{Regex, RegexBuilder};
use skillmap_domain::Tier;
use std::collections::{BTreeMap, BTreeSet};

/// Patterns compiled from one [`MatchStrategy`]
#[derive(Debug, Clone)]
pub struct CompiledStrategy {
    pub(crate) strategy: MatchStrategy,
    pub(crate) anchor: Regex,
    pub(crate) exclusions: Option<Regex>,
    pub(crate) context: Option<Regex>,
    pub(crate) domains: Option<Regex>,
    pub(crate) companions: Option<Regex>,
}

impl CompiledStrategy {
    fn compile(name: &str, strategy: &MatchStrategy) -> Result<Self, EvidenceError> {
        let pattern_error = |source| EvidenceError::Pattern {
            tool: name.to_string(),
            source,
        };

        let anchor_pattern = if strategy.word_boundary {
            bounded(&regex::escape(name), name, name)
        } else {
            regex::escape(name)
        };
        let anchor = RegexBuilder::new(&anchor_pattern)
            .case_insensitive(!strategy.case_sensitive)
            .build()
            .map_err(pattern_error)?;

        let exclusions = phrase_alternation(&strategy.exclusion_phrases).map_err(pattern_error)?;
        let companions = phrase_alternation(&strategy.companion_phrases).map_err(pattern_error)?;

        let context_terms: Vec<String> = strategy
            .context_vocabulary
            .iter()
            .map(|t| {
                let term = t.trim();
                if strategy.context_word_boundary {
                    bounded(&regex::escape(term), term, term)
                } else {
                    regex::escape(term)
                }
            })
            .collect();
        let context = alternation(&context_terms, true).map_err(pattern_error)?;

        let domain_patterns: Vec<String> = strategy
            .domain_suffixes
            .iter()
            .map(|suffix| {
                let literal = format!("{}{}", name, suffix.trim());
                bounded(&regex::escape(&literal), name, suffix.trim())
            })
            .collect();
        let domains =
            alternation(&domain_patterns, !strategy.case_sensitive).map_err(pattern_error)?;

        Ok(Self {
            strategy: strategy.clone(),
            anchor,
            exclusions,
            context,
            domains,
            companions,
        })
    }

    /// The strategy these patterns were compiled from
    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }
}

/// Wrap `pattern` in `\b` on each side whose edge character is a word character
fn bounded(pattern: &str, leading: &str, trailing: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let mut out = String::with_capacity(pattern.len() + 4);
    if is_word(leading.chars().next()) {
        out.push_str(r"\b");
    }
    out.push_str(pattern);
    if is_word(trailing.chars().last()) {
        out.push_str(r"\b");
    }
    out
}

/// Case-insensitive alternation of multi-word phrases with flexible whitespace
fn phrase_alternation(phrases: &[String]) -> Result<Option<Regex>, regex::Error> {
    let patterns: Vec<String> = phrases
        .iter()
        .map(|phrase| {
            let body = phrase
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+");
            bounded(&body, phrase.trim(), phrase.trim())
        })
        .collect();
    alternation(&patterns, true)
}

fn alternation(
    patterns: &[String],
    case_insensitive: bool,
) -> Result<Option<Regex>, regex::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{})", p))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&joined)
        .case_insensitive(case_insensitive)
        .build()
        .map(Some)
}

/// Fixed set of tool names with their tiers
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    unambiguous: BTreeSet<String>,
    ambiguous: BTreeMap<String, CompiledStrategy>,
}

impl ToolCatalog {
    /// Validate a configuration and compile it
    pub fn build(config: &CatalogConfig) -> Result<Self, EvidenceError> {
        config.validate()?;

        let mut ambiguous = BTreeMap::new();
        for (name, strategy) in &config.ambiguous {
            ambiguous.insert(name.clone(), CompiledStrategy::compile(name, strategy)?);
        }

        Ok(Self {
            unambiguous: config.unambiguous.iter().cloned().collect(),
            ambiguous,
        })
    }

    /// Compile the shipped catalog
    pub fn builtin() -> Result<Self, EvidenceError> {
        Self::build(&CatalogConfig::builtin())
    }

    /// Tier a name is bound to; unknown names are `Fallback`
    pub fn tier_of(&self, name: &str) -> Tier {
        if self.ambiguous.contains_key(name) {
            Tier::Ambiguous
        } else if self.unambiguous.contains(name) {
            Tier::Unambiguous
        } else {
            Tier::Fallback
        }
    }

    /// Compiled strategy of an ambiguous name
    pub fn strategy(&self, name: &str) -> Option<&CompiledStrategy> {
        self.ambiguous.get(name)
    }

    /// All catalog names with their tiers, unambiguous first, each group sorted
    pub fn entries(&self) -> Vec<(&str, Tier)> {
        self.unambiguous
            .iter()
            .map(|n| (n.as_str(), Tier::Unambiguous))
            .chain(self.ambiguous.keys().map(|n| (n.as_str(), Tier::Ambiguous)))
            .collect()
    }

    /// Whether the name is in either tier table
    pub fn contains(&self, name: &str) -> bool {
        self.tier_of(name) != Tier::Fallback
    }

    /// Number of catalog names
    pub fn len(&self) -> usize {
        self.unambiguous.len() + self.ambiguous.len()
    }

    /// Whether the catalog has no names
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
