//! Tool mention validation logic

use crate::catalog::{CompiledStrategy, ToolCatalog};
use crate::config::ContextSide;
use crate::EvidenceError;
use skillmap_domain::{MentionCheck, Tier};
use std::fmt;
use std::ops::Range;

/// Why a verdict came out the way it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchReason {
    /// Document text was empty
    EmptyText,

    /// Case-insensitive substring found (unambiguous or fallback)
    Substring,

    /// Case-insensitive substring absent (unambiguous or fallback)
    SubstringAbsent,

    /// Name glued to a domain suffix, e.g. `Relay.app`
    DomainSuffix(String),

    /// A companion phrase such as "Claude Code"
    CompanionPhrase(String),

    /// A standalone occurrence survived every applicable filter
    Standalone,

    /// A standalone occurrence had this context term within the window
    ContextWithinWindow(String),

    /// No standalone occurrence at all
    NoStandaloneOccurrence,

    /// Every occurrence sat inside an exclusion phrase
    OnlyExcludedPhrases,

    /// Every occurrence was followed by `.<digit>`
    OnlyVersionStrings,

    /// No occurrence had a context term within the window
    NoContextWithinWindow,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::EmptyText => write!(f, "empty text"),
            MatchReason::Substring => write!(f, "substring match"),
            MatchReason::SubstringAbsent => write!(f, "not found"),
            MatchReason::DomainSuffix(m) => write!(f, "domain suffix '{}'", m),
            MatchReason::CompanionPhrase(m) => write!(f, "companion phrase '{}'", m),
            MatchReason::Standalone => write!(f, "standalone occurrence"),
            MatchReason::ContextWithinWindow(term) => write!(f, "context term '{}' nearby", term),
            MatchReason::NoStandaloneOccurrence => write!(f, "no standalone occurrence"),
            MatchReason::OnlyExcludedPhrases => write!(f, "only inside excluded phrases"),
            MatchReason::OnlyVersionStrings => write!(f, "only as version strings"),
            MatchReason::NoContextWithinWindow => write!(f, "no context term within window"),
        }
    }
}

/// Outcome of checking one tool against one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Tier the tool name is bound to
    pub tier: Tier,

    /// Whether the document references the tool
    pub mentioned: bool,

    /// Deciding rule
    pub reason: MatchReason,
}

/// Decides whether catalog tools are genuinely referenced in text
///
/// Pure: the verdict depends only on the catalog (fixed at construction) and
/// the arguments.
///
/// # Examples
///
/// ```
/// use skillmap_evidence::EvidenceValidator;
///
/// let validator = EvidenceValidator::builtin().unwrap();
/// assert!(validator.mentioned("Relay", "Relay.app lets you automate"));
/// assert!(!validator.mentioned("v0", "released as v0.3 last week"));
/// ```
#[derive(Debug, Clone)]
pub struct EvidenceValidator {
    catalog: ToolCatalog,
}

impl EvidenceValidator {
    /// Create a validator over a compiled catalog
    pub fn new(catalog: ToolCatalog) -> Self {
        Self { catalog }
    }

    /// Create a validator over the shipped catalog
    pub fn builtin() -> Result<Self, EvidenceError> {
        Ok(Self::new(ToolCatalog::builtin()?))
    }

    /// The catalog in use
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Whether `text` references `tool`
    pub fn mentioned(&self, tool: &str, text: &str) -> bool {
        self.explain(tool, text).mentioned
    }

    /// Check `tool` against `text` and report the deciding rule
    pub fn explain(&self, tool: &str, text: &str) -> Verdict {
        let tier = self.catalog.tier_of(tool);
        if text.is_empty() {
            return Verdict {
                tier,
                mentioned: false,
                reason: MatchReason::EmptyText,
            };
        }

        let (mentioned, reason) = match self.catalog.strategy(tool) {
            Some(strategy) => evaluate(strategy, text),
            None => substring(tool, text),
        };
        Verdict {
            tier,
            mentioned,
            reason,
        }
    }
}

impl MentionCheck for EvidenceValidator {
    fn mentioned(&self, tool: &str, text: &str) -> bool {
        EvidenceValidator::mentioned(self, tool, text)
    }

    fn describe(&self, tool: &str, text: &str) -> String {
        self.explain(tool, text).reason.to_string()
    }
}

/// Tier 1 and fallback rule
fn substring(tool: &str, text: &str) -> (bool, MatchReason) {
    if text.to_lowercase().contains(&tool.to_lowercase()) {
        (true, MatchReason::Substring)
    } else {
        (false, MatchReason::SubstringAbsent)
    }
}

/// Tier 2: interpret one strategy record
fn evaluate(compiled: &CompiledStrategy, text: &str) -> (bool, MatchReason) {
    if let Some(m) = compiled.domains.as_ref().and_then(|re| re.find(text)) {
        return (true, MatchReason::DomainSuffix(m.as_str().to_string()));
    }
    if let Some(m) = compiled.companions.as_ref().and_then(|re| re.find(text)) {
        return (true, MatchReason::CompanionPhrase(m.as_str().to_string()));
    }
    if !compiled.anchor.is_match(text) {
        return (false, MatchReason::NoStandaloneOccurrence);
    }

    let mut occurrences = match &compiled.exclusions {
        Some(exclusions) => {
            // Masking keeps byte offsets aligned with the original text
            let masked = exclusions.replace_all(text, |caps: &regex::Captures<'_>| {
                " ".repeat(caps[0].len())
            });
            occurrences_in(&compiled.anchor, &masked)
        }
        None => occurrences_in(&compiled.anchor, text),
    };
    if occurrences.is_empty() {
        return (false, MatchReason::OnlyExcludedPhrases);
    }

    if compiled.strategy.numeric_suffix_exclusion {
        occurrences.retain(|r| !followed_by_version(text, r.end));
        if occurrences.is_empty() {
            return (false, MatchReason::OnlyVersionStrings);
        }
    }

    match &compiled.context {
        Some(context) => {
            let window = compiled.strategy.window;
            for occurrence in &occurrences {
                let (start, end) = match compiled.strategy.context_side {
                    ContextSide::Before => (chars_back(text, occurrence.start, window), occurrence.start),
                    ContextSide::After => (occurrence.end, chars_forward(text, occurrence.end, window)),
                    ContextSide::Both => (
                        chars_back(text, occurrence.start, window),
                        chars_forward(text, occurrence.end, window),
                    ),
                };
                // `find_at` looks behind `start`, so `\b` at the window edge sees the real text
                if let Some(m) = context.find_at(text, start).filter(|m| m.end() <= end) {
                    return (true, MatchReason::ContextWithinWindow(m.as_str().to_string()));
                }
            }
            (false, MatchReason::NoContextWithinWindow)
        }
        None => (true, MatchReason::Standalone),
    }
}

fn occurrences_in(anchor: &regex::Regex, text: &str) -> Vec<Range<usize>> {
    anchor.find_iter(text).map(|m| m.range()).collect()
}

/// `.` followed by an ASCII digit right after the occurrence
fn followed_by_version(text: &str, end: usize) -> bool {
    let mut rest = text[end..].chars();
    rest.next() == Some('.') && rest.next().is_some_and(|c| c.is_ascii_digit())
}

/// Byte offset `n` characters before `from`, clamped to the start
fn chars_back(text: &str, from: usize, n: usize) -> usize {
    text[..from]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(from, |(i, _)| i)
}

/// Byte offset `n` characters after `from`, clamped to the end
fn chars_forward(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| from + i)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: identical inputs always give the identical verdict
        #[test]
        fn test_validator_is_pure(text in "\\PC{0,200}", pick in 0usize..32) {
            let v = EvidenceValidator::builtin().unwrap();
            let entries = v.catalog().entries();
            let tool = entries.get(pick).map_or("Unlisted", |(n, _)| *n);

            let first = v.explain(tool, &text);
            let second = v.explain(tool, &text);
            prop_assert_eq!(first, second);
        }

        /// Property: arbitrary text never panics and empty text is never a match
        #[test]
        fn test_validator_total(text in "[a-zA-Z0-9 .,v]{0,80}") {
            let v = EvidenceValidator::builtin().unwrap();
            for (tool, _) in v.catalog().entries() {
                let _ = v.mentioned(tool, &text);
                prop_assert!(!v.mentioned(tool, ""));
            }
        }
    }
}
