//! Taxonomy module - the fixed set of valid tag codes

use crate::TagCode;
use std::collections::BTreeMap;

/// One skill definition in the taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    /// Code, e.g. `A1`
    pub code: TagCode,

    /// Skill name, e.g. "Strategy & Feasibility"
    pub name: String,

    /// Name of the category the code's letter is bound to
    pub category: String,

    /// First paragraph of the skill section
    pub description: String,

    /// Bulleted example topics
    pub example_topics: Vec<String>,
}

/// Lookup of valid codes; never mutated by the engines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    entries: BTreeMap<TagCode, TaxonomyEntry>,
}

impl Taxonomy {
    /// Create an empty taxonomy
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, returning the one it replaced
    pub fn insert(&mut self, entry: TaxonomyEntry) -> Option<TaxonomyEntry> {
        self.entries.insert(entry.code, entry)
    }

    /// Look up an entry
    pub fn get(&self, code: TagCode) -> Option<&TaxonomyEntry> {
        self.entries.get(&code)
    }

    /// Whether the code is defined
    pub fn contains(&self, code: TagCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// Display label such as `A1: Strategy & Feasibility`, or the bare code
    pub fn label(&self, code: TagCode) -> String {
        match self.get(code) {
            Some(entry) => format!("{}: {}", code, entry.name),
            None => code.to_string(),
        }
    }

    /// Entries in code order
    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are defined
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TaxonomyEntry> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = TaxonomyEntry>>(iter: I) -> Self {
        let mut taxonomy = Self::new();
        for entry in iter {
            taxonomy.insert(entry);
        }
        taxonomy
    }
}
