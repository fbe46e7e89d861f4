//! Course module - identifiers, text profiles and per-course label records

use crate::{TagSet, ToolAssignment};
use std::collections::BTreeSet;
use std::fmt;

/// Course identifier as issued by the upstream catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseId(u64);

impl CourseId {
    /// Wrap a raw identifier
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CourseId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text profile of a course: the evidence every label is checked against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProfile {
    /// Course identifier
    pub id: CourseId,

    /// Display name
    pub name: String,

    /// Source URL
    pub url: String,

    /// URL slug
    pub slug: String,

    /// Topic set, unordered
    pub topics: BTreeSet<String>,

    /// Free-form text (syllabus sections joined, `### ` section markers)
    pub text: String,
}

impl CourseProfile {
    /// Empty default used when a course has no profile
    pub fn empty(id: CourseId) -> Self {
        Self {
            id,
            name: String::new(),
            url: String::new(),
            slug: String::new(),
            topics: BTreeSet::new(),
            text: String::new(),
        }
    }

    /// Split a comma-separated topic string into a set, dropping blanks
    ///
    /// # Examples
    ///
    /// ```
    /// use skillmap_domain::CourseProfile;
    ///
    /// let topics = CourseProfile::parse_topics("AI, Prototyping,, ");
    /// assert_eq!(topics.len(), 2);
    /// assert!(topics.contains("Prototyping"));
    /// ```
    pub fn parse_topics(raw: &str) -> BTreeSet<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Topics joined back into the comma-separated form
    pub fn topics_label(&self) -> String {
        self.topics.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    /// Whether the topic set shares any member with `topics`
    pub fn has_any_topic(&self, topics: &BTreeSet<String>) -> bool {
        self.topics.iter().any(|t| topics.contains(t))
    }
}

/// Labels held for one course: weighted tags plus tool assignment
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    /// Course identifier
    pub id: CourseId,

    /// Display name, as recorded by the classifier
    pub name: String,

    /// Weighted tags
    pub tags: TagSet,

    /// Tools and aggregate tool weight
    pub tools: ToolAssignment,

    /// Free-text justification from the upstream classifier
    pub reasoning: Option<String>,
}

impl CourseRecord {
    /// Create a record with no labels
    pub fn new(id: CourseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: TagSet::new(),
            tools: ToolAssignment::default(),
            reasoning: None,
        }
    }
}
