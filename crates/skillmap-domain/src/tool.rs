//! Tool assignment module - catalog tools detected for a course

use std::collections::BTreeSet;

/// Per-course tool list plus one course-level tool weight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolAssignment {
    tools: Vec<String>,
    tool_weight: f64,
}

impl ToolAssignment {
    /// Create an assignment from a tool list and aggregate weight
    pub fn new(tools: Vec<String>, tool_weight: f64) -> Self {
        Self { tools, tool_weight }
    }

    /// Assigned tool names, in order
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Aggregate tool weight for the course
    pub fn tool_weight(&self) -> f64 {
        self.tool_weight
    }

    /// Whether a tool with exactly this name is assigned
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t == name)
    }

    /// Number of assigned tools that belong to `catalog`
    pub fn count_in(&self, catalog: &BTreeSet<String>) -> usize {
        self.tools.iter().filter(|t| catalog.contains(*t)).count()
    }

    /// Whether no tools are assigned
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Keep only tools for which `keep` returns true
    ///
    /// Returns the removed tools. When a non-empty list becomes empty the
    /// tool weight drops to zero.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) -> Vec<String> {
        if self.tools.is_empty() {
            return Vec::new();
        }
        let (kept, removed): (Vec<String>, Vec<String>) =
            self.tools.drain(..).partition(|t| keep(t));
        self.tools = kept;
        if self.tools.is_empty() {
            self.tool_weight = 0.0;
        }
        removed
    }
}
