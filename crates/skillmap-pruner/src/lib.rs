//! Skillmap Pruner
//!
//! Rule-driven removal of tags that lack course-level justification.
//!
//! # Overview
//!
//! Each [`PruneRule`] targets one (code, weight) pair, or every code of a
//! category at one weight, and lists keep conditions:
//! - another code of the same category held at primary weight
//! - the course topic set intersecting a supporting set
//! - the course topic set intersecting several sets at once
//! - a keyword in the course name
//! - a tool present in the course's tool list
//!
//! A targeted tag is removed unless a condition holds. Secondary tags are
//! always kept while another code of their category is primary.
//!
//! # Rule evaluation
//!
//! [`evaluate`] is a pure function of one course and one rule. The
//! [`Pruner`] folds its rules over every course in order. A category rule
//! judges all of its targets against the same starting state.
//!
//! # Configuration
//!
//! Rules can be declared in TOML:
//!
//! ```toml
//! dry_run = false
//!
//! [[rules]]
//! name = "design-secondary"
//! target = "E1"
//! weight = "secondary"
//! keep = [
//!     { topics_any = ["Design", "UX"] },
//!     { name_keywords = ["design", "figma"] },
//!     { tool_present = "Figma" },
//! ]
//!
//! [[rules]]
//! name = "technical-secondary"
//! target = "B*"
//! weight = "0.3"
//! keep = ["category_primary", { topics_any = ["Programming"] }]
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pruner;
mod report;
mod rule;

pub use config::{
    design_topics, product_ai_topics, technical_ai_topics, KeepCondition, PruneConfig,
    PruneRuleConfig,
};
pub use error::PrunerError;
pub use pruner::Pruner;
pub use report::{PruneReport, TagRemoval};
pub use rule::{evaluate, KeepReason, PruneRule, Removal, RuleOutcome, RuleTarget};
