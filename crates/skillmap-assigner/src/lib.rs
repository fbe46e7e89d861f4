//! Skillmap Assigner
//!
//! Derives new weighted tags from signals already present in a snapshot,
//! without calling any external classifier.
//!
//! # Overview
//!
//! Each [`AssignmentRule`] targets one tag code. For every course that does
//! not hold the code yet:
//!
//! - **Primary** (0.8) when a course topic is in the strong-topic set, the
//!   course name matches a name pattern, or enough catalog tools are
//!   assigned at a high enough tool weight
//! - **Secondary** (0.3) when none of these hold but at least one catalog
//!   tool is assigned
//! - nothing otherwise
//!
//! Tags are only appended, so running the [`Assigner`] twice adds nothing
//! the second time. Every decision is listed in the [`AssignmentReport`]
//! together with all of the signals that held.
//!
//! # Example Usage
//!
//! ```
//! use skillmap_assigner::{AssignerConfig, Assigner};
//!
//! let config = AssignerConfig::from_toml(r#"
//!     [[rules]]
//!     name = "prototyping"
//!     code = "A5"
//!     strong_topics = ["Prototyping", "Coding with AI"]
//!     name_patterns = ['vibe\s*cod', 'prototyp']
//!     tools = ["Cursor", "Bolt", "v0"]
//! "#).unwrap();
//!
//! let assigner = Assigner::new(&config).unwrap();
//! assert_eq!(assigner.rules().len(), 1);
//! ```

#![warn(missing_docs)]

mod assigner;
mod config;
mod error;
mod types;

pub use assigner::{Assigner, AssignmentRule};
pub use config::{AssignerConfig, AssignmentRuleConfig};
pub use error::AssignerError;
pub use types::{AssignmentReport, Decision, Signal};
