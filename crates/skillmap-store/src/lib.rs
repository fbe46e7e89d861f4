//! Skillmap Storage Layer
//!
//! Implements the [`SnapshotStore`](skillmap_domain::SnapshotStore) trait
//! over the JSON files of the upstream pipeline, plus the boundary adapters
//! that produce those files.
//!
//! # Architecture
//!
//! - `course_skill_mappings.json` holds tags and tools per course; it is
//!   read once and written once per batch, through a temporary file
//! - `course_profiles.json` holds topics and syllabus text; it is read only
//! - Invalid codes, unsupported weights and duplicate codes are dropped at
//!   load time and counted in a [`LoadReport`]
//! - [`aggregate_profiles`] turns raw per-item rows into profiles
//! - [`parse_taxonomy`] turns the taxonomy markdown into a
//!   [`Taxonomy`](skillmap_domain::Taxonomy)
//!
//! # Examples
//!
//! ```no_run
//! use skillmap_domain::SnapshotStore;
//! use skillmap_store::JsonStore;
//!
//! let store = JsonStore::new("data/course_skill_mappings.json", "data/course_profiles.json");
//! let snapshot = store.load().unwrap();
//! // Mutate, then write back once
//! store.save(&snapshot).unwrap();
//! ```

#![warn(missing_docs)]

mod error;
mod ingest;
mod json_store;
mod records;
mod taxonomy;

pub use error::StoreError;
pub use ingest::{aggregate_profiles, RawCourseRow};
pub use json_store::{to_mapping_record, JsonStore, LoadReport};
pub use records::{read_json, write_json_atomic, MappingRecord, ProfileRecord, SkillRecord};
pub use taxonomy::{
    load_taxonomy, parse_taxonomy, read_taxonomy_json, write_taxonomy_json, TaxonomyRecord,
};
