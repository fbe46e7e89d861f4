//! Taxonomy markdown parser and `taxonomy.json` reader/writer

use crate::records::{read_json, write_json_atomic};
use crate::StoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use skillmap_domain::{TagCode, Taxonomy, TaxonomyEntry};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// One entry of `taxonomy.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    /// Two-character code
    pub skill_code: String,

    /// Skill name
    pub skill_name: String,

    /// Category name
    #[serde(default)]
    pub category: String,

    /// First paragraph under the skill header
    #[serde(default)]
    pub description: String,

    /// Bullet items under the skill header
    #[serde(default)]
    pub example_topics: Vec<String>,
}

impl From<&TaxonomyEntry> for TaxonomyRecord {
    fn from(entry: &TaxonomyEntry) -> Self {
        Self {
            skill_code: entry.code.to_string(),
            skill_name: entry.name.clone(),
            category: entry.category.clone(),
            description: entry.description.clone(),
            example_topics: entry.example_topics.clone(),
        }
    }
}

/// `# X. Category` and `## X9. Skill` header patterns
static HEADERS: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();

fn get_headers() -> Option<&'static (Regex, Regex)> {
    HEADERS
        .get_or_init(|| {
            match (
                Regex::new(r"^# ([A-Z])\. (.+)$"),
                Regex::new(r"^## ([A-Z]\d)\. (.+)$"),
            ) {
                (Ok(category), Ok(skill)) => Some((category, skill)),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(error = %e, "Failed to compile taxonomy header regex");
                    None
                }
            }
        })
        .as_ref()
}

struct Section {
    code: TagCode,
    name: String,
    lines: Vec<String>,
}

/// Parse the taxonomy markdown document
///
/// `# X. Category` lines name categories and `## X9. Skill` lines open
/// skills. A skill's section runs to the next level-one or level-two
/// header; its first paragraph is the description and its `- ` / `* `
/// bullets are the example topics. Level-two headers that are not skill
/// headers are skipped along with their text.
///
/// # Examples
///
/// ```
/// use skillmap_store::parse_taxonomy;
///
/// let taxonomy = parse_taxonomy("# A. AI Product\n\n## A1. Strategy\nDefine the bet.\n\n- Roadmaps\n");
/// let code = "A1".parse().unwrap();
/// assert_eq!(taxonomy.get(code).unwrap().category, "AI Product");
/// assert_eq!(taxonomy.get(code).unwrap().example_topics, vec!["Roadmaps"]);
/// ```
pub fn parse_taxonomy(markdown: &str) -> Taxonomy {
    let Some((category_header, skill_header)) = get_headers() else {
        return Taxonomy::new();
    };

    let mut categories: HashMap<char, String> = HashMap::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for line in markdown.lines() {
        let line = line.trim_end();

        if let Some(caps) = category_header.captures(line) {
            sections.extend(current.take());
            if let Some(letter) = caps[1].chars().next() {
                categories.insert(letter, caps[2].trim().to_string());
            }
            continue;
        }

        if let Some(caps) = skill_header.captures(line) {
            sections.extend(current.take());
            current = TagCode::parse(&caps[1]).map(|code| Section {
                code,
                name: caps[2].trim().to_string(),
                lines: Vec::new(),
            });
            continue;
        }

        if line.starts_with("# ") || line.starts_with("## ") {
            sections.extend(current.take());
            tracing::debug!(header = %line, "Skipping malformed taxonomy header");
            continue;
        }

        if let Some(section) = current.as_mut() {
            section.lines.push(line.to_string());
        }
    }
    sections.extend(current);

    sections
        .into_iter()
        .map(|section| {
            let body = section.lines.join("\n");
            let body = body.trim();
            let description = body.split("\n\n").next().unwrap_or_default().trim().to_string();
            let example_topics = body
                .lines()
                .map(str::trim)
                .filter_map(|l| l.strip_prefix("- ").or_else(|| l.strip_prefix("* ")))
                .map(|t| t.trim().to_string())
                .collect();

            TaxonomyEntry {
                code: section.code,
                name: section.name,
                category: categories
                    .get(&section.code.category())
                    .cloned()
                    .unwrap_or_default(),
                description,
                example_topics,
            }
        })
        .collect()
}

/// Read a taxonomy from `taxonomy.json`, skipping entries with invalid codes
pub fn read_taxonomy_json(path: &Path) -> Result<Taxonomy, StoreError> {
    let records: Vec<TaxonomyRecord> = read_json(path)?;
    Ok(records
        .into_iter()
        .filter_map(|record| {
            let Some(code) = TagCode::parse(record.skill_code.trim()) else {
                tracing::debug!(code = %record.skill_code, "Skipping taxonomy entry with invalid code");
                return None;
            };
            Some(TaxonomyEntry {
                code,
                name: record.skill_name,
                category: record.category,
                description: record.description,
                example_topics: record.example_topics,
            })
        })
        .collect())
}

/// Write a taxonomy as `taxonomy.json`
pub fn write_taxonomy_json(path: &Path, taxonomy: &Taxonomy) -> Result<(), StoreError> {
    let records: Vec<TaxonomyRecord> = taxonomy.iter().map(TaxonomyRecord::from).collect();
    write_json_atomic(path, &records)
}

/// Load a taxonomy from a markdown (`.md`) or JSON (`.json`) file
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, StoreError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") | Some("markdown") => {
            let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
            Ok(parse_taxonomy(&text))
        }
        Some("json") => read_taxonomy_json(path),
        _ => Err(StoreError::Taxonomy(format!(
            "unsupported taxonomy file '{}': expected .md or .json",
            path.display()
        ))),
    }
}
