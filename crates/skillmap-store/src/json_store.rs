//! JSON-file implementation of [`SnapshotStore`]

use crate::records::{read_json, write_json_atomic, MappingRecord, ProfileRecord, SkillRecord};
use crate::StoreError;
use skillmap_domain::{
    CourseId, CourseProfile, CourseRecord, Snapshot, SnapshotStore, Tag, TagCode, TagSet,
    Taxonomy, ToolAssignment, Weight,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What the boundary discarded while loading
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Mapping entries read
    pub mappings_read: usize,

    /// Profile entries read
    pub profiles_read: usize,

    /// Codes that are malformed or not in the taxonomy
    pub discarded_codes: Vec<(CourseId, String)>,

    /// Tags whose weight is neither primary nor secondary
    pub discarded_weights: Vec<(CourseId, String, f64)>,

    /// Second and later tags for a code already held by the course
    pub duplicate_codes: Vec<(CourseId, TagCode)>,

    /// Mapping entries repeating an earlier course id
    pub duplicate_courses: Vec<CourseId>,

    /// Courses with a mapping but no profile
    pub missing_profiles: Vec<CourseId>,
}

impl LoadReport {
    /// Number of entries dropped at the boundary
    pub fn total_discarded(&self) -> usize {
        self.discarded_codes.len()
            + self.discarded_weights.len()
            + self.duplicate_codes.len()
            + self.duplicate_courses.len()
    }

    /// Whether nothing was dropped and every course has a profile
    pub fn is_clean(&self) -> bool {
        self.total_discarded() == 0 && self.missing_profiles.is_empty()
    }

    /// Plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Mappings read: {}", self.mappings_read),
            format!("Profiles read: {}", self.profiles_read),
        ];
        if !self.discarded_codes.is_empty() {
            lines.push(format!("Discarded codes: {}", self.discarded_codes.len()));
        }
        if !self.discarded_weights.is_empty() {
            lines.push(format!("Discarded weights: {}", self.discarded_weights.len()));
        }
        if !self.duplicate_codes.is_empty() {
            lines.push(format!("Duplicate codes: {}", self.duplicate_codes.len()));
        }
        if !self.duplicate_courses.is_empty() {
            lines.push(format!("Duplicate courses: {}", self.duplicate_courses.len()));
        }
        if !self.missing_profiles.is_empty() {
            lines.push(format!("Courses without profile: {}", self.missing_profiles.len()));
        }
        lines.join("\n")
    }
}

/// Snapshot store backed by the upstream JSON files
///
/// Reads `course_skill_mappings.json` and `course_profiles.json` once and
/// writes the mutated mappings once. Profiles are never written back.
///
/// # Examples
///
/// ```no_run
/// use skillmap_domain::SnapshotStore;
/// use skillmap_store::JsonStore;
///
/// let store = JsonStore::new("data/course_skill_mappings.json", "data/course_profiles.json")
///     .with_output("data/course_skill_mappings.pruned.json");
/// let (snapshot, report) = store.load_with_report().unwrap();
/// println!("{}", report.summary());
/// store.save(&snapshot).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    mappings_path: PathBuf,
    profiles_path: PathBuf,
    output_path: Option<PathBuf>,
    taxonomy: Option<Taxonomy>,
}

impl JsonStore {
    /// Store reading and writing the given files
    pub fn new(mappings: impl Into<PathBuf>, profiles: impl Into<PathBuf>) -> Self {
        Self {
            mappings_path: mappings.into(),
            profiles_path: profiles.into(),
            output_path: None,
            taxonomy: None,
        }
    }

    /// Write to a different file than the one read
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output.into());
        self
    }

    /// Discard codes not defined in `taxonomy` at load time
    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// File the mappings are read from
    pub fn mappings_path(&self) -> &Path {
        &self.mappings_path
    }

    /// File the profiles are read from
    pub fn profiles_path(&self) -> &Path {
        &self.profiles_path
    }

    /// File the snapshot is written to
    pub fn output_path(&self) -> &Path {
        self.output_path.as_deref().unwrap_or(&self.mappings_path)
    }

    /// Load the snapshot and report what the boundary discarded
    pub fn load_with_report(&self) -> Result<(Snapshot, LoadReport), StoreError> {
        let mappings: Vec<MappingRecord> = read_json(&self.mappings_path)?;
        let profiles: Vec<ProfileRecord> = read_json(&self.profiles_path)?;

        let mut report = LoadReport {
            mappings_read: mappings.len(),
            profiles_read: profiles.len(),
            ..LoadReport::default()
        };

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let id = CourseId::new(mapping.course_id);
            if !seen.insert(id) {
                tracing::warn!(course = %id, "Duplicate mapping entry discarded");
                report.duplicate_courses.push(id);
                continue;
            }
            records.push(self.to_record(mapping, &mut report));
        }

        let snapshot = Snapshot::from_parts(records, profiles.into_iter().map(CourseProfile::from));
        report.missing_profiles = snapshot.missing_profiles();
        if !report.missing_profiles.is_empty() {
            tracing::warn!(
                count = report.missing_profiles.len(),
                "Courses without profile will be evaluated against empty text"
            );
        }

        tracing::info!(
            courses = snapshot.len(),
            discarded = report.total_discarded(),
            "Snapshot loaded"
        );
        Ok((snapshot, report))
    }

    fn to_record(&self, mapping: MappingRecord, report: &mut LoadReport) -> CourseRecord {
        let id = CourseId::new(mapping.course_id);

        let raw: Vec<SkillRecord> = match mapping.skills {
            Some(skills) => skills,
            None => {
                let primary = mapping.primary_skills.unwrap_or_default().into_iter().map(|code| SkillRecord {
                    code,
                    weight: Weight::Primary.value(),
                });
                let secondary = mapping.secondary_skills.unwrap_or_default().into_iter().map(|code| SkillRecord {
                    code,
                    weight: Weight::Secondary.value(),
                });
                primary.chain(secondary).collect()
            }
        };

        let mut tags = Vec::with_capacity(raw.len());
        for skill in raw {
            let Some(code) = self.accept_code(&skill.code) else {
                tracing::warn!(course = %id, code = %skill.code, "Unknown tag code discarded");
                report.discarded_codes.push((id, skill.code));
                continue;
            };
            let Some(weight) = Weight::from_value(skill.weight) else {
                tracing::warn!(course = %id, code = %code, weight = skill.weight, "Unsupported weight discarded");
                report.discarded_weights.push((id, skill.code, skill.weight));
                continue;
            };
            tags.push(Tag::new(code, weight));
        }

        let (tags, duplicates) = TagSet::from_tags(tags);
        for tag in duplicates {
            tracing::warn!(course = %id, code = %tag.code, "Duplicate tag code discarded");
            report.duplicate_codes.push((id, tag.code));
        }

        let mut record = CourseRecord::new(id, mapping.course_name);
        record.tags = tags;
        record.tools = ToolAssignment::new(mapping.tools, mapping.tool_weight);
        record.reasoning = mapping.reasoning;
        record
    }

    fn accept_code(&self, raw: &str) -> Option<TagCode> {
        let code = TagCode::parse(raw.trim())?;
        match &self.taxonomy {
            Some(taxonomy) if !taxonomy.contains(code) => None,
            _ => Some(code),
        }
    }
}

/// Mapping entry for one record, with the weighted list and both code lists
pub fn to_mapping_record(record: &CourseRecord) -> MappingRecord {
    let codes_at = |weight: Weight| -> Vec<String> {
        record
            .tags
            .iter()
            .filter(|t| t.weight == weight)
            .map(|t| t.code.to_string())
            .collect()
    };

    MappingRecord {
        course_id: record.id.value(),
        course_name: record.name.clone(),
        skills: Some(
            record
                .tags
                .iter()
                .map(|t| SkillRecord {
                    code: t.code.to_string(),
                    weight: t.weight.value(),
                })
                .collect(),
        ),
        primary_skills: Some(codes_at(Weight::Primary)),
        secondary_skills: Some(codes_at(Weight::Secondary)),
        reasoning: record.reasoning.clone(),
        tools: record.tools.tools().to_vec(),
        tool_weight: record.tools.tool_weight(),
    }
}

impl SnapshotStore for JsonStore {
    type Error = StoreError;

    fn load(&self) -> Result<Snapshot, StoreError> {
        self.load_with_report().map(|(snapshot, _)| snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let records: Vec<MappingRecord> = snapshot.records().iter().map(to_mapping_record).collect();
        write_json_atomic(self.output_path(), &records)?;
        tracing::info!(
            path = %self.output_path().display(),
            courses = records.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}
