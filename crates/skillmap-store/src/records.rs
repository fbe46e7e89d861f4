//! On-disk record shapes and JSON file helpers

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use skillmap_domain::{CourseId, CourseProfile};
use std::fs;
use std::path::{Path, PathBuf};

/// One (code, weight) entry of a mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Tag code as written upstream
    pub code: String,

    /// Numeric weight as written upstream
    pub weight: f64,
}

/// One entry of `course_skill_mappings.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Course identifier
    pub course_id: u64,

    /// Course name
    #[serde(default)]
    pub course_name: String,

    /// Weighted tags; absent in files written before weights existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillRecord>>,

    /// Codes at primary weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_skills: Option<Vec<String>>,

    /// Codes at secondary weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_skills: Option<Vec<String>>,

    /// Classifier reasoning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Detected tools
    #[serde(default)]
    pub tools: Vec<String>,

    /// Course-level tool weight
    #[serde(default)]
    pub tool_weight: f64,
}

/// One entry of `course_profiles.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Course identifier
    pub course_id: u64,

    /// Course name
    #[serde(default)]
    pub course_name: String,

    /// Course URL
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course_url: String,

    /// Course slug
    #[serde(default, deserialize_with = "null_as_empty")]
    pub course_slug: String,

    /// Comma-separated topics
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: String,

    /// Concatenated syllabus text
    #[serde(default, deserialize_with = "null_as_empty")]
    pub syllabus_text: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ProfileRecord> for CourseProfile {
    fn from(record: ProfileRecord) -> Self {
        CourseProfile {
            id: CourseId::new(record.course_id),
            name: record.course_name,
            url: record.course_url,
            slug: record.course_slug,
            topics: CourseProfile::parse_topics(&record.topics),
            text: record.syllabus_text,
        }
    }
}

impl From<&CourseProfile> for ProfileRecord {
    fn from(profile: &CourseProfile) -> Self {
        ProfileRecord {
            course_id: profile.id.value(),
            course_name: profile.name.clone(),
            course_url: profile.url.clone(),
            course_slug: profile.slug.clone(),
            topics: profile.topics_label(),
            syllabus_text: profile.text.clone(),
        }
    }
}

/// Read a JSON file into `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| StoreError::json(path, e))
}

/// Write `value` as pretty JSON through a sibling temporary file
///
/// The target is replaced by a rename, so readers never see a partial file.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(path, e))?;
    text.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let tmp = temp_sibling(path);
    fs::write(&tmp, text).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, e)
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_nulls_become_empty() {
        let record: ProfileRecord = serde_json::from_str(
            r#"{"course_id": 3, "course_name": "X", "course_url": null, "topics": null}"#,
        )
        .unwrap();
        assert_eq!(record.course_url, "");
        assert_eq!(record.topics, "");
        assert_eq!(record.syllabus_text, "");
    }

    #[test]
    fn test_profile_conversion_splits_topics() {
        let record = ProfileRecord {
            course_id: 9,
            course_name: "Ship".to_string(),
            course_url: "https://example.com/ship".to_string(),
            course_slug: "ship".to_string(),
            topics: "AI, Prototyping".to_string(),
            syllabus_text: "### Week 1\nIntro".to_string(),
        };
        let profile = CourseProfile::from(record.clone());
        assert_eq!(profile.topics.len(), 2);
        assert_eq!(ProfileRecord::from(&profile), record);
    }

    #[test]
    fn test_mapping_optional_fields_omitted() {
        let record: MappingRecord =
            serde_json::from_str(r#"{"course_id": 1, "course_name": "A"}"#).unwrap();
        assert!(record.skills.is_none());
        assert!(record.tools.is_empty());

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("skills"));
        assert!(json.contains("\"tool_weight\":0.0"));
    }

    #[test]
    fn test_temp_sibling_is_hidden() {
        let tmp = temp_sibling(Path::new("/data/out.json"));
        assert_eq!(tmp, PathBuf::from("/data/.out.json.tmp"));
    }
}
