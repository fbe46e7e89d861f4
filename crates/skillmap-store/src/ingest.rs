//! Aggregation of raw per-item rows into course profiles

use crate::records::ProfileRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of `raw_courses.json`: a single syllabus item of a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RawCourseRow {
    /// Course identifier
    pub course_id: u64,

    /// Course name
    #[serde(default)]
    pub course_name: String,

    /// Course URL
    #[serde(default)]
    pub course_url: Option<String>,

    /// Course slug
    #[serde(default)]
    pub course_slug: Option<String>,

    /// Comma-separated topics
    #[serde(default)]
    pub topics: Option<String>,

    /// Item title
    #[serde(default)]
    pub item_title: Option<String>,

    /// Item body as plain text
    #[serde(default)]
    pub content_plaintext: Option<String>,
}

/// Group rows by course and concatenate their syllabus items
///
/// The first row of a course supplies its metadata. Each row with a title or
/// content adds a `### {title}\n{content}` part; parts are joined by blank
/// lines. Profiles come out sorted by course id.
///
/// # Examples
///
/// ```
/// use skillmap_store::{aggregate_profiles, RawCourseRow};
///
/// let row = |title: &str| RawCourseRow {
///     course_id: 7,
///     course_name: "Ship It".to_string(),
///     course_url: None,
///     course_slug: None,
///     topics: Some("AI".to_string()),
///     item_title: Some(title.to_string()),
///     content_plaintext: None,
/// };
///
/// let profiles = aggregate_profiles(vec![row("Week 1"), row("Week 2")]);
/// assert_eq!(profiles[0].syllabus_text, "### Week 1\n\n\n### Week 2\n");
/// ```
pub fn aggregate_profiles(rows: Vec<RawCourseRow>) -> Vec<ProfileRecord> {
    let mut courses: BTreeMap<u64, (ProfileRecord, Vec<String>)> = BTreeMap::new();

    for row in rows {
        let (_, parts) = courses.entry(row.course_id).or_insert_with(|| {
            (
                ProfileRecord {
                    course_id: row.course_id,
                    course_name: row.course_name.clone(),
                    course_url: row.course_url.clone().unwrap_or_default(),
                    course_slug: row.course_slug.clone().unwrap_or_default(),
                    topics: row.topics.clone().unwrap_or_default(),
                    syllabus_text: String::new(),
                },
                Vec::new(),
            )
        });

        let title = row.item_title.as_deref().unwrap_or_default();
        let content = row.content_plaintext.as_deref().unwrap_or_default();
        if !title.is_empty() || !content.is_empty() {
            parts.push(format!("### {}\n{}", title, content));
        }
    }

    tracing::debug!(courses = courses.len(), "Aggregated raw rows");

    courses
        .into_values()
        .map(|(mut profile, parts)| {
            profile.syllabus_text = parts.join("\n\n");
            profile
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, name: &str, title: Option<&str>, content: Option<&str>) -> RawCourseRow {
        RawCourseRow {
            course_id: id,
            course_name: name.to_string(),
            course_url: Some(format!("https://example.com/{}", id)),
            course_slug: Some(format!("course-{}", id)),
            topics: Some("AI, Prototyping".to_string()),
            item_title: title.map(str::to_string),
            content_plaintext: content.map(str::to_string),
        }
    }

    #[test]
    fn test_rows_grouped_and_sorted() {
        let profiles = aggregate_profiles(vec![
            row(20, "Later", Some("Intro"), Some("Hello")),
            row(10, "First", Some("Week 1"), Some("Cursor basics")),
            row(10, "Renamed", Some("Week 2"), Some("Shipping")),
        ]);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].course_id, 10);
        assert_eq!(profiles[0].course_name, "First");
        assert_eq!(
            profiles[0].syllabus_text,
            "### Week 1\nCursor basics\n\n### Week 2\nShipping"
        );
        assert_eq!(profiles[1].course_slug, "course-20");
    }

    #[test]
    fn test_empty_items_skipped() {
        let profiles = aggregate_profiles(vec![
            row(1, "A", None, None),
            row(1, "A", Some(""), Some("")),
            row(1, "A", None, Some("Only content")),
        ]);
        assert_eq!(profiles[0].syllabus_text, "### \nOnly content");
    }

    #[test]
    fn test_uppercase_field_names() {
        let row: RawCourseRow = serde_json::from_str(
            r#"{"COURSE_ID": 5, "COURSE_NAME": "X", "COURSE_URL": "u", "COURSE_SLUG": "s",
                "TOPICS": null, "ITEM_TITLE": "T", "CONTENT_PLAINTEXT": "C"}"#,
        )
        .unwrap();
        assert_eq!(row.course_id, 5);
        assert!(row.topics.is_none());

        let profiles = aggregate_profiles(vec![row]);
        assert_eq!(profiles[0].topics, "");
    }
}
