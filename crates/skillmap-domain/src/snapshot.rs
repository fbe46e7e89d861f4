//! Snapshot module - the in-memory store every stage reads and mutates

use crate::{CourseId, CourseProfile, CourseRecord};
use std::borrow::Cow;
use std::collections::HashMap;

/// Full in-memory state of one batch: label records plus text profiles
///
/// Records keep their load order. Profiles are a joined lookup table; a
/// record without a profile is evaluated against [`CourseProfile::empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    records: Vec<CourseRecord>,
    profiles: HashMap<CourseId, CourseProfile>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from records and profiles
    pub fn from_parts<I>(records: Vec<CourseRecord>, profiles: I) -> Self
    where
        I: IntoIterator<Item = CourseProfile>,
    {
        Self {
            records,
            profiles: profiles.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Append a record
    pub fn push_record(&mut self, record: CourseRecord) {
        self.records.push(record);
    }

    /// Add or replace a profile
    pub fn insert_profile(&mut self, profile: CourseProfile) {
        self.profiles.insert(profile.id, profile);
    }

    /// All records in load order
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    /// Mutable access to records
    pub fn records_mut(&mut self) -> &mut [CourseRecord] {
        &mut self.records
    }

    /// Find a record by id
    pub fn record(&self, id: CourseId) -> Option<&CourseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Profile for a course, or the empty default when absent
    pub fn profile(&self, id: CourseId) -> Cow<'_, CourseProfile> {
        match self.profiles.get(&id) {
            Some(profile) => Cow::Borrowed(profile),
            None => Cow::Owned(CourseProfile::empty(id)),
        }
    }

    /// Whether a real profile exists for the course
    pub fn has_profile(&self, id: CourseId) -> bool {
        self.profiles.contains_key(&id)
    }

    /// Records whose profile is missing from the joined table
    pub fn missing_profiles(&self) -> Vec<CourseId> {
        self.records
            .iter()
            .map(|r| r.id)
            .filter(|id| !self.profiles.contains_key(id))
            .collect()
    }

    /// Visit every record mutably together with its (possibly default) profile
    pub fn for_each_course<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut CourseRecord, &CourseProfile),
    {
        let profiles = &self.profiles;
        for record in &mut self.records {
            match profiles.get(&record.id) {
                Some(profile) => visit(record, profile),
                None => {
                    let empty = CourseProfile::empty(record.id);
                    visit(record, &empty);
                }
            }
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u64, text: &str) -> CourseProfile {
        let mut p = CourseProfile::empty(CourseId::new(id));
        p.text = text.to_string();
        p
    }

    #[test]
    fn test_missing_profile_defaults_to_empty() {
        let snapshot = Snapshot::from_parts(
            vec![CourseRecord::new(CourseId::new(1), "a"), CourseRecord::new(CourseId::new(2), "b")],
            vec![profile(1, "some text")],
        );

        assert_eq!(snapshot.profile(CourseId::new(1)).text, "some text");
        assert!(snapshot.profile(CourseId::new(2)).text.is_empty());
        assert_eq!(snapshot.missing_profiles(), vec![CourseId::new(2)]);
    }

    #[test]
    fn test_for_each_course_visits_all_records() {
        let mut snapshot = Snapshot::from_parts(
            vec![CourseRecord::new(CourseId::new(1), "a"), CourseRecord::new(CourseId::new(2), "b")],
            vec![profile(2, "text")],
        );

        let mut seen = Vec::new();
        snapshot.for_each_course(|record, profile| {
            record.reasoning = Some(profile.text.clone());
            seen.push(record.id.value());
        });

        assert_eq!(seen, vec![1, 2]);
        assert_eq!(snapshot.records()[0].reasoning.as_deref(), Some(""));
        assert_eq!(snapshot.records()[1].reasoning.as_deref(), Some("text"));
    }
}
