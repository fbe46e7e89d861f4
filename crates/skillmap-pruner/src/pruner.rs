//! Core pruning engine

use crate::rule::{evaluate, PruneRule};
use crate::{PruneConfig, PruneReport, PrunerError, TagRemoval};
use skillmap_domain::{CourseProfile, CourseRecord, RunId, Snapshot, Stage};

/// Rule-driven engine that strips tags lacking course-level justification
///
/// Rules run in order; each one sees the tag list left by the ones before it.
///
/// # Examples
///
/// ```
/// use skillmap_domain::{CourseId, CourseProfile, CourseRecord, RunId, Snapshot, Stage, Tag, TagCode, Weight};
/// use skillmap_pruner::Pruner;
///
/// let mut record = CourseRecord::new(CourseId::new(1), "Watercolor Basics");
/// record.tags.insert_if_absent(Tag::new(TagCode::parse("A1").unwrap(), Weight::Primary));
/// let mut snapshot = Snapshot::from_parts(vec![record], Vec::<CourseProfile>::new());
///
/// let pruner = Pruner::builtin().unwrap();
/// let report = pruner.apply(&mut snapshot, RunId::new());
///
/// assert_eq!(report.total_removed(), 1);
/// assert!(snapshot.records()[0].tags.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Pruner {
    rules: Vec<PruneRule>,
    dry_run: bool,
}

impl Pruner {
    /// Validate and compile a configuration
    pub fn new(config: &PruneConfig) -> Result<Self, PrunerError> {
        config.validate()?;
        let rules = config
            .rules
            .iter()
            .map(PruneRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            dry_run: config.dry_run,
        })
    }

    /// Pruner with the default rule set
    pub fn builtin() -> Result<Self, PrunerError> {
        Self::new(&PruneConfig::default())
    }

    /// Compiled rules in evaluation order
    pub fn rules(&self) -> &[PruneRule] {
        &self.rules
    }

    /// Whether this pruner leaves the snapshot untouched
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Switch dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Fold every rule over one course, returning its removals
    ///
    /// The record is mutated in place; callers wanting a dry run pass a copy.
    pub fn prune_course(
        &self,
        record: &mut CourseRecord,
        profile: &CourseProfile,
        report: &mut PruneReport,
    ) -> usize {
        let mut removed = 0;

        for rule in &self.rules {
            let outcome = evaluate(record, profile, rule);
            report.record_kept(&rule.name, outcome.kept.len());
            if outcome.is_empty() {
                continue;
            }

            for removal in &outcome.removals {
                tracing::debug!(
                    course = %record.id,
                    tag = %removal.tag,
                    rule = %rule.name,
                    "Removing unjustified tag"
                );
                report.record_removal(TagRemoval {
                    course_id: record.id,
                    course_name: record.name.clone(),
                    tag: removal.tag,
                    rule: rule.name.clone(),
                    signal: removal.signal.clone(),
                });
            }
            removed += outcome.removals.len();
            outcome.apply_to(record);
        }

        removed
    }
}

impl Stage for Pruner {
    type Report = PruneReport;

    fn name(&self) -> &'static str {
        "prune"
    }

    fn apply(&self, snapshot: &mut Snapshot, run: RunId) -> PruneReport {
        let mut report = PruneReport::new(run, self.dry_run);

        snapshot.for_each_course(|record, profile| {
            report.courses_checked += 1;

            let removed = if self.dry_run {
                let mut scratch = record.clone();
                self.prune_course(&mut scratch, profile, &mut report)
            } else {
                self.prune_course(record, profile, &mut report)
            };

            if removed > 0 {
                report.courses_modified += 1;
            }
        });

        if self.dry_run {
            tracing::info!(
                run = %run,
                removals = report.total_removed(),
                "DRY RUN: prune computed without changes"
            );
        } else {
            tracing::info!(
                run = %run,
                checked = report.courses_checked,
                modified = report.courses_modified,
                removals = report.total_removed(),
                "Prune complete"
            );
        }

        report
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use skillmap_domain::{CourseId, Tag, TagCode, TagSet, Weight};

    fn arb_tags() -> impl Strategy<Value = Vec<Tag>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!['A', 'B', 'C', 'E']),
                0u8..6,
                any::<bool>(),
            ),
            0..8,
        )
        .prop_map(|items| {
            items
                .into_iter()
                .filter_map(|(letter, digit, primary)| {
                    let code = TagCode::parse(&format!("{}{}", letter, digit))?;
                    let weight = if primary { Weight::Primary } else { Weight::Secondary };
                    Some(Tag::new(code, weight))
                })
                .collect()
        })
    }

    proptest! {
        /// Property: a secondary tag sharing a category with a surviving primary is never removed
        #[test]
        fn test_secondary_protected_by_primary(tags in arb_tags()) {
            let mut record = CourseRecord::new(CourseId::new(1), "Untitled");
            record.tags = TagSet::from_tags(tags).0;
            let original = record.tags.clone();
            let mut snapshot = Snapshot::from_parts(vec![record], Vec::<CourseProfile>::new());

            Pruner::builtin().unwrap().apply(&mut snapshot, RunId::new());

            let result = &snapshot.records()[0].tags;
            for primary in result.iter().filter(|t| t.weight == Weight::Primary) {
                let category = primary.code.category();
                for secondary in original.matching(category, Weight::Secondary) {
                    prop_assert!(result.contains(secondary.code, Weight::Secondary));
                }
            }
        }

        /// Property: pruning only removes, and a second pass removes nothing
        #[test]
        fn test_prune_only_removes(tags in arb_tags()) {
            let mut record = CourseRecord::new(CourseId::new(1), "Untitled");
            record.tags = TagSet::from_tags(tags).0;
            let original = record.tags.clone();
            let mut snapshot = Snapshot::from_parts(vec![record], Vec::<CourseProfile>::new());
            let pruner = Pruner::builtin().unwrap();

            pruner.apply(&mut snapshot, RunId::new());
            for tag in snapshot.records()[0].tags.iter() {
                prop_assert!(original.contains(tag.code, tag.weight));
            }

            let second = pruner.apply(&mut snapshot, RunId::new());
            prop_assert_eq!(second.total_removed(), 0);
        }
    }
}
