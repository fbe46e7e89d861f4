//! Batch pipeline: load once, apply stages in memory, save once.

use crate::cli::PathArgs;
use crate::config::Config;
use crate::error::Result;
use skillmap_assigner::{Assigner, AssignmentReport};
use skillmap_domain::{RunId, Snapshot, SnapshotStore, Stage};
use skillmap_evidence::{EvidenceValidator, ScreenReport, ToolCatalog, ToolScreen};
use skillmap_pruner::{PruneReport, Pruner};
use skillmap_store::{load_taxonomy, JsonStore, LoadReport};
use tracing::info;

/// Which stages a batch applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSelection {
    /// Assign, then validate tools, then prune
    All,
    /// Assignment only
    Assign,
    /// Tool validation only
    ValidateTools,
    /// Pruning only
    Prune,
}

impl StageSelection {
    fn assigns(self) -> bool {
        matches!(self, StageSelection::All | StageSelection::Assign)
    }

    fn validates(self) -> bool {
        matches!(self, StageSelection::All | StageSelection::ValidateTools)
    }

    fn prunes(self) -> bool {
        matches!(self, StageSelection::All | StageSelection::Prune)
    }
}

/// Everything one batch produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Run identifier shared by every stage report
    pub run: RunId,

    /// Whether the snapshot was left unwritten
    pub dry_run: bool,

    /// Boundary discards seen while loading
    pub load: LoadReport,

    /// Tags appended
    pub assignment: Option<AssignmentReport>,

    /// Tools removed
    pub screening: Option<ScreenReport>,

    /// Tags removed
    pub pruning: Option<PruneReport>,
}

/// The three engines, built from one configuration.
pub struct Pipeline {
    assigner: Assigner,
    screen: ToolScreen,
    pruner: Pruner,
    dry_run: bool,
}

impl Pipeline {
    /// Compile every rule table in `config`.
    ///
    /// The batch is dry when `dry_run` is set or either `[assign]` or
    /// `[prune]` asks for it. The engines themselves always run live; a dry
    /// batch only skips the save.
    pub fn from_config(config: &Config, dry_run: bool) -> Result<Self> {
        let assigner_config = config.assigner_config();
        let prune_config = config.prune_config();
        let dry_run = dry_run || assigner_config.dry_run || prune_config.dry_run;

        let assigner = Assigner::new(&assigner_config)?.with_dry_run(false);
        let catalog = ToolCatalog::build(&config.catalog_config())?;
        let pruner = Pruner::new(&prune_config)?.with_dry_run(false);

        Ok(Self {
            assigner,
            screen: ToolScreen::new(EvidenceValidator::new(catalog)),
            pruner,
            dry_run,
        })
    }

    /// Whether this pipeline leaves the store untouched.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply the selected stages to `snapshot` under one run id.
    ///
    /// Every stage mutates `snapshot` even in a dry run, so later stages see
    /// what earlier ones did; the caller keeps the result off disk. Reports
    /// of a dry run are flagged as such.
    pub fn apply(
        &self,
        snapshot: &mut Snapshot,
        stages: StageSelection,
        run: RunId,
    ) -> (Option<AssignmentReport>, Option<ScreenReport>, Option<PruneReport>) {
        let mut assignment = stages.assigns().then(|| self.assigner.apply(snapshot, run));
        let screening = stages.validates().then(|| self.screen.apply(snapshot, run));
        let mut pruning = stages.prunes().then(|| self.pruner.apply(snapshot, run));

        if self.dry_run {
            if let Some(report) = assignment.as_mut() {
                report.dry_run = true;
            }
            if let Some(report) = pruning.as_mut() {
                report.dry_run = true;
            }
        }
        (assignment, screening, pruning)
    }

    /// Load from `store`, apply the selected stages and save unless dry.
    pub fn run_batch(&self, store: &JsonStore, stages: StageSelection) -> Result<BatchReport> {
        let run = RunId::new();
        let (mut snapshot, load) = store.load_with_report()?;
        info!(run = %run, stages = ?stages, courses = snapshot.len(), "Batch started");

        let (assignment, screening, pruning) = self.apply(&mut snapshot, stages, run);

        if self.dry_run {
            info!(run = %run, "DRY RUN: snapshot not written");
        } else {
            store.save(&snapshot)?;
            info!(run = %run, output = %store.output_path().display(), "Snapshot written");
        }

        Ok(BatchReport {
            run,
            dry_run: self.dry_run,
            load,
            assignment,
            screening,
            pruning,
        })
    }
}

/// Build the store from the configured paths with command-line overrides.
pub fn open_store(config: &Config, overrides: &PathArgs) -> Result<JsonStore> {
    let paths = &config.paths;
    let mappings = overrides.mappings.clone().unwrap_or_else(|| paths.mappings.clone());
    let profiles = overrides.profiles.clone().unwrap_or_else(|| paths.profiles.clone());

    let mut store = JsonStore::new(mappings, profiles);
    if let Some(output) = overrides.output.as_ref().or(paths.output.as_ref()) {
        store = store.with_output(output);
    }
    if let Some(taxonomy) = overrides.taxonomy.as_ref().or(paths.taxonomy.as_ref()) {
        store = store.with_taxonomy(load_taxonomy(taxonomy)?);
    }
    Ok(store)
}
