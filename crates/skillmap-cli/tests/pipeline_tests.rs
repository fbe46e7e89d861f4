//! End-to-end tests for the batch pipeline against files on disk.

use skillmap_cli::cli::PathArgs;
use skillmap_cli::{open_store, Config, Pipeline, StageSelection};
use skillmap_store::{read_json, MappingRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MAPPINGS: &str = r#"[
  {
    "course_id": 1,
    "course_name": "Vibe Coding for Product Managers",
    "skills": [
      {"code": "A1", "weight": 0.3},
      {"code": "E1", "weight": 0.3},
      {"code": "B2", "weight": 0.3}
    ],
    "tools": ["Cursor", "Bolt", "Zapier"],
    "tool_weight": 0.8
  },
  {
    "course_id": 2,
    "course_name": "Intro to Baking",
    "primary_skills": ["C1"],
    "secondary_skills": ["E1"],
    "tools": []
  },
  {
    "course_id": 3,
    "course_name": "Design Systems",
    "skills": [{"code": "E1", "weight": 0.3}, {"code": "E2", "weight": 0.8}],
    "tools": ["Figma"],
    "tool_weight": 0.3
  }
]"#;

const PROFILES: &str = r#"[
  {
    "course_id": 1,
    "course_name": "Vibe Coding for Product Managers",
    "course_url": "https://example.com/1",
    "course_slug": "vibe-coding",
    "topics": "Prototyping, Product Management",
    "syllabus_text": "Open the Cursor app. Move the cursor position with your mouse. Nuts and bolts of shipping."
  },
  {
    "course_id": 2,
    "course_name": "Intro to Baking",
    "course_url": "https://example.com/2",
    "course_slug": "intro-to-baking",
    "topics": "",
    "syllabus_text": "Flour, water, salt."
  },
  {
    "course_id": 3,
    "course_name": "Design Systems",
    "course_url": "https://example.com/3",
    "course_slug": "design-systems",
    "topics": "Design",
    "syllabus_text": "Build components in Figma."
  }
]"#;

struct Fixture {
    _dir: TempDir,
    mappings: PathBuf,
    output: PathBuf,
    config: Config,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let mappings = dir.path().join("course_skill_mappings.json");
    let profiles = dir.path().join("course_profiles.json");
    let output = dir.path().join("out").join("course_skill_mappings.json");
    fs::write(&mappings, MAPPINGS).unwrap();
    fs::write(&profiles, PROFILES).unwrap();

    let mut config = Config::default();
    config.paths.mappings = mappings.clone();
    config.paths.profiles = profiles;
    config.paths.output = Some(output.clone());

    Fixture {
        _dir: dir,
        mappings,
        output,
        config,
    }
}

fn saved(path: &Path) -> Vec<MappingRecord> {
    read_json(path).unwrap()
}

fn codes(record: &MappingRecord) -> Vec<String> {
    record
        .skills
        .as_ref()
        .unwrap()
        .iter()
        .map(|s| format!("{}@{}", s.code, s.weight))
        .collect()
}

#[test]
fn test_run_applies_every_stage() {
    let fx = fixture();
    let store = open_store(&fx.config, &PathArgs::default()).unwrap();
    let pipeline = Pipeline::from_config(&fx.config, false).unwrap();

    let report = pipeline.run_batch(&store, StageSelection::All).unwrap();
    assert!(report.load.is_clean());
    assert_eq!(report.assignment.as_ref().unwrap().total_added(), 1);

    let out = saved(&fx.output);
    let vibe = out.iter().find(|m| m.course_id == 1).unwrap();
    // Cursor survives on its capitalized standalone use, Bolt only appears
    // inside "nuts and bolts" and Zapier is absent
    assert_eq!(vibe.tools, vec!["Cursor".to_string()]);
    assert!(codes(vibe).contains(&"A5@0.8".to_string()));
    assert!(!codes(vibe).contains(&"E1@0.3".to_string()));

    let baking = out.iter().find(|m| m.course_id == 2).unwrap();
    assert_eq!(codes(baking), vec!["C1@0.8".to_string()]);

    let design = out.iter().find(|m| m.course_id == 3).unwrap();
    assert!(codes(design).contains(&"E1@0.3".to_string()));
}

#[test]
fn test_rerun_on_output_is_idempotent() {
    let fx = fixture();
    let pipeline = Pipeline::from_config(&fx.config, false).unwrap();

    let first = open_store(&fx.config, &PathArgs::default()).unwrap();
    pipeline.run_batch(&first, StageSelection::All).unwrap();
    let once = fs::read_to_string(&fx.output).unwrap();

    // Feed the output back in as the input and write it in place
    let overrides = PathArgs {
        mappings: Some(fx.output.clone()),
        ..PathArgs::default()
    };
    let second = open_store(&fx.config, &overrides).unwrap();
    let report = pipeline.run_batch(&second, StageSelection::All).unwrap();
    let twice = fs::read_to_string(&fx.output).unwrap();

    assert_eq!(once, twice);
    assert_eq!(report.assignment.unwrap().total_added(), 0);
    assert_eq!(report.screening.unwrap().total_removed(), 0);
    assert_eq!(report.pruning.unwrap().total_removed(), 0);
}

#[test]
fn test_dry_run_writes_nothing() {
    let fx = fixture();
    let store = open_store(&fx.config, &PathArgs::default()).unwrap();
    let pipeline = Pipeline::from_config(&fx.config, true).unwrap();

    let report = pipeline.run_batch(&store, StageSelection::All).unwrap();

    assert!(report.dry_run);
    assert!(report.pruning.unwrap().total_removed() > 0);
    assert!(!fx.output.exists());
    assert_eq!(fs::read_to_string(&fx.mappings).unwrap(), MAPPINGS);
}

#[test]
fn test_dry_run_reports_what_the_real_run_does() {
    let fx = fixture();
    let store = open_store(&fx.config, &PathArgs::default()).unwrap();

    let dry = Pipeline::from_config(&fx.config, true)
        .unwrap()
        .run_batch(&store, StageSelection::All)
        .unwrap();
    let live = Pipeline::from_config(&fx.config, false)
        .unwrap()
        .run_batch(&store, StageSelection::All)
        .unwrap();

    let (dry_pruning, live_pruning) = (dry.pruning.unwrap(), live.pruning.unwrap());
    assert_eq!(dry_pruning.removals, live_pruning.removals);
    assert_eq!(
        dry.assignment.unwrap().total_added(),
        live.assignment.unwrap().total_added()
    );
    assert_eq!(
        dry.screening.unwrap().total_removed(),
        live.screening.unwrap().total_removed()
    );
}

#[test]
fn test_config_file_dry_run_writes_nothing() {
    let fx = fixture();
    let config_path = fx.mappings.with_file_name("skillmap.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [paths]
            mappings = "{}"
            profiles = "{}"
            output = "{}"

            [prune]
            dry_run = true
            "#,
            fx.mappings.display(),
            fx.config.paths.profiles.display(),
            fx.output.display()
        ),
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    let store = open_store(&config, &PathArgs::default()).unwrap();
    let pipeline = Pipeline::from_config(&config, false).unwrap();
    let report = pipeline.run_batch(&store, StageSelection::All).unwrap();

    assert!(report.dry_run);
    assert!(!fx.output.exists());
    assert_eq!(fs::read_to_string(&fx.mappings).unwrap(), MAPPINGS);
}

#[test]
fn test_single_stage_leaves_other_fields_alone() {
    let fx = fixture();
    let store = open_store(&fx.config, &PathArgs::default()).unwrap();
    let pipeline = Pipeline::from_config(&fx.config, false).unwrap();

    let report = pipeline.run_batch(&store, StageSelection::Prune).unwrap();
    assert!(report.assignment.is_none());
    assert!(report.screening.is_none());

    let out = saved(&fx.output);
    let vibe = out.iter().find(|m| m.course_id == 1).unwrap();
    assert_eq!(vibe.tools.len(), 3);
}

#[test]
fn test_config_file_rules_reach_the_pipeline() {
    let fx = fixture();
    let config_path = fx.mappings.with_file_name("skillmap.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [paths]
            mappings = "{}"
            profiles = "{}"
            output = "{}"

            [prune]
            rules = []
            "#,
            fx.mappings.display(),
            fx.config.paths.profiles.display(),
            fx.output.display()
        ),
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    let store = open_store(&config, &PathArgs::default()).unwrap();
    let pipeline = Pipeline::from_config(&config, false).unwrap();
    let report = pipeline.run_batch(&store, StageSelection::Prune).unwrap();

    assert_eq!(report.pruning.unwrap().total_removed(), 0);
}
