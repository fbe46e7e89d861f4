//! Configuration management for the CLI.
//!
//! A `skillmap.toml` names the input and output files and may override the
//! built-in rule tables:
//!
//! ```toml
//! [paths]
//! mappings = "data/course_skill_mappings.json"
//! profiles = "data/course_profiles.json"
//! output = "data/course_skill_mappings.pruned.json"
//! taxonomy = "data/taxonomy.md"
//!
//! [settings]
//! color = false
//! format = "json"
//!
//! [catalog]
//! unambiguous = ["Obsidian"]
//!
//! [[prune.rules]]
//! name = "design-secondary"
//! target = "E1"
//! weight = "secondary"
//! keep = [{ topics_any = ["Design", "UX Design"] }]
//! ```

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use skillmap_assigner::AssignerConfig;
use skillmap_evidence::CatalogConfig;
use skillmap_pruner::PruneConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output files
    #[serde(default)]
    pub paths: PathsConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Catalog entries laid over the shipped catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,

    /// Assignment rules replacing the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign: Option<AssignerConfig>,

    /// Prune rules replacing the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune: Option<PruneConfig>,
}

/// Store file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Course skill mappings read at load time
    #[serde(default = "default_mappings")]
    pub mappings: PathBuf,

    /// Course profiles read at load time
    #[serde(default = "default_profiles")]
    pub profiles: PathBuf,

    /// Where the mutated mappings are written (defaults to `mappings`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Taxonomy file (`.md` or `.json`); codes outside it are discarded at load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (counts only)
    Quiet,
}

impl Config {
    /// Get the per-user configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".skillmap").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.skillmap/config.toml` is
    /// used when present, else the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Ok(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every rule table the file supplies.
    pub fn validate(&self) -> Result<()> {
        self.catalog_config().validate()?;
        self.assigner_config().validate()?;
        self.prune_config().validate()?;
        Ok(())
    }

    /// Shipped catalog with the `[catalog]` section laid over it.
    pub fn catalog_config(&self) -> CatalogConfig {
        match &self.catalog {
            Some(overlay) => CatalogConfig::builtin().overlay(overlay.clone()),
            None => CatalogConfig::builtin(),
        }
    }

    /// Assignment rules in effect.
    pub fn assigner_config(&self) -> AssignerConfig {
        self.assign.clone().unwrap_or_default()
    }

    /// Prune rules in effect.
    pub fn prune_config(&self) -> PruneConfig {
        self.prune.clone().unwrap_or_default()
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            mappings: default_mappings(),
            profiles: default_profiles(),
            output: None,
            taxonomy: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_mappings() -> PathBuf {
    PathBuf::from("course_skill_mappings.json")
}

fn default_profiles() -> PathBuf {
    PathBuf::from("course_profiles.json")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.mappings, PathBuf::from("course_skill_mappings.json"));
        assert!(config.paths.output.is_none());
        assert!(config.settings.color);
        assert_eq!(config.prune_config(), PruneConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [paths]
            output = "out.json"

            [settings]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.profiles, PathBuf::from("course_profiles.json"));
        assert_eq!(config.paths.output, Some(PathBuf::from("out.json")));
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
    }

    #[test]
    fn test_catalog_overlay() {
        let config = Config::from_toml(
            r#"
            [catalog]
            unambiguous = ["Obsidian", "Cursor"]
            "#,
        )
        .unwrap();

        let catalog = config.catalog_config();
        assert!(catalog.unambiguous.contains(&"Obsidian".to_string()));
        assert!(!catalog.ambiguous.contains_key("Cursor"));
    }

    #[test]
    fn test_prune_rules_replace_builtin() {
        let config = Config::from_toml(
            r#"
            [[prune.rules]]
            name = "design-secondary"
            target = "E1"
            weight = "secondary"
            keep = [{ topics_any = ["Design"] }]
            "#,
        )
        .unwrap();

        assert_eq!(config.prune_config().rules.len(), 1);
        assert_eq!(config.assigner_config(), AssignerConfig::default());
    }

    #[test]
    fn test_invalid_rule_table_rejected() {
        let result = Config::from_toml(
            r#"
            [[prune.rules]]
            name = "a"
            target = "E1"
            weight = "secondary"

            [[prune.rules]]
            name = "a"
            target = "E2"
            weight = "secondary"
            "#,
        );
        assert!(matches!(result, Err(CliError::Pruner(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/skillmap.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.paths.taxonomy = Some(PathBuf::from("taxonomy.md"));
        let text = config.to_toml().unwrap();
        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed.paths, config.paths);
    }
}
