//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Skillmap - Validate tool evidence and prune skill tags for course mappings.
#[derive(Debug, Parser)]
#[command(name = "skillmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SKILLMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log stage summaries to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (counts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assign, validate tools and prune in one pass
    Run(StageArgs),

    /// Append tags derived from topics, names and tool evidence
    Assign(StageArgs),

    /// Remove tools the course text does not support
    ValidateTools(StageArgs),

    /// Remove tags whose keep conditions do not hold
    Prune(StageArgs),

    /// Check one tool name against a piece of text
    CheckTool(CheckToolArgs),

    /// List the tool catalog
    Catalog(CatalogArgs),

    /// Aggregate raw syllabus rows into course profiles
    Ingest(IngestArgs),

    /// Parse a taxonomy document
    Taxonomy(TaxonomyArgs),
}

/// Store file overrides shared by the batch commands.
#[derive(Debug, Clone, Default, Args)]
pub struct PathArgs {
    /// Course skill mappings file
    #[arg(short, long)]
    pub mappings: Option<PathBuf>,

    /// Course profiles file
    #[arg(short, long)]
    pub profiles: Option<PathBuf>,

    /// Output file (defaults to the mappings file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Taxonomy file (.md or .json) used to filter codes at load
    #[arg(short, long)]
    pub taxonomy: Option<PathBuf>,
}

/// Arguments for the batch commands.
#[derive(Debug, Clone, Args)]
pub struct StageArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Compute the report without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the check-tool command.
#[derive(Debug, Parser)]
pub struct CheckToolArgs {
    /// Tool name as it appears in the catalog
    pub tool: String,

    /// Text to check
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the catalog command.
#[derive(Debug, Parser)]
pub struct CatalogArgs {
    /// Only list names of this tier
    #[arg(short, long, value_enum)]
    pub tier: Option<TierArg>,

    /// Print the catalog in effect as TOML
    #[arg(long)]
    pub dump: bool,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Raw course rows (raw_courses.json)
    pub input: PathBuf,

    /// Profiles file to write (defaults to the configured profiles path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the taxonomy command.
#[derive(Debug, Parser)]
pub struct TaxonomyArgs {
    /// Taxonomy markdown or JSON file
    pub input: PathBuf,

    /// Write the parsed taxonomy as taxonomy.json
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Tier argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TierArg {
    /// Names matched by substring
    Unambiguous,
    /// Names with a disambiguation strategy
    Ambiguous,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<TierArg> for skillmap_domain::Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Unambiguous => skillmap_domain::Tier::Unambiguous,
            TierArg::Ambiguous => skillmap_domain::Tier::Ambiguous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_with_overrides() {
        let cli = Cli::parse_from([
            "skillmap",
            "run",
            "--mappings",
            "m.json",
            "--output",
            "out.json",
            "--dry-run",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert!(args.dry_run);
                assert_eq!(args.paths.mappings, Some(PathBuf::from("m.json")));
                assert_eq!(args.paths.output, Some(PathBuf::from("out.json")));
                assert!(args.paths.profiles.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["skillmap", "prune", "--format", "json", "--no-color", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_check_tool_text_or_file() {
        let cli = Cli::parse_from(["skillmap", "check-tool", "Cursor", "Open the Cursor app"]);
        match cli.command {
            Command::CheckTool(args) => {
                assert_eq!(args.tool, "Cursor");
                assert_eq!(args.text.as_deref(), Some("Open the Cursor app"));
            }
            _ => panic!("Expected CheckTool command"),
        }

        assert!(Cli::try_parse_from(["skillmap", "check-tool", "Cursor"]).is_err());
        assert!(Cli::try_parse_from(["skillmap", "check-tool", "Cursor", "--file", "s.txt"]).is_ok());
    }

    #[test]
    fn test_validate_tools_name() {
        let cli = Cli::parse_from(["skillmap", "validate-tools"]);
        assert!(matches!(cli.command, Command::ValidateTools(_)));
    }

    #[test]
    fn test_tier_conversion() {
        let tier: skillmap_domain::Tier = TierArg::Ambiguous.into();
        assert_eq!(tier, skillmap_domain::Tier::Ambiguous);
    }
}
