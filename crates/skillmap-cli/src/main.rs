//! Skillmap CLI - Evidence validation and tag pruning for course skill mappings.

use clap::Parser;
use skillmap_cli::commands;
use skillmap_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> skillmap_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter)?,
        Command::Assign(args) => commands::execute_assign(args, &config, &formatter)?,
        Command::ValidateTools(args) => {
            commands::execute_validate_tools(args, &config, &formatter)?
        }
        Command::Prune(args) => commands::execute_prune(args, &config, &formatter)?,
        Command::CheckTool(args) => commands::execute_check_tool(args, &config, &formatter)?,
        Command::Catalog(args) => commands::execute_catalog(args, &config, &formatter)?,
        Command::Ingest(args) => commands::execute_ingest(args, &config, &formatter)?,
        Command::Taxonomy(args) => commands::execute_taxonomy(args, &formatter)?,
    }

    Ok(())
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env("SKILLMAP_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
