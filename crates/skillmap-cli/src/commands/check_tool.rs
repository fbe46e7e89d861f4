//! Check-tool command implementation.

use crate::cli::CheckToolArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use skillmap_evidence::{EvidenceValidator, ToolCatalog};
use std::fs;

/// Execute the check-tool command.
pub fn execute_check_tool(args: CheckToolArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)?,
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Provide the text to check or --file".to_string(),
            ))
        }
    };

    let tool = args.tool.trim();
    if tool.is_empty() {
        return Err(CliError::InvalidInput("Tool name must not be empty".to_string()));
    }

    let validator = EvidenceValidator::new(ToolCatalog::build(&config.catalog_config())?);
    let verdict = validator.explain(tool, &text);
    println!("{}", formatter.format_verdict(tool, &verdict)?);

    Ok(())
}
