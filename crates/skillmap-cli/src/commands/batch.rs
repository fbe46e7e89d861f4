//! Batch commands: run, assign, validate-tools and prune.

use crate::cli::StageArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{open_store, Pipeline, StageSelection};

/// Execute the run command.
pub fn execute_run(args: StageArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    execute_stages(args, StageSelection::All, config, formatter)
}

/// Execute the assign command.
pub fn execute_assign(args: StageArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    execute_stages(args, StageSelection::Assign, config, formatter)
}

/// Execute the validate-tools command.
pub fn execute_validate_tools(
    args: StageArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    execute_stages(args, StageSelection::ValidateTools, config, formatter)
}

/// Execute the prune command.
pub fn execute_prune(args: StageArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    execute_stages(args, StageSelection::Prune, config, formatter)
}

fn execute_stages(
    args: StageArgs,
    stages: StageSelection,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let store = open_store(config, &args.paths)?;
    let pipeline = Pipeline::from_config(config, args.dry_run)?;

    let report = pipeline.run_batch(&store, stages)?;
    println!("{}", formatter.format_batch(&report)?);

    if !report.dry_run {
        eprintln!(
            "{}",
            formatter.info(&format!("Wrote {}", store.output_path().display()))
        );
    }

    Ok(())
}
