//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use skillmap_store::{aggregate_profiles, read_json, write_json_atomic, RawCourseRow};

/// Execute the ingest command.
pub fn execute_ingest(args: IngestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let rows: Vec<RawCourseRow> = read_json(&args.input)?;
    let row_count = rows.len();
    let profiles = aggregate_profiles(rows);

    let output = args.output.unwrap_or_else(|| config.paths.profiles.clone());
    write_json_atomic(&output, &profiles)?;

    tracing::info!(
        rows = row_count,
        courses = profiles.len(),
        output = %output.display(),
        "Profiles written"
    );
    println!(
        "{}",
        formatter.success(&format!(
            "Wrote {} course profile(s) from {} row(s) to {}",
            profiles.len(),
            row_count,
            output.display()
        ))
    );

    Ok(())
}
