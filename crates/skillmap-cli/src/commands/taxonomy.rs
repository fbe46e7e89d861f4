//! Taxonomy command implementation.

use crate::cli::TaxonomyArgs;
use crate::error::Result;
use crate::output::Formatter;
use skillmap_store::{load_taxonomy, write_taxonomy_json};

/// Execute the taxonomy command.
pub fn execute_taxonomy(args: TaxonomyArgs, formatter: &Formatter) -> Result<()> {
    let taxonomy = load_taxonomy(&args.input)?;

    if taxonomy.is_empty() {
        eprintln!(
            "{}",
            formatter.warning(&format!("No skills found in {}", args.input.display()))
        );
    }

    match args.output {
        Some(output) => {
            write_taxonomy_json(&output, &taxonomy)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "Wrote {} skill(s) to {}",
                    taxonomy.len(),
                    output.display()
                ))
            );
        }
        None => println!("{}", formatter.format_taxonomy(&taxonomy)?),
    }

    Ok(())
}
