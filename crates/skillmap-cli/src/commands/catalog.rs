//! Catalog command implementation.

use crate::cli::CatalogArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use skillmap_domain::Tier;
use skillmap_evidence::ToolCatalog;

/// Execute the catalog command.
pub fn execute_catalog(args: CatalogArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let catalog_config = config.catalog_config();

    if args.dump {
        print!("{}", catalog_config.to_toml()?);
        return Ok(());
    }

    let catalog = ToolCatalog::build(&catalog_config)?;
    let tier = args.tier.map(Tier::from);
    let entries: Vec<(&str, Tier)> = catalog
        .entries()
        .into_iter()
        .filter(|(_, t)| tier.map_or(true, |wanted| *t == wanted))
        .collect();

    println!("{}", formatter.format_catalog(&entries)?);
    Ok(())
}
