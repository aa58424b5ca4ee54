//! `normalize` and `export`: write the catalog back out.

use anyhow::Context as _;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tscat_catalog::Catalog;

/// Canonical TS layout to `output`, or stdout.
pub fn normalize(catalog: &Catalog, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            catalog
                .save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} entries to {}", catalog.len(), path.display());
        }
        None => catalog.write_ts(std::io::stdout().lock())?,
    }
    Ok(())
}

/// JSON dump to `output`, or stdout.
pub fn export(catalog: &Catalog, output: Option<&Path>) -> anyhow::Result<()> {
    let json = catalog.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("exported {} entries to {}", catalog.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
