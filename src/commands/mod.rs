//! Subcommand handlers. Each returns its output (or writes it) and leaves
//! printing decisions to `main`.

pub mod convert;
pub mod report;
pub mod watch;


use anyhow::{bail, Context as _};
use std::path::{Path, PathBuf};
use tracing::warn;
use tscat_catalog::{Catalog, Loader, Resource};

/// How a command finds its catalog: an explicit `--file`, or the locale
/// resolved from flags, config and environment.
pub struct CatalogSource<'a> {
    pub loader: &'a Loader,
    pub locale: Option<&'a str>,
}

impl CatalogSource<'_> {
    fn locale(&self) -> anyhow::Result<&str> {
        match self.locale {
            Some(locale) => Ok(locale),
            None => bail!(
                "no locale configured or detected; pass --locale, set [catalog].default_locale, or use --file"
            ),
        }
    }

    /// Load the catalog; any failure is an error.
    pub fn open(&self, file: Option<&Path>) -> anyhow::Result<Catalog> {
        if let Some(path) = file {
            return Catalog::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()));
        }
        Ok(self.loader.load(self.locale()?)?)
    }

    /// Load the catalog for display: an unknown locale, or a missing or
    /// broken locale catalog, degrades to source strings. An explicit
    /// `--file` must still load.
    pub fn open_lenient(&self, file: Option<&Path>) -> anyhow::Result<Catalog> {
        if file.is_some() {
            return self.open(file);
        }
        match self.locale {
            Some(locale) => Ok(self.loader.load_or_empty(locale)),
            None => {
                warn!("no locale configured or detected, showing source strings");
                Ok(Catalog::empty(""))
            }
        }
    }

    /// The file to watch: `--file`, or the resolved catalog if it lives on disk.
    pub fn watch_path(&self, file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        if let Some(path) = file {
            return Ok(path);
        }
        let locale = self.locale()?;
        match self.loader.resolve(locale) {
            Some(Resource::File(path)) => Ok(path),
            Some(resource @ Resource::Bundled { .. }) => {
                bail!("catalog for '{locale}' is {resource}, nothing to watch on disk")
            }
            None => bail!("no catalog found for locale '{locale}'"),
        }
    }
}
