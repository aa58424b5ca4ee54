//! Resolving a locale identifier to a catalog resource and loading it.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};
use tscat_core::config::CatalogConfig;
use tscat_core::locale::{candidates, normalize};
use tscat_core::TscatError;

use crate::bundled;
use crate::catalog::Catalog;

/// Where a catalog was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    File(PathBuf),
    Bundled {
        locale: &'static str,
        text: &'static str,
    },
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled { locale, .. } => write!(f, "bundled:{locale}"),
        }
    }
}

/// Finds catalogs as `{dir}/{prefix}{locale}.ts` in a list of search
/// directories, with bundled catalogs as the last resort.
#[derive(Debug, Clone)]
pub struct Loader {
    dirs: Vec<PathBuf>,
    prefix: String,
    bundled: bool,
}

impl Loader {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            prefix: String::new(),
            bundled: true,
        }
    }

    pub fn from_config(cfg: &CatalogConfig) -> Self {
        Self::new(cfg.search_dirs())
            .with_prefix(&cfg.file_prefix)
            .with_bundled(cfg.bundled)
    }

    /// File name prefix, e.g. `musique_` for `musique_uk.ts`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_bundled(mut self, bundled: bool) -> Self {
        self.bundled = bundled;
        self
    }

    /// First resource matching `locale`. Each fallback candidate is tried
    /// against every search directory, then against the bundled set, before
    /// moving on to the next, shorter candidate.
    pub fn resolve(&self, locale: &str) -> Option<Resource> {
        for candidate in candidates(locale) {
            for dir in &self.dirs {
                let path = dir.join(format!("{}{candidate}.ts", self.prefix));
                if path.is_file() {
                    return Some(Resource::File(path));
                }
                debug!("no catalog at {}", path.display());
            }
            if self.bundled {
                if let Some(name) = bundled::locales().find(|name| *name == candidate) {
                    if let Some(text) = bundled::get(name) {
                        return Some(Resource::Bundled { locale: name, text });
                    }
                }
            }
        }
        None
    }

    /// Resolve and parse the catalog for `locale`.
    pub fn load(&self, locale: &str) -> Result<Catalog, TscatError> {
        let Some(resource) = self.resolve(locale) else {
            return Err(TscatError::NotFound(locale.to_string()));
        };
        let catalog = match &resource {
            Resource::File(path) => Catalog::from_file(path)?,
            Resource::Bundled { text, .. } => Catalog::parse(text)?,
        };
        info!(
            "loaded catalog '{}' from {resource} ({} entries)",
            catalog.language(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Like [`Loader::load`], but any failure yields an empty catalog so the
    /// UI shows source strings instead of refusing to start.
    pub fn load_or_empty(&self, locale: &str) -> Catalog {
        match self.load(locale) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("catalog for '{locale}' unavailable, using source strings: {e}");
                Catalog::empty(&normalize(locale))
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}
