//! Swappable shared catalog for runtime locale switching.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::catalog::Catalog;
use crate::format::format;

/// The active catalog, replaced wholesale when the locale changes.
///
/// Readers take an `Arc<Catalog>` snapshot under a short read lock and
/// then read it lock-free, so a swap is never observed half-applied.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog in effect right now.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish `catalog` and return the one it replaces.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, Arc::clone(&next));
        drop(guard);
        info!(
            "catalog switched: '{}' -> '{}'",
            previous.language(),
            next.language()
        );
        previous
    }

    pub fn language(&self) -> String {
        self.snapshot().language().to_string()
    }

    pub fn lookup(&self, context: &str, source: &str) -> String {
        self.snapshot().lookup(context, source).to_string()
    }

    pub fn tr<S: AsRef<str>>(&self, context: &str, source: &str, args: &[S]) -> String {
        let catalog = self.snapshot();
        format(catalog.lookup(context, source), args)
    }
}

impl From<Catalog> for CatalogHandle {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
