//! # tscat-catalog
//!
//! Qt Linguist `.ts` catalogs: parsing, lookup with source-text fallback,
//! `%N` formatting, serialization, progress stats, and consistency checks.

mod bundled;
mod catalog;
mod check;
mod escape;
mod export;
mod format;
mod handle;
mod loader;
mod markup;
mod reader;
mod stats;
mod writer;


pub use catalog::Catalog;
pub use check::{check, Finding, Issue};
pub use format::{format, placeholders};
pub use handle::CatalogHandle;
pub use loader::{Loader, Resource};
pub use stats::{ContextStats, Counts, Stats};

/// Locales whose catalogs are compiled into the binary.
pub fn bundled_locales() -> Vec<&'static str> {
    bundled::locales().collect()
}
