//! # tscat-core
//!
//! Core types, configuration, locale handling, and error handling for tscat.

pub mod config;
pub mod entry;
pub mod error;
pub mod locale;

pub use config::shellexpand;
pub use entry::{Entry, Header, Location, Status};
pub use error::{CatalogParseError, DuplicateEntry, ParseErrorKind, TscatError};
