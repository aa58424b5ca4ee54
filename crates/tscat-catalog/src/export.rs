//! JSON view of a catalog.

use serde::Serialize;
use tscat_core::{Entry, Header, TscatError};

use crate::catalog::Catalog;

#[derive(Debug, Serialize)]
struct Export<'a> {
    header: &'a Header,
    entries: &'a [Entry],
}

impl Catalog {
    /// Pretty-printed JSON with the header and all entries in document order.
    pub fn to_json(&self) -> Result<String, TscatError> {
        let export = Export {
            header: self.header(),
            entries: self.entries(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}
