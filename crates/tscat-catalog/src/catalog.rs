//! The immutable translation table for one locale.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tscat_core::{CatalogParseError, DuplicateEntry, Entry, Header, TscatError};

use crate::format::format;
use crate::{reader, writer};

/// All translation entries for one locale, keyed by `(context, source)`.
///
/// Built once by [`Catalog::parse`] (or a [`Loader`](crate::Loader)) and
/// never mutated afterwards; share it as `&Catalog` or `Arc<Catalog>`.
#[derive(Debug, Clone)]
pub struct Catalog {
    header: Header,
    /// Document order.
    entries: Vec<Entry>,
    /// context -> source -> position in `entries`.
    index: HashMap<String, HashMap<String, usize>>,
}

impl Catalog {
    /// A catalog with no entries: every lookup returns its source text.
    pub fn empty(language: &str) -> Self {
        Self::with_header(Header::new(language))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Parse a TS document.
    pub fn parse(input: &str) -> Result<Self, CatalogParseError> {
        reader::parse(input)
    }

    /// Read and parse a TS file.
    pub fn from_file(path: &Path) -> Result<Self, TscatError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content)?)
    }

    /// Build a catalog from entries, rejecting duplicate keys.
    pub fn from_entries<I>(header: Header, entries: I) -> Result<Self, DuplicateEntry>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut catalog = Self::with_header(header);
        for entry in entries {
            catalog.insert(entry).map_err(|dup| DuplicateEntry {
                context: dup.context,
                source: dup.source,
            })?;
        }
        Ok(catalog)
    }

    pub(crate) fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Add an entry. Hands the entry back if its key is already taken.
    pub(crate) fn insert(&mut self, entry: Entry) -> Result<(), Entry> {
        let by_source = self.index.entry(entry.context.clone()).or_default();
        if by_source.contains_key(&entry.source) {
            return Err(entry);
        }
        by_source.insert(entry.source.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Text to display for `(context, source)`.
    ///
    /// Returns the stored translation when the entry exists, is translated,
    /// and has non-empty text. Otherwise returns `source` itself, so a
    /// partially translated catalog mixes both languages transparently.
    pub fn lookup<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        match self.get(context, source) {
            Some(entry) => entry.display_text(),
            None => source,
        }
    }

    /// Look up and substitute `%1`, `%2`, ... with `args`.
    pub fn tr<S: AsRef<str>>(&self, context: &str, source: &str, args: &[S]) -> String {
        format(self.lookup(context, source), args)
    }

    /// The entry stored under `(context, source)`, whatever its status.
    pub fn get(&self, context: &str, source: &str) -> Option<&Entry> {
        let idx = *self.index.get(context)?.get(source)?;
        self.entries.get(idx)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn language(&self) -> &str {
        &self.header.language
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Context names in order of first appearance.
    pub fn contexts(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.context.as_str()) {
                seen.push(&entry.context);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to a TS document.
    pub fn to_ts_string(&self) -> String {
        writer::to_string(self)
    }

    /// Serialize into `out`.
    pub fn write_ts<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(self.to_ts_string().as_bytes())?;
        out.flush()
    }

    /// Write the catalog to `path` as a TS document.
    pub fn save(&self, path: &Path) -> Result<(), TscatError> {
        let file = std::fs::File::create(path)?;
        self.write_ts(std::io::BufWriter::new(file))?;
        Ok(())
    }
}
