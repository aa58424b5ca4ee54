//! Catalogs compiled into the binary.

/// Ukrainian UI strings.
const BUNDLED_UK: &str = include_str!("../../../locale/uk.ts");

/// `(locale, document)` pairs available without touching the filesystem.
const BUNDLED: &[(&str, &str)] = &[("uk", BUNDLED_UK)];

/// The bundled TS document for an exact locale name.
pub fn get(locale: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(name, _)| *name == locale)
        .map(|(_, text)| *text)
}

/// Names of all bundled locales.
pub fn locales() -> impl Iterator<Item = &'static str> {
    BUNDLED.iter().map(|(name, _)| *name)
}
