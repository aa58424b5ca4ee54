use std::fmt;

use thiserror::Error;

/// Top-level error type for tscat.
#[derive(Debug, Error)]
pub enum TscatError {
    /// Malformed catalog document.
    #[error("parse error: {0}")]
    Parse(#[from] CatalogParseError),

    /// Catalog built from entries with a repeated key.
    #[error("{0}")]
    Duplicate(#[from] DuplicateEntry),

    /// No catalog resource could be resolved for a locale.
    #[error("no catalog found for locale '{0}'")]
    NotFound(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A catalog document that could not be parsed, with the position of the
/// offending markup (1-based line and column, counted in characters).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct CatalogParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

impl CatalogParseError {
    /// Build an error for byte offset `offset` of `input`.
    pub fn at(input: &str, offset: usize, kind: ParseErrorKind) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column, kind }
    }
}

/// Two entries share the same `(context, source)` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub context: String,
    pub source: String,
}

impl fmt::Display for DuplicateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate message {:?} in context {:?}",
            self.source, self.context
        )
    }
}

impl std::error::Error for DuplicateEntry {}

/// What went wrong while parsing a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEof,
    /// Malformed markup: a tag, attribute, or declaration that does not parse.
    InvalidMarkup(String),
    /// A closing tag that does not match the open element.
    MismatchedTag { expected: String, found: String },
    UnknownEntity(String),
    /// The document root is not `<TS>`.
    InvalidRoot(String),
    /// An element appeared where it is not allowed.
    UnexpectedElement(String),
    /// Non-whitespace text outside of a text-bearing element.
    UnexpectedText(String),
    MissingElement(&'static str),
    DuplicateEntry { context: String, source: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::InvalidMarkup(what) => write!(f, "invalid markup: {what}"),
            Self::MismatchedTag { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")
            }
            Self::UnknownEntity(name) => write!(f, "unknown entity '&{name};'"),
            Self::InvalidRoot(name) => write!(f, "root element must be <TS>, found <{name}>"),
            Self::UnexpectedElement(name) => write!(f, "unexpected element <{name}>"),
            Self::UnexpectedText(text) => write!(f, "unexpected text {text:?}"),
            Self::MissingElement(name) => write!(f, "missing <{name}> element"),
            Self::DuplicateEntry { context, source } => {
                write!(f, "duplicate message {source:?} in context {context:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_counts_lines_and_chars() {
        let input = "<TS>\n  <цей>";
        let offset = input.find("<цей>").unwrap();
        let err = CatalogParseError::at(input, offset, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_position_multibyte_column() {
        let input = "Очистити<";
        let offset = input.find('<').unwrap();
        let err = CatalogParseError::at(input, offset, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 9);
    }

    #[test]
    fn test_duplicate_entry_display() {
        let dup = DuplicateEntry {
            context: "FinderWidget".into(),
            source: "Artists".into(),
        };
        assert_eq!(
            dup.to_string(),
            "duplicate message \"Artists\" in context \"FinderWidget\""
        );
        assert!(matches!(TscatError::from(dup), TscatError::Duplicate(_)));
    }

    #[test]
    fn test_display_includes_position() {
        let err = CatalogParseError {
            line: 4,
            column: 7,
            kind: ParseErrorKind::MismatchedTag {
                expected: "source".into(),
                found: "translation".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "expected </source>, found </translation> at line 4, column 7"
        );
        let wrapped = TscatError::from(err);
        assert!(wrapped.to_string().starts_with("parse error: "));
    }
}
