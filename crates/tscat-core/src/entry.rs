//! Catalog data model: entries, their status, and the document header.

use serde::{Deserialize, Serialize};

/// Translation state of a single entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Approved translation, used for lookup.
    #[default]
    Translated,
    /// No approved translation yet; lookup falls back to the source text.
    Unfinished,
    /// No longer present in the application; kept only for round-tripping.
    Obsolete,
}

impl Status {
    /// Parse the `type` attribute of a `<translation>` element.
    ///
    /// A missing attribute means the entry is translated. `vanished` is the
    /// newer spelling of `obsolete`.
    pub fn from_type_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(Self::Translated),
            Some("unfinished") => Some(Self::Unfinished),
            Some("obsolete") | Some("vanished") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// Value for the `type` attribute, or `None` for translated entries.
    pub fn type_attr(&self) -> Option<&'static str> {
        match self {
            Self::Translated => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translated => "translated",
            Self::Unfinished => "unfinished",
            Self::Obsolete => "obsolete",
        }
    }
}

/// One translatable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// UI component the string belongs to (e.g. `MainWindow`).
    pub context: String,
    /// Untranslated text. Lookup key together with `context`.
    pub source: String,
    /// Localized text. Empty when no translation was supplied.
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub status: Status,
    /// Developer comment attached to the message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Source text of the previous revision, kept by `lupdate` for fuzzy matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// Extra developer note (`<extracomment>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    /// Note left by the translator (`<translatorcomment>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    /// Where the string occurs in the application sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

/// A `<location filename=".." line=".."/>` reference. `line` is kept as
/// written, since TS files may use relative values such as `+3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl Entry {
    /// A translated entry.
    pub fn translated(context: &str, source: &str, translation: &str) -> Self {
        Self {
            translation: translation.to_string(),
            status: Status::Translated,
            ..Self::unfinished(context, source)
        }
    }

    /// An entry still waiting for a translation.
    pub fn unfinished(context: &str, source: &str) -> Self {
        Self {
            context: context.to_string(),
            source: source.to_string(),
            translation: String::new(),
            status: Status::Unfinished,
            comment: None,
            old_source: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
        }
    }

    /// The text a renderer should display for this entry.
    ///
    /// Only translated entries with a non-empty translation are used;
    /// everything else falls back to the source text.
    pub fn display_text(&self) -> &str {
        if self.status == Status::Translated && !self.translation.is_empty() {
            &self.translation
        } else {
            &self.source
        }
    }
}

/// Attributes of the `<TS>` root plus the optional `<defaultcodec>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
}

impl Header {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            source_language: None,
            version: "2.1".to_string(),
            codec: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_type_attr_roundtrip() {
        for status in [Status::Translated, Status::Unfinished, Status::Obsolete] {
            assert_eq!(Status::from_type_attr(status.type_attr()), Some(status));
        }
    }

    #[test]
    fn test_vanished_is_obsolete() {
        assert_eq!(Status::from_type_attr(Some("vanished")), Some(Status::Obsolete));
        assert_eq!(Status::from_type_attr(Some("bogus")), None);
    }

    #[test]
    fn test_display_text_fallbacks() {
        let done = Entry::translated("ClearButton", "Clear", "Очистити");
        assert_eq!(done.display_text(), "Очистити");

        let pending = Entry::unfinished("SearchView", "Your search had no results.");
        assert_eq!(pending.display_text(), "Your search had no results.");

        let blank = Entry::translated("FinderWidget", "Folders", "");
        assert_eq!(blank.display_text(), "Folders");

        let mut gone = Entry::translated("MainWindow", "Update", "Оновити");
        gone.status = Status::Obsolete;
        assert_eq!(gone.display_text(), "Update");
    }

    #[test]
    fn test_entry_json_defaults() {
        let entry: Entry =
            serde_json::from_str(r#"{"context":"AlbumInfo","source":"Read more"}"#).unwrap();
        assert_eq!(entry.status, Status::Translated);
        assert!(entry.translation.is_empty());
        assert!(entry.comment.is_none());

        let json = serde_json::to_string(&Entry::unfinished("DropArea", "Drop")).unwrap();
        assert!(json.contains(r#""status":"unfinished""#));
        assert!(!json.contains("comment"));
        assert!(!json.contains("locations"));
    }

    #[test]
    fn test_location_json() {
        let mut entry = Entry::translated("MainWindow", "&Quit", "&Вийти");
        entry.locations.push(Location {
            filename: Some("mainwindow.cpp".into()),
            line: Some("+3".into()),
        });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["locations"][0]["filename"], "mainwindow.cpp");
        assert_eq!(json["locations"][0]["line"], "+3");

        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
