//! TS document writer.
//!
//! Output follows the layout Qt's own tools produce: XML declaration,
//! `<!DOCTYPE TS>`, contexts at column 0 and four-space indentation below.

use tscat_core::{Entry, Status};

use crate::catalog::Catalog;
use crate::escape::escape;

pub(crate) fn to_string(catalog: &Catalog) -> String {
    let header = catalog.header();
    let mut out = String::with_capacity(catalog.len() * 128 + 256);

    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");
    out.push_str("<TS");
    attribute(&mut out, "version", &header.version);
    if !header.language.is_empty() {
        attribute(&mut out, "language", &header.language);
    }
    if let Some(source_language) = &header.source_language {
        attribute(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    if let Some(codec) = &header.codec {
        element(&mut out, 0, "defaultcodec", codec);
    }

    for (context, entries) in group_by_context(catalog.entries()) {
        out.push_str("<context>\n");
        element(&mut out, 4, "name", context);
        for entry in entries {
            message(&mut out, entry);
        }
        out.push_str("</context>\n");
    }

    out.push_str("</TS>\n");
    out
}

fn message(out: &mut String, entry: &Entry) {
    out.push_str("    <message>\n");
    for location in &entry.locations {
        indent(out, 8);
        out.push_str("<location");
        if let Some(filename) = &location.filename {
            attribute(out, "filename", filename);
        }
        if let Some(line) = &location.line {
            attribute(out, "line", line);
        }
        out.push_str("/>\n");
    }
    element(out, 8, "source", &entry.source);
    let optional = [
        ("oldsource", &entry.old_source),
        ("comment", &entry.comment),
        ("extracomment", &entry.extra_comment),
        ("translatorcomment", &entry.translator_comment),
    ];
    for (name, text) in optional {
        if let Some(text) = text {
            element(out, 8, name, text);
        }
    }

    indent(out, 8);
    out.push_str("<translation");
    if let Some(kind) = entry.status.type_attr() {
        attribute(out, "type", kind);
    }
    if entry.translation.is_empty() && entry.status != Status::Translated {
        out.push_str("/>\n");
    } else {
        out.push('>');
        out.push_str(&escape(&entry.translation));
        out.push_str("</translation>\n");
    }
    out.push_str("    </message>\n");
}

fn element(out: &mut String, depth: usize, name: &str, text: &str) {
    indent(out, depth);
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

fn attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat(' ').take(depth));
}

/// Entries grouped under their context, contexts in first-seen order.
fn group_by_context(entries: &[Entry]) -> Vec<(&str, Vec<&Entry>)> {
    let mut groups: Vec<(&str, Vec<&Entry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(name, _)| *name == entry.context) {
            Some((_, members)) => members.push(entry),
            None => groups.push((entry.context.as_str(), vec![entry])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscat_core::{Header, Location};

    fn header() -> Header {
        Header {
            language: "uk".into(),
            source_language: Some("en".into()),
            version: "2.0".into(),
            codec: Some("UTF-8".into()),
        }
    }

    #[test]
    fn test_writes_qt_layout() {
        let catalog = Catalog::from_entries(
            header(),
            vec![
                Entry::translated("AboutView", "&Close", "&Закрити"),
                Entry::unfinished("AboutView", "Update"),
            ],
        )
        .unwrap();

        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<!DOCTYPE TS>\n",
            "<TS version=\"2.0\" language=\"uk\" sourcelanguage=\"en\">\n",
            "<defaultcodec>UTF-8</defaultcodec>\n",
            "<context>\n",
            "    <name>AboutView</name>\n",
            "    <message>\n",
            "        <source>&amp;Close</source>\n",
            "        <translation>&amp;Закрити</translation>\n",
            "    </message>\n",
            "    <message>\n",
            "        <source>Update</source>\n",
            "        <translation type=\"unfinished\"/>\n",
            "    </message>\n",
            "</context>\n",
            "</TS>\n",
        );
        assert_eq!(to_string(&catalog), expected);
    }

    #[test]
    fn test_interleaved_contexts_are_grouped() {
        let catalog = Catalog::from_entries(
            Header::new("uk"),
            vec![
                Entry::translated("AlbumInfo", "Read more", "Детальніше"),
                Entry::translated("ArtistInfo", "Read more", "Детальніше"),
                Entry::translated("AlbumInfo", "Buy on %1", "Придбати на %1"),
            ],
        )
        .unwrap();
        let text = to_string(&catalog);
        assert_eq!(text.matches("<context>").count(), 2);
        let album = text.find("<name>AlbumInfo</name>").unwrap();
        let buy = text.find("Buy on %1").unwrap();
        let artist = text.find("<name>ArtistInfo</name>").unwrap();
        assert!(album < buy && buy < artist);
    }

    #[test]
    fn test_comment_and_obsolete_written() {
        let mut gone = Entry::translated("MainWindow", "Update", "Оновити");
        gone.status = Status::Obsolete;
        gone.comment = Some("toolbar <button>".into());
        let catalog = Catalog::from_entries(Header::new("uk"), vec![gone]).unwrap();
        let text = to_string(&catalog);
        assert!(text.contains("<comment>toolbar &lt;button&gt;</comment>"));
        assert!(text.contains("<translation type=\"obsolete\">Оновити</translation>"));
    }

    #[test]
    fn test_message_metadata_written_in_order() {
        let mut entry = Entry::translated("ClearButton", "Clear", "Очистити");
        entry.locations.push(Location {
            filename: Some("../src/clearbutton.cpp".into()),
            line: Some("+3".into()),
        });
        entry.old_source = Some("Clear text".into());
        entry.extra_comment = Some("button label".into());
        entry.translator_comment = Some("keep short".into());
        let catalog = Catalog::from_entries(Header::new("uk"), vec![entry]).unwrap();

        let expected = concat!(
            "    <message>\n",
            "        <location filename=\"../src/clearbutton.cpp\" line=\"+3\"/>\n",
            "        <source>Clear</source>\n",
            "        <oldsource>Clear text</oldsource>\n",
            "        <extracomment>button label</extracomment>\n",
            "        <translatorcomment>keep short</translatorcomment>\n",
            "        <translation>Очистити</translation>\n",
            "    </message>\n",
        );
        assert!(to_string(&catalog).contains(expected));
    }

    #[test]
    fn test_translated_empty_keeps_open_close_pair() {
        let catalog = Catalog::from_entries(
            Header::new("uk"),
            vec![Entry::translated("MainWindow", "Ctrl+Q", "")],
        )
        .unwrap();
        assert!(to_string(&catalog).contains("<translation></translation>"));
    }
}
