//! Markup escaping for TS text and attribute values.

use std::borrow::Cow;

use tscat_core::ParseErrorKind;

/// Replace entity references with the characters they stand for.
///
/// Handles the five predefined entities plus decimal (`&#1028;`) and
/// hexadecimal (`&#x404;`) character references. On failure returns the
/// byte offset of the offending `&` within `raw`.
pub(crate) fn unescape(raw: &str) -> Result<Cow<'_, str>, (usize, ParseErrorKind)> {
    let Some(first) = raw.find('&') else {
        return Ok(Cow::Borrowed(raw));
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);
    let mut pos = first;
    while pos < raw.len() {
        let rest = &raw[pos..];
        if !rest.starts_with('&') {
            let next = rest.find('&').map(|i| pos + i).unwrap_or(raw.len());
            out.push_str(&raw[pos..next]);
            pos = next;
            continue;
        }
        let Some(end) = rest.find(';') else {
            return Err((pos, ParseErrorKind::InvalidMarkup("unterminated entity".into())));
        };
        let name = &rest[1..end];
        match resolve_entity(name) {
            Some(c) => out.push(c),
            None => return Err((pos, ParseErrorKind::UnknownEntity(name.to_string()))),
        }
        pos += end + 1;
    }
    Ok(Cow::Owned(out))
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Escape text for writing inside an element or a quoted attribute.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_plain_text_borrows() {
        assert!(matches!(unescape("Очистити"), Ok(Cow::Borrowed("Очистити"))));
    }

    #[test]
    fn test_unescape_predefined_entities() {
        let raw = "Please &lt;a href=&apos;%1&apos;&gt;donate&lt;/a&gt; &amp; &quot;thanks&quot;";
        assert_eq!(
            unescape(raw).unwrap(),
            "Please <a href='%1'>donate</a> & \"thanks\""
        );
    }

    #[test]
    fn test_unescape_does_not_double_decode() {
        assert_eq!(unescape("&amp;lt;").unwrap(), "&lt;");
    }

    #[test]
    fn test_unescape_numeric_references() {
        assert_eq!(unescape("&#1028;&#x406;").unwrap(), "ЄІ");
    }

    #[test]
    fn test_unescape_errors_report_offset() {
        let (offset, kind) = unescape("P&revious").unwrap_err();
        assert_eq!(offset, 1);
        assert_eq!(kind, ParseErrorKind::InvalidMarkup("unterminated entity".into()));

        let (offset, kind) = unescape("ab &nbsp; cd").unwrap_err();
        assert_eq!(offset, 3);
        assert_eq!(kind, ParseErrorKind::UnknownEntity("nbsp".into()));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape("Where's <a href='%1'>R&D</a>"),
            "Where&apos;s &lt;a href=&apos;%1&apos;&gt;R&amp;D&lt;/a&gt;"
        );
        assert!(matches!(escape("Версія %1"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_then_unescape_is_identity() {
        let text = "Move &Up <b>\"quoted\"</b> it's";
        assert_eq!(unescape(&escape(text)).unwrap(), text);
    }
}
