//! Minimal pull tokenizer for the markup subset used by TS documents.
//!
//! Yields start tags (with unescaped attributes), end tags, and unescaped
//! text. The XML declaration, processing instructions, `<!DOCTYPE>` and
//! comments are consumed silently. CDATA sections come through as text.
//! Every token carries the byte offset where it starts so the parser can
//! report positions.

use std::borrow::Cow;

use tscat_core::{CatalogParseError, ParseErrorKind};

use crate::escape::unescape;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Start {
        name: &'a str,
        attrs: Vec<(&'a str, String)>,
        self_closing: bool,
    },
    End {
        name: &'a str,
    },
    Text(Cow<'a, str>),
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        // A UTF-8 byte order mark is not part of the document.
        let pos = if input.starts_with('\u{feff}') { 3 } else { 0 };
        Self { input, pos }
    }

    pub(crate) fn error(&self, offset: usize, kind: ParseErrorKind) -> CatalogParseError {
        CatalogParseError::at(self.input, offset, kind)
    }

    /// Next token and its start offset, or `None` at end of input.
    pub(crate) fn next_token(&mut self) -> Result<Option<(usize, Token<'a>)>, CatalogParseError> {
        let input = self.input;
        loop {
            let start = self.pos;
            let rest = &input[start..];
            if rest.is_empty() {
                return Ok(None);
            }

            if rest.starts_with("<!--") {
                self.pos = start + self.find_after(start, 4, "-->")?;
            } else if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let Some(end) = body.find("]]>") else {
                    return Err(self.error(self.input.len(), ParseErrorKind::UnexpectedEof));
                };
                self.pos = start + 9 + end + 3;
                return Ok(Some((start, Token::Text(Cow::Borrowed(&body[..end])))));
            } else if rest.starts_with("<?") {
                self.pos = start + self.find_after(start, 2, "?>")?;
            } else if rest.starts_with("<!") {
                self.skip_declaration(start)?;
            } else if rest.starts_with("</") {
                return self.end_tag(start).map(Some);
            } else if rest.starts_with('<') {
                return self.start_tag(start).map(Some);
            } else {
                let len = rest.find('<').unwrap_or(rest.len());
                let raw = &rest[..len];
                self.pos = start + len;
                let text = unescape(raw).map_err(|(at, kind)| self.error(start + at, kind))?;
                return Ok(Some((start, Token::Text(text))));
            }
        }
    }

    /// Length from `start` through the end of `terminator`, searching from
    /// `start + skip`.
    fn find_after(&self, start: usize, skip: usize, terminator: &str) -> Result<usize, CatalogParseError> {
        match self.input[start + skip..].find(terminator) {
            Some(idx) => Ok(skip + idx + terminator.len()),
            None => Err(self.error(self.input.len(), ParseErrorKind::UnexpectedEof)),
        }
    }

    /// Skip `<!DOCTYPE ...>`, including a bracketed internal subset.
    fn skip_declaration(&mut self, start: usize) -> Result<(), CatalogParseError> {
        let mut depth = 0usize;
        for (i, c) in self.input[start..].char_indices() {
            match c {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => {
                    self.pos = start + i + 1;
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(self.error(self.input.len(), ParseErrorKind::UnexpectedEof))
    }

    fn end_tag(&mut self, start: usize) -> Result<(usize, Token<'a>), CatalogParseError> {
        self.pos = start + 2;
        let name = self.name()?;
        self.skip_whitespace();
        self.expect('>')?;
        Ok((start, Token::End { name }))
    }

    fn start_tag(&mut self, start: usize) -> Result<(usize, Token<'a>), CatalogParseError> {
        self.pos = start + 1;
        let name = self.name()?;
        let mut attrs: Vec<(&'a str, String)> = Vec::new();
        loop {
            let had_space = self.skip_whitespace();
            let rest = &self.input[self.pos..];
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok((start, Token::Start { name, attrs, self_closing: true }));
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok((start, Token::Start { name, attrs, self_closing: false }));
            }
            if rest.is_empty() {
                return Err(self.error(self.pos, ParseErrorKind::UnexpectedEof));
            }
            if !had_space {
                return Err(self.error(
                    self.pos,
                    ParseErrorKind::InvalidMarkup(format!("malformed tag <{name}>")),
                ));
            }

            let attr_at = self.pos;
            let key = self.name()?;
            self.skip_whitespace();
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.quoted_value()?;
            if attrs.iter().any(|(k, _)| *k == key) {
                return Err(self.error(
                    attr_at,
                    ParseErrorKind::InvalidMarkup(format!("duplicate attribute '{key}'")),
                ));
            }
            attrs.push((key, value));
        }
    }

    fn name(&mut self) -> Result<&'a str, CatalogParseError> {
        let input = self.input;
        let rest = &input[self.pos..];
        let len = rest
            .char_indices()
            .find(|&(_, c)| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(if rest.is_empty() {
                self.error(self.pos, ParseErrorKind::UnexpectedEof)
            } else {
                self.error(self.pos, ParseErrorKind::InvalidMarkup("expected a name".into()))
            });
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn quoted_value(&mut self) -> Result<String, CatalogParseError> {
        let rest = &self.input[self.pos..];
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            Some(_) => {
                return Err(self.error(
                    self.pos,
                    ParseErrorKind::InvalidMarkup("attribute value must be quoted".into()),
                ))
            }
            None => return Err(self.error(self.pos, ParseErrorKind::UnexpectedEof)),
        };
        let Some(len) = rest[1..].find(quote) else {
            return Err(self.error(self.input.len(), ParseErrorKind::UnexpectedEof));
        };
        let raw = &rest[1..1 + len];
        let value_at = self.pos + 1;
        let value = unescape(raw)
            .map_err(|(at, kind)| self.error(value_at + at, kind))?
            .into_owned();
        self.pos += len + 2;
        Ok(value)
    }

    fn skip_whitespace(&mut self) -> bool {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        let skipped = rest.len() - trimmed.len();
        self.pos += skipped;
        skipped > 0
    }

    fn expect(&mut self, c: char) -> Result<(), CatalogParseError> {
        let rest = &self.input[self.pos..];
        match rest.chars().next() {
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(self.error(
                self.pos,
                ParseErrorKind::InvalidMarkup(format!("expected '{c}', found '{found}'")),
            )),
            None => Err(self.error(self.pos, ParseErrorKind::UnexpectedEof)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        let mut t = Tokenizer::new(input);
        let mut out = Vec::new();
        while let Some((_, tok)) = t.next_token().unwrap() {
            out.push(tok);
        }
        out
    }

    #[test]
    fn test_prolog_is_skipped() {
        let input = "<?xml version=\"1.0\" ?><!DOCTYPE TS><!-- note --><TS language=\"uk\" version=\"2.0\"/>";
        let toks = tokens(input);
        assert_eq!(toks.len(), 1);
        assert_eq!(
            toks[0],
            Token::Start {
                name: "TS",
                attrs: vec![("language", "uk".to_string()), ("version", "2.0".to_string())],
                self_closing: true,
            }
        );
    }

    #[test]
    fn test_doctype_with_internal_subset() {
        let toks = tokens("<!DOCTYPE TS [ <!ENTITY x \"y\"> ]><TS></TS>");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[1], Token::End { name: "TS" });
    }

    #[test]
    fn test_text_is_unescaped() {
        let toks = tokens("<source>&amp;Close</source>");
        assert_eq!(toks[1], Token::Text(Cow::Owned("&Close".to_string())));
    }

    #[test]
    fn test_cdata_is_verbatim() {
        let toks = tokens("<source><![CDATA[a < b & c]]></source>");
        assert_eq!(toks[1], Token::Text(Cow::Borrowed("a < b & c")));
    }

    #[test]
    fn test_single_quoted_attribute_with_entity() {
        let toks = tokens("<translation type='unfinished' note='a&amp;b'/>");
        let Token::Start { attrs, .. } = &toks[0] else {
            panic!("expected start tag");
        };
        assert_eq!(attrs[1], ("note", "a&b".to_string()));
    }

    #[test]
    fn test_offsets_point_at_tokens() {
        let mut t = Tokenizer::new("<a>\n  <b/>");
        assert_eq!(t.next_token().unwrap().unwrap().0, 0);
        assert_eq!(t.next_token().unwrap().unwrap().0, 3);
        assert_eq!(t.next_token().unwrap().unwrap().0, 6);
        assert!(t.next_token().unwrap().is_none());
    }

    #[test]
    fn test_unterminated_tag_is_eof() {
        let mut t = Tokenizer::new("<context");
        let err = t.next_token().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_unquoted_attribute_rejected() {
        let mut t = Tokenizer::new("<TS version=2.0>");
        let err = t.next_token().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidMarkup(_)));
        assert_eq!(err.column, 13);
    }

    #[test]
    fn test_bad_entity_position() {
        let mut t = Tokenizer::new("<source>\nP&revious</source>");
        t.next_token().unwrap();
        let err = t.next_token().unwrap_err();
        assert_eq!((err.line, err.column), (2, 2));
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let mut t = Tokenizer::new("<TS language=\"uk\" language=\"ru\">");
        let err = t.next_token().unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidMarkup(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn test_byte_order_mark_skipped() {
        let toks = tokens("\u{feff}<TS/>");
        assert_eq!(toks.len(), 1);
    }
}
