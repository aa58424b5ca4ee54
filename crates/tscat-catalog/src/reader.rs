//! TS document parser: turns the token stream into a [`Catalog`].

use tracing::debug;
use tscat_core::{CatalogParseError, Entry, Header, Location, ParseErrorKind, Status};

use crate::catalog::Catalog;
use crate::markup::{Token, Tokenizer};

/// Format version assumed when the root carries no `version` attribute.
const DEFAULT_VERSION: &str = "2.0";

pub(crate) fn parse(input: &str) -> Result<Catalog, CatalogParseError> {
    let mut parser = Parser {
        tokens: Tokenizer::new(input),
    };
    parser.document()
}

struct Parser<'a> {
    tokens: Tokenizer<'a>,
}

/// A markup token in element-only content, where text has been ruled out.
enum Tag<'a> {
    Start {
        name: &'a str,
        attrs: Vec<(&'a str, String)>,
        self_closing: bool,
    },
    End {
        name: &'a str,
    },
}

impl<'a> Parser<'a> {
    fn document(&mut self) -> Result<Catalog, CatalogParseError> {
        let (offset, tag) = self.next_tag()?;
        let (attrs, self_closing) = match tag {
            Tag::Start {
                name: "TS",
                attrs,
                self_closing,
            } => (attrs, self_closing),
            Tag::Start { name, .. } | Tag::End { name } => {
                return Err(self.tokens.error(offset, ParseErrorKind::InvalidRoot(name.to_string())))
            }
        };

        let header = Header {
            language: attr(&attrs, "language").unwrap_or_default().to_string(),
            source_language: attr(&attrs, "sourcelanguage").map(str::to_string),
            version: attr(&attrs, "version").unwrap_or(DEFAULT_VERSION).to_string(),
            codec: None,
        };
        let mut catalog = Catalog::with_header(header);

        if !self_closing {
            self.root_children(&mut catalog)?;
        }
        self.trailing()?;

        debug!(
            "parsed catalog '{}' with {} entries",
            catalog.language(),
            catalog.len()
        );
        Ok(catalog)
    }

    fn root_children(&mut self, catalog: &mut Catalog) -> Result<(), CatalogParseError> {
        let mut codec = None;
        loop {
            let (offset, tag) = self.next_tag()?;
            match tag {
                Tag::Start {
                    name: name @ "defaultcodec",
                    self_closing,
                    ..
                } => self.text_once(&mut codec, offset, name, self_closing)?,
                Tag::Start {
                    name: "context",
                    self_closing,
                    ..
                } => {
                    if !self_closing {
                        self.context(offset, catalog)?;
                    }
                }
                Tag::Start {
                    name, self_closing, ..
                } => {
                    debug!("skipping <{name}> in <TS>");
                    if !self_closing {
                        self.skip(name)?;
                    }
                }
                Tag::End { name: "TS" } => break,
                Tag::End { name } => return Err(self.mismatch(offset, "TS", name)),
            }
        }

        if codec.is_some() {
            catalog.header_mut().codec = codec;
        }
        Ok(())
    }

    fn context(&mut self, start: usize, catalog: &mut Catalog) -> Result<(), CatalogParseError> {
        let mut name: Option<String> = None;
        let mut messages: Vec<(usize, Entry)> = Vec::new();
        loop {
            let (offset, tag) = self.next_tag()?;
            match tag {
                Tag::Start {
                    name: tag @ "name",
                    self_closing,
                    ..
                } => self.text_once(&mut name, offset, tag, self_closing)?,
                Tag::Start {
                    name: "message",
                    attrs,
                    self_closing,
                } => {
                    if attr(&attrs, "numerus") == Some("yes") {
                        return Err(self
                            .tokens
                            .error(offset, ParseErrorKind::UnexpectedElement("numerusform".into())));
                    }
                    if self_closing {
                        return Err(self.tokens.error(offset, ParseErrorKind::MissingElement("source")));
                    }
                    messages.push((offset, self.message(offset)?));
                }
                Tag::Start {
                    name: tag,
                    self_closing,
                    ..
                } => {
                    debug!("skipping <{tag}> in <context>");
                    if !self_closing {
                        self.skip(tag)?;
                    }
                }
                Tag::End { name: "context" } => break,
                Tag::End { name: found } => return Err(self.mismatch(offset, "context", found)),
            }
        }

        let Some(context) = name else {
            return Err(self.tokens.error(start, ParseErrorKind::MissingElement("name")));
        };
        for (offset, mut entry) in messages {
            entry.context = context.clone();
            if let Err(dup) = catalog.insert(entry) {
                return Err(self.tokens.error(
                    offset,
                    ParseErrorKind::DuplicateEntry {
                        context: dup.context,
                        source: dup.source,
                    },
                ));
            }
        }
        Ok(())
    }

    /// Parse a `<message>` body. The context is filled in by the caller.
    fn message(&mut self, start: usize) -> Result<Entry, CatalogParseError> {
        let mut source = None;
        let mut translation = None;
        let mut status = Status::Unfinished;
        let mut entry = Entry::unfinished("", "");
        loop {
            let (offset, tag) = self.next_tag()?;
            let (name, attrs, self_closing) = match tag {
                Tag::End { name: "message" } => break,
                Tag::End { name } => return Err(self.mismatch(offset, "message", name)),
                Tag::Start {
                    name,
                    attrs,
                    self_closing,
                } => (name, attrs, self_closing),
            };
            match name {
                "source" => self.text_once(&mut source, offset, name, self_closing)?,
                "oldsource" => self.text_once(&mut entry.old_source, offset, name, self_closing)?,
                "comment" => self.text_once(&mut entry.comment, offset, name, self_closing)?,
                "extracomment" => {
                    self.text_once(&mut entry.extra_comment, offset, name, self_closing)?
                }
                "translatorcomment" => {
                    self.text_once(&mut entry.translator_comment, offset, name, self_closing)?
                }
                "translation" => {
                    let kind = attr(&attrs, "type");
                    let Some(parsed) = Status::from_type_attr(kind) else {
                        return Err(self.tokens.error(
                            offset,
                            ParseErrorKind::InvalidMarkup(format!(
                                "unknown translation type '{}'",
                                kind.unwrap_or_default()
                            )),
                        ));
                    };
                    self.text_once(&mut translation, offset, name, self_closing)?;
                    status = parsed;
                }
                "location" => {
                    entry.locations.push(Location {
                        filename: attr(&attrs, "filename").map(str::to_string),
                        line: attr(&attrs, "line").map(str::to_string),
                    });
                    if !self_closing {
                        self.skip(name)?;
                    }
                }
                _ => {
                    debug!("skipping <{name}> in <message>");
                    if !self_closing {
                        self.skip(name)?;
                    }
                }
            }
        }

        let Some(source) = source else {
            return Err(self.tokens.error(start, ParseErrorKind::MissingElement("source")));
        };
        entry.source = source;
        entry.translation = translation.unwrap_or_default();
        entry.status = status;
        Ok(entry)
    }

    /// Read the text of a child that may appear at most once into `slot`.
    fn text_once(
        &mut self,
        slot: &mut Option<String>,
        offset: usize,
        element: &'a str,
        self_closing: bool,
    ) -> Result<(), CatalogParseError> {
        if slot.is_some() {
            return Err(self
                .tokens
                .error(offset, ParseErrorKind::UnexpectedElement(element.to_string())));
        }
        *slot = Some(if self_closing {
            String::new()
        } else {
            self.text_of(element)?
        });
        Ok(())
    }

    /// Collect the text content of an element whose start tag was just read.
    fn text_of(&mut self, element: &str) -> Result<String, CatalogParseError> {
        let mut text = String::new();
        loop {
            let (offset, token) = self.next()?;
            match token {
                Token::Text(chunk) => text.push_str(&chunk),
                Token::End { name } if name == element => return Ok(text),
                Token::End { name } => return Err(self.mismatch(offset, element, name)),
                Token::Start { name, .. } => {
                    return Err(self
                        .tokens
                        .error(offset, ParseErrorKind::UnexpectedElement(name.to_string())))
                }
            }
        }
    }

    /// Skip everything up to the end tag closing `element`.
    fn skip(&mut self, element: &'a str) -> Result<(), CatalogParseError> {
        let mut open: Vec<&'a str> = vec![element];
        while let Some(expected) = open.last().copied() {
            let (offset, token) = self.next()?;
            match token {
                Token::Start {
                    name,
                    self_closing: false,
                    ..
                } => open.push(name),
                Token::End { name } if name == expected => {
                    open.pop();
                }
                Token::End { name } => return Err(self.mismatch(offset, expected, name)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Only whitespace may follow `</TS>`.
    fn trailing(&mut self) -> Result<(), CatalogParseError> {
        while let Some((offset, token)) = self.tokens.next_token()? {
            match token {
                Token::Text(text) if text.trim().is_empty() => {}
                Token::Text(text) => {
                    return Err(self
                        .tokens
                        .error(offset, ParseErrorKind::UnexpectedText(text.into_owned())))
                }
                Token::Start { name, .. } | Token::End { name } => {
                    return Err(self
                        .tokens
                        .error(offset, ParseErrorKind::UnexpectedElement(name.to_string())))
                }
            }
        }
        Ok(())
    }

    fn next(&mut self) -> Result<(usize, Token<'a>), CatalogParseError> {
        match self.tokens.next_token()? {
            Some(item) => Ok(item),
            None => Err(self.eof()),
        }
    }

    /// Next start or end tag, skipping whitespace. Stray text is an error.
    fn next_tag(&mut self) -> Result<(usize, Tag<'a>), CatalogParseError> {
        loop {
            let (offset, token) = self.next()?;
            match token {
                Token::Text(text) if text.trim().is_empty() => continue,
                Token::Text(text) => {
                    let snippet: String = text.trim().chars().take(40).collect();
                    return Err(self
                        .tokens
                        .error(offset, ParseErrorKind::UnexpectedText(snippet)));
                }
                Token::Start {
                    name,
                    attrs,
                    self_closing,
                } => {
                    return Ok((
                        offset,
                        Tag::Start {
                            name,
                            attrs,
                            self_closing,
                        },
                    ))
                }
                Token::End { name } => return Ok((offset, Tag::End { name })),
            }
        }
    }

    fn eof(&self) -> CatalogParseError {
        self.tokens.error(usize::MAX, ParseErrorKind::UnexpectedEof)
    }

    fn mismatch(&self, offset: usize, expected: &str, found: &str) -> CatalogParseError {
        self.tokens.error(
            offset,
            ParseErrorKind::MismatchedTag {
                expected: expected.to_string(),
                found: found.to_string(),
            },
        )
    }
}

fn attr<'v>(attrs: &'v [(&str, String)], key: &str) -> Option<&'v str> {
    attrs
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}
