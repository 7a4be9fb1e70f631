//! Minimal XML element tree built on top of `quick-xml`.
//!
//! The schedule walk needs random access to children (`find` the first
//! `title`, `findall` the `person` entries), so the event stream is folded
//! into a small owned tree first. Entities are never expanded: a DOCTYPE
//! declaring any entity is rejected, as is any reference to an entity other
//! than the five predefined ones.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ScheduleError, ScheduleResult};

/// An XML element with its attributes, leading text, and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// The element's tag name, as written (including any prefix).
    pub name: String,
    /// Attributes in document order, values unescaped.
    pub attributes: Vec<(String, String)>,
    /// Text appearing before the first child element.
    text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an empty element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the text before the first child, or `None` when there is none.
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// Returns the value of the named attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates over all direct children with the given name, in order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn push_text(&mut self, text: &str) {
        // Text after the first child is a tail, not part of `.text`.
        if self.children.is_empty() {
            self.text.push_str(text);
        }
    }
}

/// Parses a complete document and returns its root element.
///
/// # Errors
///
/// Returns [`ScheduleError::MalformedDocument`] if the input is not a single
/// well-formed UTF-8 XML document or declares entities.
pub fn parse_document(bytes: &[u8]) -> ScheduleResult<Element> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ScheduleError::malformed("multiple root elements"));
                }
                stack.push(element_from_start(&e)?);
            }
            Event::Empty(e) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ScheduleError::malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                match stack.last_mut() {
                    Some(current) => current.push_text(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(ScheduleError::malformed("text outside root element")),
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| {
                    ScheduleError::malformed(format!("invalid UTF-8 in CDATA: {err}"))
                })?;
                match stack.last_mut() {
                    Some(current) => current.push_text(text),
                    None => return Err(ScheduleError::malformed("CDATA outside root element")),
                }
            }
            Event::DocType(e) => {
                if contains(&e, b"<!ENTITY") {
                    return Err(ScheduleError::malformed("entity declarations are not allowed"));
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ScheduleError::malformed(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| ScheduleError::malformed("document has no root element"))
}

fn element_from_start(start: &BytesStart<'_>) -> ScheduleResult<Element> {
    let name = decode_name(start.name().as_ref())?;
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ScheduleError::malformed(e.to_string()))?;
        let key = decode_name(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> ScheduleResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(ScheduleError::malformed("multiple root elements")),
        None => *root = Some(element),
    }
    Ok(())
}

fn decode_name(raw: &[u8]) -> ScheduleResult<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| ScheduleError::malformed(format!("invalid UTF-8 in name: {e}")))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
