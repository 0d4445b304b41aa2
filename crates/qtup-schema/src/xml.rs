//! Minimal element tree over `quick-xml` events.
//!
//! Manifests are small, so the whole document is materialized once and then
//! queried by tag name. Only element names, character data and nesting are
//! kept; attributes are checked for well-formedness and then dropped, as are
//! comments and processing instructions.

use crate::error::ManifestError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One element of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    pub(crate) name: String,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: None,
            children: Vec::new(),
        }
    }

    /// Character data that appears before the first child element.
    /// `None` when the element has no such data.
    pub(crate) fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First direct child with the given tag name.
    pub(crate) fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every element named `name` in this subtree, in document order,
    /// starting with `self`.
    pub(crate) fn descendants<'a>(&'a self, name: &'a str) -> Descendants<'a> {
        Descendants {
            stack: vec![self],
            name,
        }
    }

    fn push_text(&mut self, content: &str) {
        if content.is_empty() || !self.children.is_empty() {
            return;
        }
        let text = self.text.get_or_insert_with(String::new);
        if content.contains('\r') {
            text.push_str(&content.replace("\r\n", "\n").replace('\r', "\n"));
        } else {
            text.push_str(content);
        }
    }
}

/// Pre-order walk yielding elements with a matching tag name.
#[derive(Debug)]
pub(crate) struct Descendants<'a> {
    stack: Vec<&'a Element>,
    name: &'a str,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            self.stack.extend(element.children.iter().rev());
            if element.name == self.name {
                return Some(element);
            }
        }
        None
    }
}

/// Parse `text` into its root element.
///
/// # Errors
///
/// Returns [`ManifestError::Syntax`] when the tokenizer rejects the input and
/// [`ManifestError::Malformed`] when the tokens do not form exactly one
/// closed root element.
pub(crate) fn parse_document(text: &str) -> Result<Element, ManifestError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(malformed("multiple root elements"));
                }
                stack.push(Element::new(element_name(&start)?));
            }
            Event::Empty(start) => {
                let element = Element::new(element_name(&start)?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("end tag without matching start tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(data) => {
                let content = data.unescape()?;
                push_text(&mut stack, &content)?;
            }
            Event::CData(data) => {
                let content = std::str::from_utf8(&data)
                    .map_err(|e| malformed(&format!("CDATA is not valid UTF-8: {e}")))?;
                push_text(&mut stack, content)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(&format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| malformed("document has no root element"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ManifestError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(malformed("multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], content: &str) -> Result<(), ManifestError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(malformed("text outside the root element")),
    }
}

/// Validate a start tag and return its element name.
///
/// Attributes are not kept, but are still checked for quoting and duplicates.
fn element_name(start: &BytesStart<'_>) -> Result<String, ManifestError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map(str::to_owned)
        .map_err(|e| malformed(&format!("tag name is not valid UTF-8: {e}")))?;
    if !is_xml_name(&name) {
        return Err(malformed(&format!("invalid element name <{name}>")));
    }

    for attribute in start.attributes().with_checks(true) {
        attribute.map_err(quick_xml::Error::from)?;
    }
    Ok(name)
}

/// XML 1.0 `Name` production.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start_char) && chars.all(is_name_char)
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

fn malformed(reason: &str) -> ManifestError {
    ManifestError::Malformed(reason.to_string())
}
