//! Typed XML document query layer
//!
//! Parses an XML document into a small element tree so that readers can ask
//! for children, attributes and text by local tag name without dealing with
//! the streaming parser or namespace prefixes.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::ImportError;

/// An element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

/// Strip a namespace prefix (`bpmn2:process` -> `process`)
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}

impl XmlElement {
    /// Qualified tag name as written in the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without namespace prefix
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    pub fn is(&self, local_name: &str) -> bool {
        self.local_name() == local_name
    }

    /// Attribute value by local attribute name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name || local_part(key) == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Direct children with the given local name
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is(local_name))
    }

    /// First direct child with the given local name
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is(local_name))
    }

    /// Trimmed text content of the first direct child with the given local
    /// name; `None` if there is no such child or its text is blank.
    pub fn find_child_text(&self, local_name: &str) -> Option<String> {
        self.child(local_name)
            .map(|c| c.text_content().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Text of this element and all of its descendants, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// All descendants (excluding self) with the given local name, in
    /// document order
    pub fn descendants<'a>(&'a self, local_name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(local_name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, local_name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.is(local_name) {
                found.push(child);
            }
            child.collect_descendants(local_name, found);
        }
    }
}

/// A parsed XML document with exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parse a document.
    ///
    /// Fails on malformed markup, unclosed elements, or a document without
    /// a root element.
    pub fn parse(content: &str) -> Result<Self, ImportError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(element_from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let element = element_from_start(&e)?;
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        ImportError::XmlParseError("unexpected closing tag".to_string())
                    })?;
                    attach(element, &mut stack, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|err| ImportError::XmlParseError(err.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ImportError::XmlParseError(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(ImportError::XmlParseError(format!(
                "unclosed element <{}>",
                open.name
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| ImportError::XmlParseError("document has no root element".to_string()))
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// All elements with the given local name, root included
    pub fn elements<'a>(&'a self, local_name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        if self.root.is(local_name) {
            found.push(&self.root);
        }
        found.extend(self.root.descendants(local_name));
        found
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, ImportError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ImportError::XmlParseError(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| ImportError::XmlParseError(e.to_string()))?
            .to_string();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        ..Default::default()
    })
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), ImportError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(ImportError::XmlParseError(format!(
                "multiple root elements (found <{}>)",
                element.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements_and_attributes() {
        let doc = XmlDocument::parse(
            r#"<?xml version="1.0"?>
            <bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL">
                <bpmn2:process id="P1" name="Order &amp; Invoice">
                    <bpmn2:task id="T1"/>
                </bpmn2:process>
            </bpmn2:definitions>"#,
        )
        .unwrap();

        assert!(doc.root().is("definitions"));
        let process = doc.root().child("process").unwrap();
        assert_eq!(process.attribute("name"), Some("Order & Invoice"));
        assert_eq!(process.children().len(), 1);
        assert_eq!(process.children()[0].name(), "bpmn2:task");
    }

    #[test]
    fn test_find_child_text_trims_and_skips_blank() {
        let doc =
            XmlDocument::parse("<p><name>  host </name><type></type><x><![CDATA[a<b]]></x></p>")
                .unwrap();
        assert_eq!(doc.root().find_child_text("name").as_deref(), Some("host"));
        assert_eq!(doc.root().find_child_text("type"), None);
        assert_eq!(doc.root().find_child_text("missing"), None);
        assert_eq!(doc.root().find_child_text("x").as_deref(), Some("a<b"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc =
            XmlDocument::parse("<r><a id='1'><a id='2'/></a><b><a id='3'/></b></r>").unwrap();
        let ids: Vec<_> = doc
            .elements("a")
            .iter()
            .filter_map(|a| a.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(XmlDocument::parse("").is_err());
        assert!(XmlDocument::parse("just text").is_err());
        assert!(XmlDocument::parse("<a><b></a>").is_err());
        assert!(XmlDocument::parse("<a>").is_err());
        assert!(XmlDocument::parse("<a/><b/>").is_err());
    }
}
