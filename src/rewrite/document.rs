//! Owned HTML document model.
//!
//! Parses markup with `tl` and converts the result into an owned element
//! tree, so rewriting logic never touches parser types and can be tested
//! against documents built in memory. Serialization follows HTML
//! void-element rules; raw text, comments and doctypes pass through
//! verbatim.

/// A single node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text, comment or doctype span, emitted verbatim.
    Raw(String),
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attribute pairs; `None` value means a bare boolean attribute.
    pub attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str, attrs: Vec<(String, Option<String>)>) -> Self {
        Self {
            tag: tag.to_string(),
            attrs,
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Set an attribute value, appending the attribute if absent.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = Some(value.to_string()),
            None => self.attrs.push((name.to_string(), Some(value.to_string()))),
        }
    }
}

/// A parsed document: a sequence of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

/// Parse raw markup into a document tree.
///
/// Malformed markup is handled by `tl`'s error recovery; if parsing fails
/// outright the content is preserved as a single raw node so the page is
/// never lost.
pub fn parse(html: &str) -> Document {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Document {
            nodes: vec![Node::Raw(html.to_string())],
        };
    };

    let parser = dom.parser();
    let mut nodes = Vec::new();
    for handle in dom.children() {
        if let Some(node) = convert_node(*handle, parser) {
            nodes.push(node);
        }
    }
    Document { nodes }
}

/// Convert a `tl` node handle into an owned node.
fn convert_node(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();

            let mut attrs: Vec<(String, Option<String>)> = tag
                .attributes()
                .iter()
                .map(|(key, value)| (key.to_string(), value.map(|v| v.to_string())))
                .collect();
            // tl exposes attributes through a map, so source order is not
            // reliable; sort for a stable, canonical serialization
            attrs.sort_by(|a, b| a.0.cmp(&b.0));

            let mut element = Element {
                tag: tag_name,
                attrs,
                children: Vec::new(),
            };

            for child in tag.children().top().iter() {
                if let Some(node) = convert_node(*child, parser) {
                    element.children.push(node);
                }
            }

            Some(Node::Element(element))
        }
        tl::Node::Raw(bytes) => Some(Node::Raw(bytes.as_utf8_str().to_string())),
        tl::Node::Comment(bytes) => Some(Node::Raw(bytes.as_utf8_str().to_string())),
    }
}

impl Document {
    /// Serialize the document tree back to markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(node, &mut out);
        }
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Raw(text) => out.push_str(text),
        Node::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                if let Some(value) = value {
                    // Values are emitted verbatim; pick the quote character
                    // the value does not contain
                    let quote = if value.contains('"') { '\'' } else { '"' };
                    out.push('=');
                    out.push(quote);
                    out.push_str(value);
                    out.push(quote);
                }
            }
            out.push('>');

            if is_void_element(&element.tag) {
                return;
            }

            for child in &element.children {
                write_node(child, out);
            }

            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

/// Check if an HTML tag is a void element (no closing tag).
#[inline]
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}
