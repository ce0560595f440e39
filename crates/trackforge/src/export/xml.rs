//! Minimal XML tree builder.
//!
//! Documents are assembled as an element tree and rendered in a single pass
//! that escapes every attribute value and text node, so user-supplied
//! strings (activity names in particular) can never break the markup.

/// An XML element with attributes and child nodes.
#[derive(Debug, Clone)]
pub struct XmlElement {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<XmlNode>,
}

#[derive(Debug, Clone)]
enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, element: XmlElement) -> Self {
        self.children.push(XmlNode::Element(element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Appends a child without consuming, for building in loops.
    pub fn push(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Renders this element as a complete document with an XML declaration.
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.render(&mut out, 0);
        out.push('\n');
        out
    }

    fn render(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, out);
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        // Text-only elements render inline; anything with element children
        // gets one child per line.
        let text_only = self
            .children
            .iter()
            .all(|c| matches!(c, XmlNode::Text(_)));

        out.push('>');
        if text_only {
            for child in &self.children {
                if let XmlNode::Text(text) = child {
                    escape_into(text, out);
                }
            }
        } else {
            for child in &self.children {
                out.push('\n');
                match child {
                    XmlNode::Element(el) => el.render(out, depth + 1),
                    XmlNode::Text(text) => {
                        for _ in 0..=depth {
                            out.push_str("  ");
                        }
                        escape_into(text, out);
                    }
                }
            }
            out.push('\n');
            for _ in 0..depth {
                out.push_str("  ");
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }
}

/// Escapes XML special characters into the output buffer.
fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_nested_elements() {
        let doc = XmlElement::new("root")
            .attr("version", "1.1")
            .child(XmlElement::new("leaf").text("value"))
            .to_document();

        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(doc.contains("<root version=\"1.1\">"));
        assert!(doc.contains("  <leaf>value</leaf>"));
        assert!(doc.contains("</root>"));
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let doc = XmlElement::new("name")
            .attr("label", "a<b & \"c\"")
            .text("Tom & Jerry <3")
            .to_document();

        assert!(doc.contains("label=\"a&lt;b &amp; &quot;c&quot;\""));
        assert!(doc.contains(">Tom &amp; Jerry &lt;3<"));
        assert!(!doc.contains("Tom & Jerry"));
    }

    #[test]
    fn test_empty_element_self_closes() {
        let doc = XmlElement::new("empty").attr("a", "1").to_document();
        assert!(doc.contains("<empty a=\"1\"/>"));
    }
}
