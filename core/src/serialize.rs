//! HTML serialization of a document subtree.
//!
//! Output is a pure function of tree shape, tags, attributes and text. Event
//! listeners and watch markers live outside the serialized surface, so they
//! leave no artifacts in the string.

use crate::document::{Document, NodeData, NodeId};

/// The HTML void-element set; these serialize self-closing, with no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns `true` for tags in the HTML void-element set.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Escapes text-node content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes an attribute value for double-quoted output.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Document {
    /// Serializes `id` and its subtree to HTML.
    #[must_use]
    pub fn node_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serializes the children of `id`, without the element itself.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serializes the whole document from the root.
    #[must_use]
    pub fn html(&self) -> String {
        self.node_html(self.root())
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Raw(markup) => out.push_str(markup),
            NodeData::Tombstone => {}
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(element.tag());
                for (name, value) in element.attributes() {
                    out.push(' ');
                    out.push_str(name);
                    // Bare boolean attributes carry an empty value.
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                if is_void_element(element.tag()) {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for &child in self.children(id) {
                        self.write_node(child, out);
                    }
                    out.push_str("</");
                    out.push_str(element.tag());
                    out.push('>');
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attribute_values() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", "a \"b\" <c>");
        let text = doc.create_text("1 < 2 & 3 > 2");
        doc.append(doc.root(), div);
        doc.append(div, text);

        assert_eq!(
            doc.node_html(div),
            "<div title=\"a &quot;b&quot; &lt;c&gt;\">1 &lt; 2 &amp; 3 &gt; 2</div>"
        );
    }

    #[test]
    fn void_elements_self_close() {
        let mut doc = Document::new();
        let br = doc.create_element("br");
        let input = doc.create_element("input");
        doc.set_attribute(input, "disabled", "");
        doc.append(doc.root(), br);
        doc.append(doc.root(), input);

        assert_eq!(doc.inner_html(doc.root()), "<br/><input disabled/>");
    }

    #[test]
    fn raw_nodes_emit_verbatim() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let raw = doc.create_raw("<b>bold</b>");
        doc.append(doc.root(), div);
        doc.append(div, raw);

        assert_eq!(doc.node_html(div), "<div><b>bold</b></div>");
    }

    #[test]
    fn html_covers_the_entire_document() {
        let mut doc = Document::with_root("main");
        let p = doc.create_element("p");
        doc.append(doc.root(), p);
        assert_eq!(doc.html(), "<main><p></p></main>");
    }
}
