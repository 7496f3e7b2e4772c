//! Renders nodes back to XML text fragments.
//!
//! Fragments carry no XML declaration and are indented two spaces per
//! nesting level. An element whose only child is text renders on one
//! line; an attribute node renders as `name="value"`; a document node
//! renders as its children.

use crate::node::NodeHandle;
use crate::tree::{Document, NodeId, NodePayload};

/// Renders a single node as an XML fragment.
pub fn fragment(node: &NodeHandle) -> String {
    let mut out = String::new();
    write_node(node.document(), node.id(), 0, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match &doc.node(id).payload {
        NodePayload::Document => {
            for (i, &child) in doc.node(id).children.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                write_node(doc, child, depth, out);
            }
        }
        NodePayload::Text { content } => {
            out.push_str(&pad);
            out.push_str(&escape_text(content));
        }
        NodePayload::Attribute { name, value } => {
            out.push_str(&pad);
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        NodePayload::Element { name } => {
            out.push_str(&pad);
            out.push('<');
            out.push_str(name);
            for &attr in &doc.node(id).attributes {
                if let NodePayload::Attribute { name, value } = &doc.node(attr).payload {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
            }

            let children = &doc.node(id).children;
            let inline_text = match children.as_slice() {
                [only] => match &doc.node(*only).payload {
                    NodePayload::Text { content } => Some(content.as_str()),
                    _ => None,
                },
                _ => None,
            };

            if children.is_empty() {
                out.push_str("/>");
            } else if let Some(content) = inline_text {
                out.push('>');
                out.push_str(&escape_text(content));
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            } else {
                out.push('>');
                for &child in children {
                    out.push('\n');
                    write_node(doc, child, depth + 1, out);
                }
                out.push('\n');
                out.push_str(&pad);
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(raw: &str) -> String {
    escape_text(raw).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;
    use quarry_xpath::XmlNode;
    use std::rc::Rc;

    fn load(source: &str) -> NodeHandle {
        NodeHandle::document_node(Rc::new(parse_document(source).unwrap()))
    }

    #[test]
    fn renders_nested_elements_with_two_space_indent() {
        let doc = load(r#"<library><book id="1"><title>A</title></book><book/></library>"#);
        assert_eq!(
            fragment(&doc),
            "<library>\n  <book id=\"1\">\n    <title>A</title>\n  </book>\n  <book/>\n</library>"
        );
    }

    #[test]
    fn renders_leaf_forms() {
        let doc = load(r#"<b id="1">A</b>"#);
        let b = &doc.children()[0];
        assert_eq!(fragment(b), "<b id=\"1\">A</b>");
        assert_eq!(fragment(&b.attribute("id").unwrap()), "id=\"1\"");
        assert_eq!(fragment(&b.text()[0]), "A");
    }

    #[test]
    fn escapes_markup_characters() {
        let doc = load("<a t=\"x &amp; &quot;y&quot;\">1 &lt; 2</a>");
        let a = &doc.children()[0];
        assert_eq!(fragment(a), "<a t=\"x &amp; &quot;y&quot;\">1 &lt; 2</a>");
    }

    #[test]
    fn fragments_reparse_to_an_equal_tree() {
        let doc = load(r#"<library><book id="1"><title>A</title><extra/></book></library>"#);
        let library = &doc.children()[0];
        let reparsed = load(&fragment(library));
        assert!(library.structural_eq(&reparsed.children()[0]));
    }
}
