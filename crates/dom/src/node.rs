//! Node handles: the arena document behind a shared pointer, plus an index.
//!
//! A handle keeps its document alive, so results of a query stay valid
//! after the loader that produced them is gone. Identity comparison pairs
//! the document allocation with the node index; handles into structurally
//! identical but separately loaded documents are distinct.

use crate::tree::{Document, NodeId, NodePayload};
use quarry_xpath::{NodeKind, XmlNode};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Clone)]
pub struct NodeHandle {
    doc: Rc<Document>,
    id: NodeId,
}

impl NodeHandle {
    pub fn new(doc: Rc<Document>, id: NodeId) -> Self {
        NodeHandle { doc, id }
    }

    /// The handle for a document's own document node.
    pub fn document_node(doc: Rc<Document>) -> Self {
        let id = doc.root();
        NodeHandle { doc, id }
    }

    pub fn document(&self) -> &Rc<Document> {
        &self.doc
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    fn payload(&self) -> &NodePayload {
        &self.doc.node(self.id).payload
    }

    fn wrap(&self, id: NodeId) -> NodeHandle {
        NodeHandle { doc: Rc::clone(&self.doc), id }
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            NodePayload::Document => write!(f, "document"),
            NodePayload::Element { name } => write!(f, "<{name}>"),
            NodePayload::Attribute { name, value } => write!(f, "@{name}={value:?}"),
            NodePayload::Text { content } => write!(f, "text({content:?})"),
        }
    }
}

impl PartialEq for NodeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.doc, &other.doc) && self.id == other.id
    }
}

impl Eq for NodeHandle {}

impl Hash for NodeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.doc) as usize).hash(state);
        self.id.hash(state);
    }
}

impl XmlNode for NodeHandle {
    fn kind(&self) -> NodeKind {
        match self.payload() {
            NodePayload::Document => NodeKind::Document,
            NodePayload::Element { .. } => NodeKind::Element,
            NodePayload::Attribute { .. } => NodeKind::Attribute,
            NodePayload::Text { .. } => NodeKind::Text,
        }
    }

    fn tag(&self) -> Option<&str> {
        match self.payload() {
            NodePayload::Element { name } | NodePayload::Attribute { name, .. } => {
                Some(name.as_str())
            }
            _ => None,
        }
    }

    fn value(&self) -> Option<&str> {
        match self.payload() {
            NodePayload::Attribute { value, .. } => Some(value.as_str()),
            NodePayload::Text { content } => Some(content.as_str()),
            _ => None,
        }
    }

    fn children(&self) -> Vec<Self> {
        self.doc
            .node(self.id)
            .children
            .iter()
            .map(|&id| self.wrap(id))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.doc.node(self.id).parent.map(|id| self.wrap(id))
    }

    fn attributes(&self) -> Vec<Self> {
        self.doc
            .node(self.id)
            .attributes
            .iter()
            .map(|&id| self.wrap(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;

    fn load(source: &str) -> NodeHandle {
        NodeHandle::document_node(Rc::new(parse_document(source).unwrap()))
    }

    #[test]
    fn navigation_mirrors_the_arena() {
        let doc = load(r#"<library><book id="1"><title>A</title></book></library>"#);
        assert_eq!(doc.kind(), NodeKind::Document);
        assert_eq!(doc.tag(), None);

        let library = &doc.children()[0];
        assert_eq!(library.tag(), Some("library"));
        assert_eq!(library.parent().as_ref(), Some(&doc));

        let book = &library.children()[0];
        let id = book.attribute("id").unwrap();
        assert_eq!(id.kind(), NodeKind::Attribute);
        assert_eq!(id.value(), Some("1"));
        assert_eq!(id.parent().as_ref(), Some(book));

        let title = &book.children()[0];
        let texts = title.text();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].value(), Some("A"));
    }

    #[test]
    fn identity_is_per_document_instance() {
        let source = "<a><b/></a>";
        let first = load(source);
        let second = load(source);

        assert_ne!(first, second);
        assert!(first.structural_eq(&second));

        let also_first = first.clone();
        assert_eq!(first, also_first);
    }

    #[test]
    fn structural_eq_ignores_attribute_order() {
        let one = load(r#"<a x="1" y="2"/>"#);
        let two = load(r#"<a y="2" x="1"/>"#);
        assert!(one.structural_eq(&two));

        let three = load(r#"<a x="1" y="3"/>"#);
        assert!(!one.structural_eq(&three));
    }
}
