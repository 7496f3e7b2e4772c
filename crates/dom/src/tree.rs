//! Arena-based XML document tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by the
//! [`Document`] and are referenced by [`NodeId`] indices, which sidesteps
//! parent/child ownership cycles entirely. Node 0 is always the document
//! node; ids grow in the order nodes are created, which for parsed
//! documents is preorder document order.
//!
//! Attributes are arena nodes too, linked from their element but excluded
//! from `children`, so an attribute handle can navigate back to its
//! owning element.

use crate::error::DomError;

/// An index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The payload of one node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    /// The node above the root element; exactly one per document.
    Document,
    Element { name: String },
    Attribute { name: String, value: String },
    Text { content: String },
}

#[derive(Debug, Clone)]
pub struct NodeData {
    pub payload: NodePayload,
    pub parent: Option<NodeId>,
    /// Element and text children in document order. Empty for attribute
    /// and text nodes.
    pub children: Vec<NodeId>,
    /// Attribute nodes in source order. Empty for everything but elements.
    pub attributes: Vec<NodeId>,
}

impl NodeData {
    fn new(payload: NodePayload) -> Self {
        NodeData {
            payload,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }
}

/// An XML document owning all of its nodes.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Creates an empty document containing only the document node.
    pub fn new() -> Self {
        Document {
            nodes: vec![NodeData::new(NodePayload::Document)],
        }
    }

    /// The document node, parent of the root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The single element child of the document node, if the document has
    /// been populated.
    pub fn root_element(&self) -> Option<NodeId> {
        self.node(self.root())
            .children
            .iter()
            .copied()
            .find(|&id| matches!(self.node(id).payload, NodePayload::Element { .. }))
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    fn push(&mut self, payload: NodePayload) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData::new(payload));
        id
    }

    /// Allocates a detached element node.
    pub fn new_element(&mut self, name: String) -> NodeId {
        self.push(NodePayload::Element { name })
    }

    /// Allocates a detached text node.
    pub fn new_text(&mut self, content: String) -> NodeId {
        self.push(NodePayload::Text { content })
    }

    /// Appends a detached node to a parent's child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.node(child).parent.is_none());
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Allocates an attribute node on an element.
    pub fn add_attribute(&mut self, element: NodeId, name: String, value: String) -> NodeId {
        let id = self.push(NodePayload::Attribute { name, value });
        self.node_mut(id).parent = Some(element);
        self.node_mut(element).attributes.push(id);
        id
    }

    /// Deep-copies a node from another document under `parent`. Copying an
    /// attribute node attaches it as an attribute of `parent`; copying a
    /// document node copies its children.
    pub fn copy_node(&mut self, parent: NodeId, source: &Document, src: NodeId) {
        match source.node(src).payload.clone() {
            NodePayload::Document => {
                for child in source.node(src).children.clone() {
                    self.copy_node(parent, source, child);
                }
            }
            NodePayload::Element { name } => {
                let elem = self.new_element(name);
                self.append_child(parent, elem);
                for attr in source.node(src).attributes.clone() {
                    if let NodePayload::Attribute { name, value } = source.node(attr).payload.clone()
                    {
                        self.add_attribute(elem, name, value);
                    }
                }
                for child in source.node(src).children.clone() {
                    self.copy_node(elem, source, child);
                }
            }
            NodePayload::Attribute { name, value } => {
                self.add_attribute(parent, name, value);
            }
            NodePayload::Text { content } => {
                let text = self.new_text(content);
                self.append_child(parent, text);
            }
        }
    }

    /// Checks the shape every well-formed document must have: exactly one
    /// element and nothing else under the document node.
    pub(crate) fn check_well_formed(&self) -> Result<(), DomError> {
        let top = &self.node(self.root()).children;
        let elements = top
            .iter()
            .filter(|&&id| matches!(self.node(id).payload, NodePayload::Element { .. }))
            .count();
        if elements == 0 {
            return Err(DomError::Malformed("document has no root element".into()));
        }
        if elements > 1 {
            return Err(DomError::Malformed(
                "document has more than one root element".into(),
            ));
        }
        if top.len() != elements {
            return Err(DomError::Malformed(
                "text content outside the root element".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_only_the_document_node() {
        let doc = Document::new();
        assert_eq!(doc.node(doc.root()).payload, NodePayload::Document);
        assert!(doc.root_element().is_none());
    }

    #[test]
    fn append_builds_parent_links_in_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let lib = doc.new_element("library".into());
        doc.append_child(root, lib);
        let a = doc.new_text("a".into());
        let b = doc.new_text("b".into());
        doc.append_child(lib, a);
        doc.append_child(lib, b);

        assert_eq!(doc.root_element(), Some(lib));
        assert_eq!(doc.node(lib).children, vec![a, b]);
        assert_eq!(doc.node(a).parent, Some(lib));
    }

    #[test]
    fn attributes_are_nodes_with_an_owning_element() {
        let mut doc = Document::new();
        let root = doc.root();
        let book = doc.new_element("book".into());
        doc.append_child(root, book);
        let id = doc.add_attribute(book, "id".into(), "1".into());

        assert_eq!(doc.node(id).parent, Some(book));
        assert!(doc.node(book).children.is_empty());
        assert_eq!(doc.node(book).attributes, vec![id]);
    }

    #[test]
    fn copy_node_deep_copies_across_documents() {
        let mut src = Document::new();
        let root = src.root();
        let book = src.new_element("book".into());
        src.append_child(root, book);
        src.add_attribute(book, "id".into(), "1".into());
        let title = src.new_element("title".into());
        src.append_child(book, title);
        let text = src.new_text("A".into());
        src.append_child(title, text);

        let mut dst = Document::new();
        let wrapper = dst.new_element("shelf".into());
        let dst_root = dst.root();
        dst.append_child(dst_root, wrapper);
        dst.copy_node(wrapper, &src, book);
        let copied = dst.node(wrapper).children[0];

        assert_eq!(
            dst.node(copied).payload,
            NodePayload::Element { name: "book".into() }
        );
        let attr = dst.node(copied).attributes[0];
        assert_eq!(
            dst.node(attr).payload,
            NodePayload::Attribute { name: "id".into(), value: "1".into() }
        );
        let copied_title = dst.node(copied).children[0];
        let copied_text = dst.node(copied_title).children[0];
        assert_eq!(
            dst.node(copied_text).payload,
            NodePayload::Text { content: "A".into() }
        );
    }
}
