//! The contract between the evaluator and a navigable, read-only XML tree.
//!
//! The evaluator is written exclusively against the [`XmlNode`] trait, so it
//! can run over any backing store (an arena document, a mock tree in tests)
//! that hands out cheap, clonable node handles.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::XPathError;

/// The kind of a node, aligned with the corner of the XML data model this
/// dialect navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The node above the root element. `doc("f")` yields exactly this.
    Document,
    Element,
    Attribute,
    Text,
}

/// A handle to a node inside a parsed XML tree.
///
/// `Eq` and `Hash` are *identity*: two handles compare equal iff they refer
/// to the same node of the same document. Deep value comparison goes through
/// [`structural_eq`](XmlNode::structural_eq) instead; the two must never be
/// conflated, since deduplication folds identical handles but must keep
/// distinct nodes that merely look alike.
pub trait XmlNode: Debug + Clone + PartialEq + Eq + Hash {
    fn kind(&self) -> NodeKind;

    /// The element or attribute name. `None` for document and text nodes.
    fn tag(&self) -> Option<&str>;

    /// The text content of a text node or the value of an attribute node.
    /// `None` for document and element nodes.
    fn value(&self) -> Option<&str>;

    /// Element and text children in document order. Attribute and text
    /// nodes have no children.
    fn children(&self) -> Vec<Self>;

    /// The parent node; for an attribute, the owning element. `None` for
    /// the document node.
    fn parent(&self) -> Option<Self>;

    /// All attribute nodes of an element, in source order.
    fn attributes(&self) -> Vec<Self>;

    /// The attribute node with the given name, if present.
    fn attribute(&self, name: &str) -> Option<Self> {
        self.attributes().into_iter().find(|a| a.tag() == Some(name))
    }

    /// The direct text children, in document order.
    fn text(&self) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|c| c.kind() == NodeKind::Text)
            .collect()
    }

    /// Deep value equality: same kind, same name and value, the same
    /// attribute name/value set (order-insensitive), and pairwise equal
    /// children in order.
    fn structural_eq(&self, other: &Self) -> bool {
        if self.kind() != other.kind()
            || self.tag() != other.tag()
            || self.value() != other.value()
        {
            return false;
        }
        let attrs = self.attributes();
        if attrs.len() != other.attributes().len() {
            return false;
        }
        for attr in &attrs {
            let name = attr.tag().unwrap_or_default();
            match other.attribute(name) {
                Some(theirs) if theirs.value() == attr.value() => {}
                _ => return false,
            }
        }
        let ours = self.children();
        let theirs = other.children();
        ours.len() == theirs.len()
            && ours.iter().zip(&theirs).all(|(a, b)| a.structural_eq(b))
    }
}

/// Resolves a file reference to the document node of a parsed XML tree.
///
/// Implementations must return handles that stay valid for as long as the
/// caller holds them, and must hand back the *same* document for repeated
/// loads of one name within a query, so that deduplication by identity
/// works across sub-expressions naming the same file.
pub trait DocumentLoader<N: XmlNode> {
    fn load(&self, file: &str) -> Result<N, XPathError>;
}
