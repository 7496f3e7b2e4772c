//! Node-set operations: deduplication and descendant expansion.

use crate::tree::XmlNode;
use std::collections::HashSet;

/// Removes duplicate handles, keeping the first occurrence of each node.
///
/// Duplicates are judged by node identity, never by structural equality;
/// two distinct nodes that happen to look alike both survive.
pub fn unique<N: XmlNode>(nodes: Vec<N>) -> Vec<N> {
    let mut seen = HashSet::with_capacity(nodes.len());
    let mut result = Vec::with_capacity(nodes.len());
    for node in nodes {
        if seen.insert(node.clone()) {
            result.push(node);
        }
    }
    result
}

/// For each input node in order, emits the node followed by all of its
/// descendants, depth-first left-to-right.
///
/// The output is not deduplicated: when one input node is a descendant of
/// another, its subtree appears twice. Callers apply [`unique`] at the
/// points where the semantics require distinct results.
pub fn descendants_or_self<N: XmlNode>(nodes: &[N]) -> Vec<N> {
    let mut result = Vec::new();
    for node in nodes {
        walk(node, &mut result);
    }
    result
}

fn walk<N: XmlNode>(node: &N, out: &mut Vec<N>) {
    out.push(node.clone());
    for child in node.children() {
        walk(&child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::mock::{library, MockNode};

    #[test]
    fn unique_keeps_first_occurrence_order() {
        let tree = library();
        let at = |id| MockNode { id, tree: &tree };

        let deduped = unique(vec![at(5), at(2), at(5), at(3), at(2)]);
        assert_eq!(deduped, vec![at(5), at(2), at(3)]);
    }

    #[test]
    fn unique_does_not_fold_structurally_equal_nodes() {
        let tree = library();
        let title1 = MockNode { id: 3, tree: &tree };
        let title2 = MockNode { id: 6, tree: &tree };

        assert_eq!(unique(vec![title1, title2]).len(), 2);
    }

    #[test]
    fn descendants_or_self_is_preorder_document_order() {
        let tree = library();
        let root = MockNode { id: 0, tree: &tree };

        let all: Vec<usize> = descendants_or_self(&[root]).iter().map(|n| n.id).collect();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn descendants_or_self_keeps_nested_duplicates() {
        let tree = library();
        let library_elem = MockNode { id: 1, tree: &tree };
        let book1 = MockNode { id: 2, tree: &tree };

        // book1 is inside library, so its subtree shows up twice.
        let expanded = descendants_or_self(&[library_elem, book1]);
        let ids: Vec<usize> = expanded.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 2, 3, 4]);

        let deduped = unique(expanded);
        assert_eq!(deduped.len(), 7);
    }
}
