//! Child container for trie nodes.
//!
//! A node's children are held in one of three shapes so that memory follows the
//! actual branching factor: nothing, a single node stored directly, or a sorted
//! array. Containers are immutable once built; growth always produces a new
//! container that replaces the old one atomically (see [`super::TrieNode`]).

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::node::TrieNode;

/// Shared empty container. Every childless node points at this one allocation.
pub(crate) static EMPTY_CHILDREN: Lazy<Arc<Children>> = Lazy::new(|| Arc::new(Children::Empty));

/// The children of a trie node.
#[derive(Debug)]
pub(crate) enum Children {
    /// No children.
    Empty,

    /// Exactly one child, no array allocation.
    Single(Arc<TrieNode>),

    /// Two or more children, sorted ascending by character, no duplicates.
    Multiple(Box<[Arc<TrieNode>]>),
}

impl Children {
    /// Looks up the child for `c`.
    ///
    /// Constant time for a single child, binary search for an array.
    pub(crate) fn find(&self, c: char) -> Option<&Arc<TrieNode>> {
        match self {
            Children::Empty => None,
            Children::Single(child) => (child.character() == c).then_some(child),
            Children::Multiple(children) => children
                .binary_search_by(|child| child.character().cmp(&c))
                .ok()
                .map(|index| &children[index]),
        }
    }

    /// Returns the children as a slice, whatever the representation.
    pub(crate) fn as_slice(&self) -> &[Arc<TrieNode>] {
        match self {
            Children::Empty => &[],
            Children::Single(child) => std::slice::from_ref(child),
            Children::Multiple(children) => children,
        }
    }

    /// Number of direct children.
    pub(crate) fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Consumes the container, handing back its nodes.
    pub(crate) fn into_nodes(self) -> Vec<Arc<TrieNode>> {
        match self {
            Children::Empty => Vec::new(),
            Children::Single(child) => vec![child],
            Children::Multiple(children) => children.into_vec(),
        }
    }

    /// Builds the container that results from adding `child` to this one.
    ///
    /// The caller must have checked that no child with the same character is
    /// present. The receiver is left untouched.
    pub(crate) fn with_child(&self, child: Arc<TrieNode>) -> Children {
        match self {
            Children::Empty => Children::Single(child),
            Children::Single(existing) => {
                let mut pair = [Arc::clone(existing), child];
                pair.sort();
                Children::Multiple(Box::new(pair))
            }
            Children::Multiple(children) => {
                let position = children.partition_point(|node| node.character() < child.character());
                let mut grown = Vec::with_capacity(children.len() + 1);
                grown.extend_from_slice(&children[..position]);
                grown.push(child);
                grown.extend_from_slice(&children[position..]);
                Children::Multiple(grown.into_boxed_slice())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(c: char) -> Arc<TrieNode> {
        Arc::new(TrieNode::new(c, false))
    }

    #[test]
    fn test_empty_has_no_children() {
        let children = Children::Empty;
        assert_eq!(children.len(), 0);
        assert!(children.find('a').is_none());
    }

    #[test]
    fn test_single_matches_only_its_character() {
        let children = Children::Empty.with_child(node('m'));
        assert!(matches!(children, Children::Single(_)));
        assert_eq!(children.find('m').map(|n| n.character()), Some('m'));
        assert!(children.find('n').is_none());
    }

    #[test]
    fn test_growth_keeps_array_sorted() {
        let mut children = Children::Empty;
        for c in ['q', 'c', 'x', 'a', 'm'] {
            children = children.with_child(node(c));
        }

        let order: String = children.as_slice().iter().map(|n| n.character()).collect();
        assert_eq!(order, "acmqx");
        assert_eq!(children.len(), 5);
        for c in ['a', 'c', 'm', 'q', 'x'] {
            assert_eq!(children.find(c).map(|n| n.character()), Some(c));
        }
        assert!(children.find('b').is_none());
        assert!(children.find('z').is_none());
    }

    #[test]
    fn test_single_to_multiple_sorts_pair() {
        let children = Children::Empty.with_child(node('z')).with_child(node('b'));
        match &children {
            Children::Multiple(nodes) => {
                assert_eq!(nodes.len(), 2);
                assert_eq!(nodes[0].character(), 'b');
                assert_eq!(nodes[1].character(), 'z');
            }
            other => panic!("expected an array, found {other:?}"),
        }
    }
}
