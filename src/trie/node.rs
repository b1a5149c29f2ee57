//! Node implementation for the concurrent word trie.
//!
//! Each node stores one character, an atomic end-of-word counter and an
//! atomically swappable reference to its children. Structural changes never
//! touch a published children container; they build a replacement and install it
//! with a compare-and-swap, retrying from the latest state when another writer
//! got there first.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::trace;

use super::children::{Children, EMPTY_CHILDREN};
use crate::candidate::Candidate;

/// Placeholder character carried by root sentinels.
pub const ROOT_CHARACTER: char = '\0';

/// A node in the concurrent word trie.
///
/// Nodes compare and order by character only. The end-of-word counter plays no
/// part in identity, so a sorted slice of nodes can be binary-searched by
/// character.
pub struct TrieNode {
    /// The character this node represents
    character: char,

    /// Number of trained words ending exactly at this node
    word_end_count: AtomicU32,

    /// Current children container, replaced wholesale on growth
    children: ArcSwap<Children>,
}

impl TrieNode {
    /// Creates a detached node for `character`.
    ///
    /// A node created with `is_word_end` starts with a count of one.
    pub fn new(character: char, is_word_end: bool) -> Self {
        Self {
            character,
            word_end_count: AtomicU32::new(u32::from(is_word_end)),
            children: ArcSwap::new(Arc::clone(&EMPTY_CHILDREN)),
        }
    }

    /// Creates a root sentinel. Its character is never part of a word.
    pub fn root() -> Self {
        Self::new(ROOT_CHARACTER, false)
    }

    /// Returns the character this node represents.
    pub fn character(&self) -> char {
        self.character
    }

    /// Returns how many times a word ending at this node was trained.
    pub fn word_end_count(&self) -> u32 {
        self.word_end_count.load(Ordering::Acquire)
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.load().len()
    }

    /// Whether the children are held in the sorted array form.
    pub fn is_branching(&self) -> bool {
        matches!(**self.children.load(), Children::Multiple(_))
    }

    fn increment_word_end_count(&self) {
        self.word_end_count.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns the child for `c`, if one exists.
    pub fn get_child(&self, c: char) -> Option<Arc<TrieNode>> {
        self.children.load().find(c).cloned()
    }

    /// Adds `c` as a child, or finds the existing child for `c`.
    ///
    /// Every call with the same character yields the same node, even when many
    /// threads race on the same parent. When `is_word_end` is set, the returned
    /// node's counter has been incremented exactly once by this call.
    ///
    /// # Arguments
    ///
    /// * `c` - Character of the child.
    /// * `is_word_end` - Whether a word ends at the child.
    ///
    /// # Returns
    ///
    /// The child node for `c`, freshly created or pre-existing.
    pub fn add_value(&self, c: char, is_word_end: bool) -> Arc<TrieNode> {
        // Allocated at most once; a failed swap never published it.
        let mut fresh: Option<Arc<TrieNode>> = None;

        loop {
            let current = self.children.load();

            if let Some(existing) = current.find(c) {
                if is_word_end {
                    existing.increment_word_end_count();
                }
                return Arc::clone(existing);
            }

            let child = Arc::clone(fresh.get_or_insert_with(|| Arc::new(TrieNode::new(c, is_word_end))));
            let grown = Arc::new(current.with_child(Arc::clone(&child)));

            let previous = self.children.compare_and_swap(&current, grown);
            if Arc::ptr_eq(&*previous, &*current) {
                return child;
            }

            trace!(parent = ?self.character, character = ?c, "children replaced concurrently, retrying");
        }
    }

    /// Inserts `word` below this node, one character per level.
    ///
    /// Returns the node of the last character, or `None` for an empty word, which
    /// leaves the trie unchanged.
    pub fn insert_word(&self, word: &str) -> Option<Arc<TrieNode>> {
        let mut chars = word.chars().peekable();
        let mut last: Option<Arc<TrieNode>> = None;

        while let Some(c) = chars.next() {
            let is_word_end = chars.peek().is_none();
            let next = match &last {
                Some(node) => node.add_value(c, is_word_end),
                None => self.add_value(c, is_word_end),
            };
            last = Some(next);
        }

        last
    }

    /// Appends every completed word in this subtree to `candidates`.
    ///
    /// `prefix` is the text above this node; this node's own character is
    /// appended to it before anything is emitted. Words come out depth first in
    /// character order; no ranking is applied.
    pub fn collect_candidates(&self, candidates: &mut Vec<Candidate>, prefix: &str) {
        let mut word = String::with_capacity(prefix.len() + self.character.len_utf8());
        word.push_str(prefix);
        word.push(self.character);

        let count = self.word_end_count();
        if count > 0 {
            candidates.push(Candidate::new(word.clone(), count));
        }

        self.collect_below(candidates, word);
    }

    /// Like [`collect_candidates`](Self::collect_candidates), but skips this
    /// node's own character and count. Used from root sentinels.
    pub fn collect_child_candidates(&self, candidates: &mut Vec<Candidate>, prefix: &str) {
        self.collect_below(candidates, prefix.to_string());
    }

    /// Walks the descendants of this node with an explicit stack. Each frame
    /// holds a node and the length of `word` above it, so one buffer serves the
    /// whole walk however deep the trie is.
    fn collect_below(&self, candidates: &mut Vec<Candidate>, mut word: String) {
        let mut stack: Vec<(Arc<TrieNode>, usize)> = Vec::new();
        push_children_reversed(&mut stack, self, word.len());

        while let Some((node, prefix_len)) = stack.pop() {
            word.truncate(prefix_len);
            word.push(node.character);

            let count = node.word_end_count();
            if count > 0 {
                candidates.push(Candidate::new(word.clone(), count));
            }
            push_children_reversed(&mut stack, &node, word.len());
        }
    }

    /// Visits this node and every descendant, in no particular order.
    fn for_each_in_subtree(&self, mut visit: impl FnMut(&TrieNode)) {
        visit(self);

        let mut stack: Vec<Arc<TrieNode>> = self.children.load().as_slice().to_vec();
        while let Some(node) = stack.pop() {
            visit(&node);
            stack.extend(node.children.load().as_slice().iter().cloned());
        }
    }

    /// Counts this node and all of its descendants.
    ///
    /// Safe to call while writers are active; the figure may miss nodes added
    /// during the walk.
    pub fn size(&self) -> usize {
        let mut nodes = 0;
        self.for_each_in_subtree(|_| nodes += 1);
        nodes
    }

    /// Counts the distinct words ending in this subtree, this node included.
    pub fn word_count(&self) -> usize {
        let mut words = 0;
        self.for_each_in_subtree(|node| words += usize::from(node.word_end_count() > 0));
        words
    }

    /// Sums the end-of-word counters of this subtree, this node included.
    pub fn occurrence_count(&self) -> u64 {
        let mut occurrences = 0;
        self.for_each_in_subtree(|node| occurrences += u64::from(node.word_end_count()));
        occurrences
    }
}

/// Pushes the children of `node` so that the smallest character pops first.
fn push_children_reversed(stack: &mut Vec<(Arc<TrieNode>, usize)>, node: &TrieNode, prefix_len: usize) {
    let children = node.children.load();
    stack.extend(
        children
            .as_slice()
            .iter()
            .rev()
            .map(|child| (Arc::clone(child), prefix_len)),
    );
}

impl Drop for TrieNode {
    /// Tears the subtree down level by level. Nodes still referenced elsewhere
    /// (a reader's guard, a concurrent suggestion) are left to their last owner.
    fn drop(&mut self) {
        let mut pending = vec![self.children.swap(Arc::clone(&EMPTY_CHILDREN))];

        while let Some(children) = pending.pop() {
            let Ok(children) = Arc::try_unwrap(children) else {
                continue;
            };
            for child in children.into_nodes() {
                if let Ok(node) = Arc::try_unwrap(child) {
                    pending.push(node.children.swap(Arc::clone(&EMPTY_CHILDREN)));
                }
            }
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("character", &self.character)
            .field("word_end_count", &self.word_end_count())
            .field("child_count", &self.child_count())
            .finish()
    }
}

impl PartialEq for TrieNode {
    fn eq(&self, other: &Self) -> bool {
        self.character == other.character
    }
}

impl Eq for TrieNode {}

impl PartialOrd for TrieNode {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for TrieNode {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.character.cmp(&other.character)
    }
}
