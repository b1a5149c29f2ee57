//! Autocomplete index.
//!
//! The index owns the root of a concurrent [`TrieNode`] graph and answers two
//! questions: "learn these words" ([`train`](AutocompleteIndex::train)) and
//! "what could this fragment become" ([`suggest`](AutocompleteIndex::suggest)).
//!
//! Training is handed to a [`TrainingPool`] and returns immediately; suggestions
//! are computed on the calling thread. Both may run from any number of threads at
//! once. A suggestion reflects whatever training had landed by the time each
//! node was visited; it is not a snapshot of the whole trie.

mod splitter;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

pub use splitter::{BoundarySplitter, WordSplitter};

#[cfg(test)]
pub use splitter::MockWordSplitter;

use crate::candidate::Candidate;
use crate::config::{AutocompleteConfig, Validate};
use crate::error::AutocompleteResult;
use crate::trainer::TrainingPool;
use crate::trie::TrieNode;

/// Something that learns words from passages and suggests completions.
pub trait AutocompleteProvider {
    /// Schedules `passage` for training without waiting for it.
    fn train(&self, passage: &str);

    /// Returns trained words starting with `fragment`, most frequent first.
    fn suggest(&self, fragment: &str) -> Vec<Candidate>;
}

/// Point-in-time figures about an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Trie nodes, root included
    pub nodes: usize,
    /// Distinct trained words
    pub words: usize,
    /// Trained word occurrences
    pub occurrences: u64,
    /// Training jobs not yet finished
    pub pending_jobs: usize,
}

/// Frequency-ranked word completion over a concurrent trie.
pub struct AutocompleteIndex {
    root: Arc<TrieNode>,
    splitter: Arc<dyn WordSplitter>,
    pool: TrainingPool,
}

impl AutocompleteIndex {
    /// Creates an index with the default configuration.
    pub fn new() -> AutocompleteResult<Self> {
        Self::with_config(&AutocompleteConfig::default())
    }

    /// Creates an index from `config`.
    ///
    /// # Returns
    ///
    /// * `Ok(AutocompleteIndex)` - A ready, empty index.
    /// * `Err(AutocompleteError)` - If the configuration is invalid or the
    ///   training pool cannot be started.
    pub fn with_config(config: &AutocompleteConfig) -> AutocompleteResult<Self> {
        config.index.validate()?;
        config.trainer.validate()?;

        let splitter = Arc::new(BoundarySplitter::from_config(&config.index));
        let pool = TrainingPool::new(&config.trainer)?;
        Ok(Self::with_parts(splitter, pool))
    }

    /// Creates an index from an explicit splitter and pool.
    pub fn with_parts(splitter: Arc<dyn WordSplitter>, pool: TrainingPool) -> Self {
        Self {
            root: Arc::new(TrieNode::root()),
            splitter,
            pool,
        }
    }

    /// Schedules `passage` for training and returns immediately.
    ///
    /// The words become visible to [`suggest`](Self::suggest) gradually as a
    /// worker inserts them.
    pub fn train(&self, passage: impl Into<String>) {
        let passage = passage.into();
        let root = Arc::clone(&self.root);
        let splitter = Arc::clone(&self.splitter);

        self.pool.submit(move || {
            ingest(&root, splitter.as_ref(), &passage);
        });
    }

    /// Trains `passage` on the calling thread.
    ///
    /// Returns the number of words inserted.
    pub fn train_now(&self, passage: &str) -> usize {
        ingest(&self.root, self.splitter.as_ref(), passage)
    }

    /// Returns trained words beginning with `fragment`.
    ///
    /// Candidates are ordered by descending frequency, then ascending word. An
    /// unknown fragment yields an empty list; an empty fragment yields every
    /// trained word.
    pub fn suggest(&self, fragment: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        let Some(last) = fragment.chars().last() else {
            self.root.collect_child_candidates(&mut candidates, "");
            candidates.sort_unstable();
            return candidates;
        };

        let mut node = Arc::clone(&self.root);
        for c in fragment.chars() {
            match node.get_child(c) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }

        // The subtree root re-adds its own character.
        let prefix = &fragment[..fragment.len() - last.len_utf8()];
        node.collect_candidates(&mut candidates, prefix);
        candidates.sort_unstable();
        candidates
    }

    /// Like [`suggest`](Self::suggest), keeping at most `limit` candidates.
    pub fn suggest_top(&self, fragment: &str, limit: usize) -> Vec<Candidate> {
        let mut candidates = self.suggest(fragment);
        candidates.truncate(limit);
        candidates
    }

    /// Number of trie nodes, root included.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Collects node, word and job counts.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            nodes: self.root.size(),
            words: self.root.word_count(),
            occurrences: self.root.occurrence_count(),
            pending_jobs: self.pool.pending(),
        }
    }

    /// Training jobs submitted but not yet finished.
    pub fn pending_jobs(&self) -> usize {
        self.pool.pending()
    }

    /// Blocks until all scheduled training has finished.
    pub fn wait_idle(&self) {
        self.pool.wait_idle();
    }

    /// Blocks until all scheduled training has finished or `timeout` elapses.
    ///
    /// Returns `true` if training went idle in time.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        self.pool.wait_idle_timeout(timeout)
    }

    /// Waits for scheduled training and stops the worker pool.
    pub fn shutdown(self) -> AutocompleteResult<()> {
        self.pool.shutdown()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Arc<TrieNode> {
        &self.root
    }
}

impl AutocompleteProvider for AutocompleteIndex {
    fn train(&self, passage: &str) {
        AutocompleteIndex::train(self, passage);
    }

    fn suggest(&self, fragment: &str) -> Vec<Candidate> {
        AutocompleteIndex::suggest(self, fragment)
    }
}

impl fmt::Debug for AutocompleteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteIndex")
            .field("root", &self.root)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

/// Splits `passage` and inserts every word below `root`.
fn ingest(root: &TrieNode, splitter: &dyn WordSplitter, passage: &str) -> usize {
    let words = splitter.split(passage);
    debug!(words = words.len(), "Training passage");

    for word in &words {
        root.insert_word(word);
    }
    words.len()
}
