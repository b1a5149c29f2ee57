//! Lock-free concurrent word trie.
//!
//! This module provides the storage behind the autocomplete index: a trie whose
//! nodes count how often a word ended at them. Any number of threads may insert
//! and read at the same time without taking a lock.
//!
//! # Concurrency Safety
//!
//! * **Immutable child containers**: a node's children live in an immutable
//!   container behind an `ArcSwap`. Readers load whichever container is current
//!   and never see a partially built one.
//!
//! * **Compare-and-swap growth**: writers build a grown copy and publish it with
//!   `compare_and_swap`. A writer that loses the race reloads and retries, so at
//!   most one node ever exists per character under a parent.
//!
//! * **Independent counters**: end-of-word counters are atomics stored in the node
//!   itself, outside the swapped container, so counting never contends with growth.
//!
//! * **Reclamation**: replaced containers are freed by reference counting once the
//!   last reader drops them. Nodes are never removed.

mod children;
mod node;

pub use node::{TrieNode, ROOT_CHARACTER};
