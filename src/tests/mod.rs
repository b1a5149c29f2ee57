//! Test modules for the autocomplete library.
//!
//! This module contains cross-module tests:
//! - Configuration loading and validation
//! - Error context and reporting
//! - Property-based tests of the trie and the index using proptest
//! - Command loop behaviour
//! - Shared fixtures and strategies

pub mod repl_tests;
pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    insert_words, passage_strategy, small_index, word_strategy, words_strategy, TestFixture,
};
