//! Test utilities and fixtures for the autocomplete library.
//!
//! This module provides reusable proptest strategies, an index factory sized
//! for tests, and a fixture for tests that touch files or the environment.

use proptest::strategy::{BoxedStrategy, Strategy};
use tempfile::TempDir;

use crate::config::trainer::TrainerConfig;
use crate::config::AutocompleteConfig;
use crate::index::AutocompleteIndex;
use crate::trie::TrieNode;

/// Longest generated word.
const MAX_WORD_LENGTH: usize = 8;

/// Largest generated word list.
const MAX_WORDS: usize = 40;

/// Generate lowercase words over a small alphabet so that generated words share
/// prefixes often.
pub fn word_strategy() -> BoxedStrategy<String> {
    proptest::string::string_regex(&format!("[a-e]{{1,{MAX_WORD_LENGTH}}}"))
        .expect("valid word regex")
        .boxed()
}

/// Generate a non-empty list of words.
pub fn words_strategy() -> BoxedStrategy<Vec<String>> {
    proptest::collection::vec(word_strategy(), 1..MAX_WORDS).boxed()
}

/// Generate a passage: words joined by mixed runs of spaces and periods.
pub fn passage_strategy() -> BoxedStrategy<(String, Vec<String>)> {
    proptest::collection::vec((word_strategy(), "[ .]{1,3}"), 1..MAX_WORDS)
        .prop_map(|parts| {
            let mut passage = String::new();
            let mut words = Vec::with_capacity(parts.len());
            for (word, separator) in parts {
                passage.push_str(&word.to_uppercase());
                passage.push_str(&separator);
                words.push(word);
            }
            (passage, words)
        })
        .boxed()
}

/// Insert each word below `node`, character by character.
pub fn insert_words<S: AsRef<str>>(node: &TrieNode, words: &[S]) {
    for word in words {
        node.insert_word(word.as_ref());
    }
}

/// Create an index with a two-thread training pool.
pub fn small_index() -> AutocompleteIndex {
    let config = AutocompleteConfig {
        trainer: TrainerConfig {
            worker_threads: 2,
            ..TrainerConfig::default()
        },
        ..AutocompleteConfig::default()
    };
    AutocompleteIndex::with_config(&config).expect("test index")
}

/// Test fixture for tests that need files or environment variables.
///
/// Environment variables set through the fixture are removed when it drops.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Environment variables to clean up
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable for this test.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        std::env::set_var(&key, value.into());
        self.env_vars.push(key);
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn create_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
