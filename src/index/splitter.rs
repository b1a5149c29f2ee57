//! Passage splitting.
//!
//! The index does not care how a passage becomes words; it only needs a
//! sequence of lowercase tokens. [`WordSplitter`] is that seam, and
//! [`BoundarySplitter`] the default rule: any run of boundary characters
//! separates two words.

use std::borrow::Cow;

use crate::config::index::IndexConfig;

/// Turns a raw passage into word tokens.
#[cfg_attr(test, mockall::automock)]
pub trait WordSplitter: Send + Sync {
    /// Splits `passage` into the words to train, in passage order.
    fn split(&self, passage: &str) -> Vec<String>;
}

/// Splits on runs of configured boundary characters.
///
/// Empty tokens (from leading, trailing or repeated boundaries) are dropped.
#[derive(Debug, Clone)]
pub struct BoundarySplitter {
    boundaries: Vec<char>,
    lowercase: bool,
}

impl BoundarySplitter {
    /// Creates a splitter that breaks words at any character of `boundaries`.
    pub fn new(boundaries: &str, lowercase: bool) -> Self {
        let mut boundaries: Vec<char> = boundaries.chars().collect();
        boundaries.sort_unstable();
        boundaries.dedup();
        Self {
            boundaries,
            lowercase,
        }
    }

    /// Creates a splitter from the index configuration.
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(&config.word_boundaries, config.lowercase)
    }

    fn is_boundary(&self, c: char) -> bool {
        self.boundaries.binary_search(&c).is_ok()
    }
}

impl Default for BoundarySplitter {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}

impl WordSplitter for BoundarySplitter {
    fn split(&self, passage: &str) -> Vec<String> {
        let text = if self.lowercase {
            Cow::Owned(passage.to_lowercase())
        } else {
            Cow::Borrowed(passage)
        };

        text.split(|c: char| self.is_boundary(c))
            .filter(|word| !word.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
