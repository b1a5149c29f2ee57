//! MDK Autocomplete Library
//!
//! Word completion ranked by how often each word has been seen. Passages are
//! trained into a lock-free concurrent trie; fragments are answered with every
//! trained word they prefix, most frequent first.
//!
//! # Architecture
//!
//! - [`trie`]: the concurrent trie. Nodes grow by compare-and-swap on an
//!   immutable children container and count word endings atomically.
//! - [`index`]: the autocomplete index, which splits passages into words, trains
//!   them on a background [`trainer`] pool, and ranks suggestions.
//! - [`config`], [`error`]: layered configuration and error reporting.
//! - [`repl`]: the line-oriented command loop used by the binary.
//!
//! ```no_run
//! use mdk_autocomplete_lib::index::AutocompleteIndex;
//!
//! let index = AutocompleteIndex::new()?;
//! index.train("The third thing that I need to tell you is that this thing does not think thoroughly.");
//! index.wait_idle();
//! for candidate in index.suggest("thi") {
//!     println!("{candidate}");
//! }
//! # Ok::<(), mdk_autocomplete_lib::error::AutocompleteError>(())
//! ```

pub mod candidate;
pub mod config;
pub mod error;
pub mod index;
pub mod repl;
pub mod trainer;
pub mod trie;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use candidate::Candidate;
pub use index::{AutocompleteIndex, AutocompleteProvider};

/// Version information for the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing error reporter, loads configuration from `config_path`
/// (if any) and the `MDK` environment, and publishes it as the global
/// configuration.
pub fn init(config_path: Option<&std::path::Path>) -> error::AutocompleteResult<std::sync::Arc<config::AutocompleteConfig>> {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    let loaded = config::ConfigLoader::new(config_path, config::ENV_PREFIX).load()?;
    Ok(config::init_global_config(loaded))
}
