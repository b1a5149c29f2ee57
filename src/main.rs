//! MDK Autocomplete - Main entrypoint.
//!
//! Loads configuration, initializes logging, and runs either the interactive
//! command loop or a one-shot suggestion query.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mdk_autocomplete_lib::config::{AutocompleteConfig, LogConfig};
use mdk_autocomplete_lib::error::{AutocompleteError, AutocompleteResult};
use mdk_autocomplete_lib::repl::{format_candidates, Repl};
use mdk_autocomplete_lib::AutocompleteIndex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "MDK Autocomplete", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive train/get loop
    Repl {
        /// Files whose contents are trained before the loop starts
        #[clap(short, long, value_parser)]
        train_file: Vec<PathBuf>,
    },

    /// Print suggestions for a single fragment
    Suggest {
        /// Fragment to complete
        fragment: String,

        /// Files whose contents are trained first
        #[clap(short, long, value_parser)]
        train_file: Vec<PathBuf>,

        /// Print candidates as JSON
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr so
/// they never interleave with command output.
fn init_logging(log: &LogConfig) -> AutocompleteResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    let result = if log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| AutocompleteError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Trains every file synchronously so the index is complete before use.
fn train_files(index: &AutocompleteIndex, files: &[PathBuf]) -> AutocompleteResult<()> {
    for path in files {
        let passage = fs::read_to_string(path)?;
        let words = index.train_now(&passage);
        info!(path = %path.display(), words, "Trained file");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Arc<AutocompleteConfig> {
    match mdk_autocomplete_lib::init(path) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet; use the defaults to report.
            let _ = init_logging(&LogConfig::default());
            tracing::error!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

/// Writes the default configuration as TOML to `output`.
fn write_default_config(output: &Path) -> AutocompleteResult<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&AutocompleteConfig::default())
        .map_err(|e| AutocompleteError::Custom(format!("Failed to serialize config: {e}")))?;
    fs::write(output, toml)?;

    println!("Default configuration written to {}", output.display());
    Ok(())
}

/// Loads the configuration and starts logging with it.
fn setup(path: Option<&Path>) -> AutocompleteResult<Arc<AutocompleteConfig>> {
    let config = load_config(path);
    init_logging(&config.log)?;
    Ok(config)
}

/// Main entry point for the application.
fn main() -> AutocompleteResult<()> {
    let args = <Args as clap::Parser>::parse();
    let command = args.command.unwrap_or(Command::Repl {
        train_file: Vec::new(),
    });
    let config_path = args.config.as_deref();

    match command {
        // Needs no configuration, so a broken file can be replaced.
        Command::GenConfig { output } => write_default_config(&output),
        Command::Validate => {
            setup(config_path)?;
            info!("Configuration validated successfully");
            println!("Configuration is valid");
            Ok(())
        }
        Command::Repl { train_file } => {
            let config = setup(config_path)?;
            let index = AutocompleteIndex::with_config(&config)?;
            train_files(&index, &train_file)?;

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            Repl::new(&index, config.index.max_suggestions).run(stdin.lock(), &mut stdout)?;

            index.shutdown()
        }
        Command::Suggest {
            fragment,
            train_file,
            json,
        } => {
            let config = setup(config_path)?;
            let index = AutocompleteIndex::with_config(&config)?;
            train_files(&index, &train_file)?;

            let candidates = match config.index.max_suggestions {
                0 => index.suggest(&fragment),
                limit => index.suggest_top(&fragment, limit),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&candidates)?);
            } else {
                println!("\"{fragment}\" --> {}", format_candidates(&candidates));
            }

            index.shutdown()
        }
    }
}
