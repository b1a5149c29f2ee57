//! Line-oriented command loop.
//!
//! Reads one command per line:
//!
//! * `train <passage>` - schedule a passage for training
//! * `get <fragment>` - print ranked completions
//! * `stats` - print index statistics
//! * `wait` - block until scheduled training has finished
//! * `help` - print the instructions
//! * `exit` - leave the loop
//!
//! The loop is generic over its input and output so it can be driven from a
//! terminal or from a test.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::candidate::Candidate;
use crate::index::AutocompleteIndex;

const INSTRUCTIONS: &str = "Instructions:
1) To train with a new passage, type \"train \" followed by the passage. Press enter to end passage.
2) To get a list of candidates based on a string fragment, type \"get \" followed by the fragment and press return.
3) To see statistics about the trained words, type \"stats\". To wait for training to finish, type \"wait\".
4) To exit, type 'exit'";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Train a passage.
    Train(String),
    /// Suggest completions for a fragment.
    Get(String),
    /// Show index statistics.
    Stats,
    /// Wait for scheduled training.
    Wait,
    /// Show the instructions.
    Help,
    /// Leave the loop.
    Exit,
    /// Anything else.
    Unrecognized(String),
}

impl Command {
    /// Parses one input line. The trailing line terminator must already be gone.
    pub fn parse(line: &str) -> Self {
        if let Some(passage) = line.strip_prefix("train ") {
            Command::Train(passage.to_string())
        } else if let Some(fragment) = line.strip_prefix("get ") {
            Command::Get(fragment.to_string())
        } else if line.eq_ignore_ascii_case("exit") {
            Command::Exit
        } else if line.eq_ignore_ascii_case("stats") {
            Command::Stats
        } else if line.eq_ignore_ascii_case("wait") {
            Command::Wait
        } else if line.eq_ignore_ascii_case("help") {
            Command::Help
        } else {
            Command::Unrecognized(line.to_string())
        }
    }
}

/// Interactive front end over an [`AutocompleteIndex`].
#[derive(Debug)]
pub struct Repl<'a> {
    index: &'a AutocompleteIndex,
    max_suggestions: usize,
}

impl<'a> Repl<'a> {
    /// Creates a loop over `index`. `max_suggestions` of 0 shows every candidate.
    pub fn new(index: &'a AutocompleteIndex, max_suggestions: usize) -> Self {
        Self {
            index,
            max_suggestions,
        }
    }

    /// Runs until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<()> {
        info!("Command loop started");
        writeln!(output, "{INSTRUCTIONS}")?;

        let mut lines = input.lines();
        loop {
            write!(output, "\n> ")?;
            output.flush()?;

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            let line = line.trim_end_matches('\r');
            writeln!(output, "Command entered was: {line}")?;

            if !self.execute(Command::parse(line), output)? {
                break;
            }
        }

        info!("Command loop stopped");
        Ok(())
    }

    /// Executes one command. Returns `false` when the loop should stop.
    pub fn execute<W: Write>(&self, command: Command, output: &mut W) -> io::Result<bool> {
        match command {
            Command::Train(passage) => {
                self.index.train(passage);
                writeln!(output, "Training passage.")?;
            }
            Command::Get(fragment) => {
                let candidates = match self.max_suggestions {
                    0 => self.index.suggest(&fragment),
                    limit => self.index.suggest_top(&fragment, limit),
                };
                writeln!(output, "\"{fragment}\" --> {}", format_candidates(&candidates))?;
            }
            Command::Stats => {
                let stats = self.index.stats();
                writeln!(
                    output,
                    "nodes: {}, words: {}, occurrences: {}, pending jobs: {}",
                    stats.nodes, stats.words, stats.occurrences, stats.pending_jobs
                )?;
            }
            Command::Wait => {
                self.index.wait_idle();
                writeln!(output, "Training finished.")?;
            }
            Command::Help => writeln!(output, "{INSTRUCTIONS}")?,
            Command::Exit => return Ok(false),
            Command::Unrecognized(line) => writeln!(output, "Unrecognized command \"{line}\".")?,
        }
        Ok(true)
    }
}

/// Joins candidates as `"word" (n), "word" (n)`.
pub fn format_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(Candidate::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
