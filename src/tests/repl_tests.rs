//! Tests for the command loop driven from in-memory input.

use std::io::Cursor;

use crate::repl::{Command, Repl};
use crate::tests::small_index;

fn run_session(input: &str, max_suggestions: usize) -> String {
    let index = small_index();
    let mut output = Vec::new();
    Repl::new(&index, max_suggestions)
        .run(Cursor::new(input.as_bytes()), &mut output)
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn test_train_wait_get_session() {
    let output = run_session(
        "train The third thing that I need to tell you is that this thing does not think thoroughly.\n\
         wait\n\
         get thi\n\
         exit\n\
         get never reached\n",
        0,
    );

    assert!(output.starts_with("Instructions:"));
    assert!(output.contains("Command entered was: wait"));
    assert!(output.contains("Training finished."));
    assert!(output.contains(
        "\"thi\" --> \"thing\" (2), \"think\" (1), \"third\" (1), \"this\" (1)"
    ));
    assert!(!output.contains("never reached"));
}

#[test]
fn test_suggestions_are_capped() {
    let output = run_session("train b a a c c c\nwait\nget \n", 2);
    assert!(output.contains("\"\" --> \"c\" (3), \"a\" (2)\n"));
    assert!(!output.contains("\"b\" (1)"));
}

#[test]
fn test_stats_and_unknown_commands() {
    let output = run_session("train cat car\r\nwait\r\nstats\r\ndance\r\n", 0);
    assert!(output.contains("nodes: 5, words: 2, occurrences: 2, pending jobs: 0"));
    assert!(output.contains("Unrecognized command \"dance\"."));
}

#[test]
fn test_end_of_input_stops_loop() {
    let output = run_session("", 0);
    assert!(output.starts_with("Instructions:"));
    assert!(output.ends_with("\n> "));
}

#[test]
fn test_execute_reports_continue() {
    let index = small_index();
    let repl = Repl::new(&index, 0);
    let mut output = Vec::new();

    assert!(repl.execute(Command::Help, &mut output).unwrap());
    assert!(!repl.execute(Command::Exit, &mut output).unwrap());
}
