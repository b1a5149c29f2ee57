//! Integration tests for the autocomplete index.
//! Drives the public API the way an embedding application would: concurrent
//! trainers, concurrent readers, and a clean shutdown.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use mdk_autocomplete_lib::config::trainer::TrainerConfig;
use mdk_autocomplete_lib::config::AutocompleteConfig;
use mdk_autocomplete_lib::trie::TrieNode;
use mdk_autocomplete_lib::{AutocompleteIndex, AutocompleteProvider, Candidate};

const PASSAGE: &str =
    "The third thing that I need to tell you is that this thing does not think thoroughly.";

fn index_with_workers(worker_threads: usize) -> AutocompleteIndex {
    let config = AutocompleteConfig {
        trainer: TrainerConfig {
            worker_threads,
            ..TrainerConfig::default()
        },
        ..AutocompleteConfig::default()
    };
    AutocompleteIndex::with_config(&config).unwrap()
}

#[test]
fn test_trained_passage_suggestions() {
    let index = index_with_workers(2);
    index.train(PASSAGE);
    assert!(index.wait_idle_timeout(Duration::from_secs(10)));

    let th = index.suggest("th");
    assert_eq!(th.len(), 7);
    let split = th.iter().position(|c| c.frequency() == 1).unwrap();
    assert!(th[..split].iter().all(|c| c.frequency() == 2));
    assert!(th[split..].iter().all(|c| c.frequency() == 1));

    assert_eq!(
        index.suggest("thi"),
        vec![
            Candidate::new("thing", 2),
            Candidate::new("think", 1),
            Candidate::new("third", 1),
            Candidate::new("this", 1),
        ]
    );
    assert_eq!(index.suggest("nee"), vec![Candidate::new("need", 1)]);

    index.shutdown().unwrap();
}

#[test]
fn test_subtree_candidates() {
    let root = TrieNode::root();
    let a = root.add_value('a', false);
    for word in ["pple", "pple", "pple", "rrow", "rrow", "nvil"] {
        a.insert_word(word);
    }

    let mut candidates = Vec::new();
    a.collect_candidates(&mut candidates, "");
    candidates.sort();
    assert_eq!(
        candidates,
        vec![
            Candidate::new("apple", 3),
            Candidate::new("arrow", 2),
            Candidate::new("anvil", 1),
        ]
    );
    assert_eq!(root.size(), 14);
}

#[test]
fn test_concurrent_train_and_suggest() {
    let index = Arc::new(index_with_workers(4));
    let barrier = Arc::new(Barrier::new(8));

    let mut handles = Vec::new();
    for worker in 0..4 {
        let index = Arc::clone(&index);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for round in 0..25 {
                index.train(format!("word{worker} shared round{round}"));
            }
        }));
    }
    for _ in 0..4 {
        let index = Arc::clone(&index);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..100 {
                for candidate in index.suggest("shared") {
                    assert_eq!(candidate.word(), "shared");
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(index.wait_idle_timeout(Duration::from_secs(30)));
    assert_eq!(index.suggest("shared"), vec![Candidate::new("shared", 100)]);
    assert_eq!(index.suggest("word").len(), 4);
    assert_eq!(index.suggest("round").len(), 25);

    let stats = index.stats();
    assert_eq!(stats.words, 4 + 1 + 25);
    assert_eq!(stats.occurrences, 300);
}

#[test]
fn test_provider_over_trait_object() {
    let index = index_with_workers(1);
    let provider: &dyn AutocompleteProvider = &index;

    provider.train("Ping. pong ping");
    index.wait_idle();
    assert_eq!(
        provider.suggest("p"),
        vec![Candidate::new("ping", 2), Candidate::new("pong", 1)]
    );
    assert!(provider.suggest("q").is_empty());
}

#[test]
fn test_shutdown_drains_pending_training() {
    let index = index_with_workers(1);
    for _ in 0..10 {
        index.train(PASSAGE);
    }
    index.shutdown().unwrap();
}
