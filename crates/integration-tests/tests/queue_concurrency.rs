//! Concurrency and race condition tests for the queue core
//!
//! Hammers one shared queue from many tasks and checks that every entry is
//! delivered at most once and that the served log stays complete.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tokio::task::JoinSet;
use triage_core::domain::{Departure, PriorityClass};
use triage_core::port::{SteppingTimeProvider, SystemTimeProvider};
use triage_core::TriageQueue;

fn class_for(i: usize) -> PriorityClass {
    PriorityClass::ALL[i % PriorityClass::ALL.len()]
}

fn seeded_queue(n: usize) -> Arc<TriageQueue> {
    let queue = Arc::new(TriageQueue::new(Arc::new(SystemTimeProvider)));
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    for i in 0..n {
        queue.add(
            format!("patient-{}", i),
            "condition",
            class_for(i),
            Some(base + Duration::seconds(i as i64)),
        );
    }
    queue
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_take_next_delivers_each_entry_once() {
    const N: usize = 200;
    let queue = seeded_queue(N);

    let mut tasks = JoinSet::new();
    for _ in 0..N {
        let queue = queue.clone();
        tasks.spawn(async move { queue.take_next() });
    }

    let mut taken = Vec::new();
    while let Some(result) = tasks.join_next().await {
        if let Some(entry) = result.unwrap() {
            taken.push(entry.identity().to_string());
        }
    }

    // Exactly N callers got an entry, and no entry was handed out twice
    assert_eq!(taken.len(), N);
    let unique: HashSet<_> = taken.iter().cloned().collect();
    assert_eq!(unique.len(), N, "an entry was delivered more than once");

    let expected: HashSet<_> = (0..N).map(|i| format!("patient-{}", i)).collect();
    assert_eq!(unique, expected);

    assert!(queue.list().is_empty());
    assert!(queue.take_next().is_none());
    assert_eq!(queue.history().len(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_more_consumers_than_entries_get_empty() {
    let queue = seeded_queue(10);

    let mut tasks = JoinSet::new();
    for _ in 0..50 {
        let queue = queue.clone();
        tasks.spawn(async move { queue.take_next().is_some() });
    }

    let mut served = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap() {
            served += 1;
        }
    }

    assert_eq!(served, 10);
    assert_eq!(queue.stats().served, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_racing_removals_of_same_identity() {
    let queue = Arc::new(TriageQueue::new(Arc::new(SteppingTimeProvider::default())));
    queue.add("Bed 4", "fracture", PriorityClass::Serious, None);

    let mut tasks = JoinSet::new();
    for _ in 0..32 {
        let queue = queue.clone();
        tasks.spawn(async move { queue.remove_by_identity("Bed 4").is_some() });
    }

    let mut winners = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    let history = queue.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].departure, Departure::Removed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_mixed_workload_conserves_entries() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 100;
    let queue = Arc::new(TriageQueue::new(Arc::new(SystemTimeProvider)));

    let mut tasks = JoinSet::new();
    for p in 0..PRODUCERS {
        let queue = queue.clone();
        tasks.spawn(async move {
            for i in 0..PER_PRODUCER {
                queue.add(format!("p{}-{}", p, i), "x", class_for(i), None);
                tokio::task::yield_now().await;
            }
        });
    }
    for _ in 0..4 {
        let queue = queue.clone();
        tasks.spawn(async move {
            for _ in 0..PER_PRODUCER {
                queue.take_next();
                tokio::task::yield_now().await;
            }
        });
    }
    for _ in 0..2 {
        let queue = queue.clone();
        tasks.spawn(async move {
            for _ in 0..PER_PRODUCER {
                // A single read lock covers both structures
                let stats = queue.stats();
                assert_eq!(stats.waiting + stats.served, stats.admitted as usize);

                let listed = queue.list();
                assert!(listed.windows(2).all(|w| w[0].order_key() < w[1].order_key()));
                tokio::task::yield_now().await;
            }
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    let stats = queue.stats();
    assert_eq!(stats.admitted, (PRODUCERS * PER_PRODUCER) as u64);
    assert_eq!(stats.waiting + stats.served, PRODUCERS * PER_PRODUCER);

    // Draining the rest yields every remaining entry exactly once
    let mut seen: HashSet<String> = queue
        .history()
        .iter()
        .map(|r| r.entry.identity().to_string())
        .collect();
    while let Some(entry) = queue.take_next() {
        assert!(seen.insert(entry.identity().to_string()));
    }
    assert_eq!(seen.len(), PRODUCERS * PER_PRODUCER);
}

#[tokio::test]
async fn test_drain_order_matches_list_order() {
    let queue = seeded_queue(30);
    let listed: Vec<String> = queue
        .list()
        .iter()
        .map(|e| e.identity().to_string())
        .collect();

    let mut drained = Vec::new();
    while let Some(entry) = queue.take_next() {
        drained.push(entry.identity().to_string());
    }

    assert_eq!(drained, listed);
    let history: Vec<String> = queue
        .history()
        .iter()
        .map(|r| r.entry.identity().to_string())
        .collect();
    assert_eq!(history, drained);
}
