//! End-to-end tests: real JSON-RPC server on an ephemeral port, SDK client.

use std::sync::Arc;

use jsonrpsee::server::ServerHandle;
use tokio::task::JoinSet;
use triage_api_rpc::{RpcServer, RpcServerConfig};
use triage_core::port::SteppingTimeProvider;
use triage_core::TriageQueue;
use triage_sdk::{AddRequest, TriageClient};

struct TestServer {
    client: TriageClient,
    url: String,
    // Server stops once every handle is dropped
    _handle: ServerHandle,
}

async fn start() -> TestServer {
    let queue = Arc::new(TriageQueue::new(Arc::new(SteppingTimeProvider::default())));
    let config = RpcServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let (handle, addr) = RpcServer::new(config, queue).start().await.unwrap();
    let url = format!("http://{}", addr);
    let client = TriageClient::connect(&url).await.unwrap();

    TestServer {
        client,
        url,
        _handle: handle,
    }
}

#[tokio::test]
async fn test_scenario_add_list_next_history() {
    let server = start().await;
    let client = &server.client;

    client
        .add(AddRequest::new("A", "fever", 3).arrived_at("2024-01-01 09:00:00"))
        .await
        .unwrap();
    client
        .add(AddRequest::new("B", "chest pain", 1).arrived_at("2024-01-01 09:01:00"))
        .await
        .unwrap();
    client
        .add(AddRequest::new("C", "fracture", 2).arrived_at("2024-01-01 09:02:00"))
        .await
        .unwrap();

    let list = client.list().await.unwrap();
    let order: Vec<_> = list.entries.iter().map(|e| e.identity.as_str()).collect();
    assert_eq!(order, vec!["B", "C", "A"]);
    assert_eq!(list.count, 3);

    let next = client.take_next().await.unwrap();
    assert_eq!(next.identity, "B");
    assert_eq!(next.severity_label, "Critical");
    assert_eq!(next.arrival_timestamp, "2024-01-01 09:01:00");

    let order: Vec<_> = client
        .list()
        .await
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.identity)
        .collect();
    assert_eq!(order, vec!["C", "A"]);

    let history = client.history().await.unwrap();
    assert_eq!(history.count, 1);
    assert_eq!(history.records[0].entry.identity, "B");
    assert_eq!(history.records[0].departure, "TAKE_NEXT");
}

#[tokio::test]
async fn test_routine_outcomes_are_distinguishable() {
    let server = start().await;
    let client = &server.client;

    let err = client.take_next().await.unwrap_err();
    assert!(err.is_empty(), "expected empty, got {}", err);
    let err = client.peek().await.unwrap_err();
    assert!(err.is_empty());

    let err = client.remove("Z").await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got {}", err);

    // State unchanged by the failed calls
    assert_eq!(client.list().await.unwrap().count, 0);
    assert_eq!(client.history().await.unwrap().count, 0);
}

#[tokio::test]
async fn test_validation_errors() {
    let server = start().await;
    let client = &server.client;

    let err = client.add(AddRequest::new("A", "fever", 4)).await.unwrap_err();
    assert!(err.is_validation(), "got {}", err);

    let err = client.add(AddRequest::new("", "fever", 1)).await.unwrap_err();
    assert!(err.is_validation(), "got {}", err);

    assert_eq!(client.stats().await.unwrap().admitted, 0);
}

#[tokio::test]
async fn test_malformed_timestamp_is_repaired_and_reported() {
    let server = start().await;

    let added = server
        .client
        .add(AddRequest::new("A", "fever", 3).arrived_at("sometime"))
        .await
        .unwrap();

    assert!(added.arrival_substituted);
    assert_eq!(added.entry.arrival_timestamp, "2024-01-01 00:00:00");
}

#[tokio::test]
async fn test_remove_by_identity_over_rpc() {
    let server = start().await;
    let client = &server.client;
    client.add(AddRequest::new("A", "fever", 3)).await.unwrap();
    client.add(AddRequest::new("C", "fracture", 2)).await.unwrap();

    let removed = client.remove("C").await.unwrap();
    assert_eq!(removed.identity, "C");

    let list = client.list().await.unwrap();
    assert_eq!(list.entries.len(), 1);
    assert_eq!(list.entries[0].identity, "A");

    let history = client.history().await.unwrap();
    assert_eq!(history.records[0].departure, "REMOVED");

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.waiting, 1);
    assert_eq!(stats.waiting_stable, 1);
    assert_eq!(stats.served, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clients_never_share_an_entry() {
    const N: usize = 20;
    let server = start().await;
    for i in 0..N {
        server
            .client
            .add(AddRequest::new(format!("p{}", i), "x", (i % 3 + 1) as i64))
            .await
            .unwrap();
    }

    let mut tasks = JoinSet::new();
    for _ in 0..N {
        let url = server.url.clone();
        tasks.spawn(async move {
            let client = TriageClient::connect(&url).await.unwrap();
            client.take_next().await.ok().map(|e| e.identity)
        });
    }

    let mut taken = std::collections::HashSet::new();
    while let Some(result) = tasks.join_next().await {
        if let Some(identity) = result.unwrap() {
            assert!(taken.insert(identity), "entry delivered twice");
        }
    }
    assert_eq!(taken.len(), N);
    assert!(server.client.take_next().await.unwrap_err().is_empty());
}
