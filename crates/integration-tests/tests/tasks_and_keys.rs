//! Task Tracking and API Key Integration Tests
//!
//! The in-memory backend is configured to publish tasks and reveal keys
//! only after a few checks, so every wait has to poll.

use std::sync::Arc;
use std::time::Duration;

use hosted_search_core::port::InMemorySearchApi;
use hosted_search_sdk::{KeyParams, Record, SearchClient, SearchError, WaitPolicy};

fn fast_policy(max_attempts: u32) -> WaitPolicy {
    WaitPolicy::new(max_attempts, Duration::from_millis(1))
}

#[tokio::test]
async fn test_wait_tasks_polls_every_task_until_published() {
    let api = Arc::new(InMemorySearchApi::new().with_publish_after(2));
    let client = SearchClient::with_api(api.clone(), fast_policy(10));
    let index = client.init_index("wait_tasks");

    let mut tasks = Vec::new();
    for i in 0..3 {
        let receipt = index
            .add_object(Record::new().with_object_id(i.to_string()).with("n", i))
            .await
            .unwrap();
        tasks.push(receipt.task_id);
    }

    index.wait_tasks(&tasks).await.unwrap();

    // Two pending checks and one published check per task
    assert_eq!(api.status_checks().await, 9);
    assert_eq!(api.record_count("wait_tasks").await, 3);
}

#[tokio::test]
async fn test_wait_task_gives_up_after_max_attempts() {
    let api = Arc::new(InMemorySearchApi::new().with_publish_after(5));
    let client = SearchClient::with_api(api.clone(), fast_policy(3));
    let index = client.init_index("wait_timeout");

    let receipt = index
        .add_object(Record::new().with_object_id("1"))
        .await
        .unwrap();
    let err = index.wait_task(receipt.task_id).await.unwrap_err();

    match err {
        SearchError::TaskTimeout { task_id, attempts } => {
            assert_eq!(task_id, receipt.task_id);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected a task timeout, got {other}"),
    }
    assert_eq!(api.status_checks().await, 3);
}

#[tokio::test]
async fn test_wait_for_unknown_task_fails_fast() {
    let api = Arc::new(InMemorySearchApi::new());
    let client = SearchClient::with_api(api.clone(), fast_policy(10));

    let err = client.init_index("unknown_task").wait_task(9999).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(api.status_checks().await, 1);
}

#[tokio::test]
async fn test_key_lifecycle() {
    let api = Arc::new(InMemorySearchApi::new().with_key_visibility_delay(2));
    let client = SearchClient::with_api(api, fast_policy(10));
    let keys = client.keys();

    let params = KeyParams::new(["search"])
        .with_description("Search-Only Key")
        .with_max_queries_per_ip_per_hour(1000)
        .with_query_parameters("typoTolerance=strict")
        .with_validity(600)
        .with_max_hits_per_query(1);
    let created = keys.add_key(&params).await.unwrap();

    // Not readable right away
    assert!(keys.get_key(&created.key).await.unwrap_err().is_not_found());

    let key = keys.wait_key(&created.key).await.unwrap();
    assert_eq!(key.acl, vec!["search".to_string()]);
    assert_eq!(key.description, "Search-Only Key");
    assert_eq!(key.max_queries_per_ip_per_hour, 1000);
    assert_eq!(key.query_parameters, "typoTolerance=strict");
    assert_eq!(key.validity, 600);
    assert_eq!(key.max_hits_per_query, 1);

    assert!(keys
        .list_keys()
        .await
        .unwrap()
        .iter()
        .any(|listed| listed.value == created.key));

    let update = KeyParams::new(["search", "browse"]).with_max_hits_per_query(42);
    keys.update_key(&created.key, &update).await.unwrap();
    let key = keys
        .wait_key_until(&created.key, |key| key.max_hits_per_query == 42)
        .await
        .unwrap();
    assert_eq!(key.acl, vec!["search".to_string(), "browse".to_string()]);
    assert_eq!(key.description, "Search-Only Key");

    keys.delete_key(&created.key).await.unwrap();
    assert!(keys.get_key(&created.key).await.unwrap_err().is_not_found());
    assert!(keys.delete_key(&created.key).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_wait_key_times_out_on_missing_key() {
    let client = SearchClient::with_api(Arc::new(InMemorySearchApi::new()), fast_policy(3));

    let err = client.keys().wait_key("missing").await.unwrap_err();
    assert!(matches!(err, SearchError::KeyTimeout { attempts: 3, .. }));
}

/// Keys created through an index are managed through it end to end:
/// wait, update, wait for the update to show, then delete.
#[tokio::test]
async fn test_index_scoped_keys() {
    let api = Arc::new(InMemorySearchApi::new().with_key_visibility_delay(2));
    let client = SearchClient::with_api(api, fast_policy(10));
    let index = client.init_index("scoped_keys");
    let other = client.init_index("other_index");

    let created = index.add_api_key(KeyParams::new(["search"])).await.unwrap();
    let foreign = other.add_api_key(KeyParams::new(["browse"])).await.unwrap();
    client.keys().add_key(&KeyParams::new(["listIndexes"])).await.unwrap();

    let key = index.wait_api_key(&created.key).await.unwrap();
    assert_eq!(key.acl, vec!["search".to_string()]);
    other.wait_api_key(&foreign.key).await.unwrap();

    let scoped = index.list_api_keys().await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].value, created.key);
    assert_eq!(scoped[0].indexes, vec!["scoped_keys".to_string()]);

    // Another index's key is not reachable from here
    assert!(index.get_api_key(&foreign.key).await.unwrap_err().is_not_found());

    let update = KeyParams::new(["search"]).with_description("Scoped search key");
    index.update_api_key(&created.key, &update).await.unwrap();
    let key = index
        .wait_api_key_until(&created.key, |key| key.description == "Scoped search key")
        .await
        .unwrap();
    assert_eq!(key.indexes, vec!["scoped_keys".to_string()]);
    assert_eq!(index.get_api_key(&created.key).await.unwrap().description, "Scoped search key");

    index.delete_api_key(&created.key).await.unwrap();
    assert!(index.get_api_key(&created.key).await.unwrap_err().is_not_found());
    assert!(index.list_api_keys().await.unwrap().is_empty());

    println!("✅ Index-scoped key updated and deleted");
}
