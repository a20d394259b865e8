//! Record Indexing Integration Tests
//!
//! Batches, partial updates, record retrieval and browsing against the
//! in-memory backend.

use futures::StreamExt;
use hosted_search_sdk::{
    BatchOperation, PartialUpdateOp, Record, SearchClient, SearchError, SearchParams,
};
use serde_json::json;

/// Every partial update directive applied in a single batch
#[tokio::test]
async fn test_batch_partial_update_applies_every_directive() {
    let client = SearchClient::in_memory();
    let index = client.init_index("batch_partial_update");

    let receipt = index
        .add_object(
            Record::new()
                .with("replace", 10)
                .with("increment", 10)
                .with("decrement", 10)
                .with("addInt", json!([1, 2, 3]))
                .with("addString", json!(["1", "2", "3"]))
                .with("removeInt", json!([1, 2, 3]))
                .with("removeString", json!(["1", "2", "3"]))
                .with("addUniqueInt", json!([1, 2, 3]))
                .with("addUniqueString", json!(["1", "2", "3"])),
        )
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let object_id = receipt.object_id.expect("generated objectID");

    let receipt = index
        .batch(vec![BatchOperation::partial_update(
            Record::new()
                .with_object_id(object_id.clone())
                .with("replace", PartialUpdateOp::Replace(json!(0)))
                .with("increment", PartialUpdateOp::Increment(5))
                .with("decrement", PartialUpdateOp::Decrement(5))
                .with("addInt", PartialUpdateOp::Add(json!(3)))
                .with("addString", PartialUpdateOp::Add(json!("3")))
                .with("removeInt", PartialUpdateOp::Remove(json!(3)))
                .with("removeString", PartialUpdateOp::Remove(json!("3")))
                .with("addUniqueInt", PartialUpdateOp::AddUnique(json!(3)))
                .with("addUniqueString", PartialUpdateOp::AddUnique(json!("3"))),
            false,
        )])
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let record = index.get_object(&object_id, &[]).await.unwrap();
    assert_eq!(record.get("replace"), Some(&json!(0)));
    assert_eq!(record.get("increment"), Some(&json!(15)));
    assert_eq!(record.get("decrement"), Some(&json!(5)));
    assert_eq!(record.get("addInt"), Some(&json!([1, 2, 3, 3])));
    assert_eq!(record.get("addString"), Some(&json!(["1", "2", "3", "3"])));
    assert_eq!(record.get("removeInt"), Some(&json!([1, 2])));
    assert_eq!(record.get("removeString"), Some(&json!(["1", "2"])));
    assert_eq!(record.get("addUniqueInt"), Some(&json!([1, 2, 3])));
    assert_eq!(record.get("addUniqueString"), Some(&json!(["1", "2", "3"])));

    println!("✅ Batch partial update applied all directives");
}

/// A partial update only creates a missing record when asked to
#[tokio::test]
async fn test_partial_update_create_if_not_exists() {
    let client = SearchClient::in_memory();
    let index = client.init_index("partial_update_create");

    let receipt = index
        .partial_update_object(
            Record::new().with_object_id("ghost").with("views", PartialUpdateOp::Increment(1)),
            false,
        )
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let err = index.get_object("ghost", &[]).await.unwrap_err();
    assert!(err.is_not_found());

    let receipt = index
        .partial_update_object(
            Record::new().with_object_id("ghost").with("views", PartialUpdateOp::Increment(1)),
            true,
        )
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    let record = index.get_object("ghost", &[]).await.unwrap();
    assert_eq!(record.get("views"), Some(&json!(1)));
}

/// A rejected batch leaves every record as it was
#[tokio::test]
async fn test_rejected_batch_is_not_partially_applied() {
    let client = SearchClient::in_memory();
    let index = client.init_index("rejected_batch");

    let receipt = index
        .add_objects(vec![
            Record::new().with_object_id("1").with("tags", "not-a-list"),
            Record::new().with_object_id("2").with("views", 1),
        ])
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let err = index
        .batch(vec![
            BatchOperation::partial_update(
                Record::new().with_object_id("2").with("views", PartialUpdateOp::Increment(10)),
                false,
            ),
            BatchOperation::partial_update(
                Record::new().with_object_id("1").with("tags", PartialUpdateOp::Add(json!("x"))),
                false,
            ),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Api { status: 400, .. }));

    let record = index.get_object("2", &[]).await.unwrap();
    assert_eq!(record.get("views"), Some(&json!(1)));
}

/// Unknown directives are rejected before anything is sent
#[tokio::test]
async fn test_unknown_directive_is_rejected_locally() {
    let client = SearchClient::in_memory();
    let index = client.init_index("unknown_directive");

    let err = index
        .partial_update_object(
            Record::new()
                .with_object_id("1")
                .with("views", json!({"_operation": "Multiply", "value": 2})),
            true,
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(client.list_indices().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_object_ids() {
    let client = SearchClient::in_memory();
    let index = client.init_index("missing_object_ids");

    // Records without objectID get one generated
    let receipt = index
        .add_objects(vec![
            Record::new().with("name", "Rob Pike"),
            Record::new().with("name", "Ken Thompson"),
        ])
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();
    assert_eq!(receipt.object_ids.len(), 2);
    let records = index.get_objects(&receipt.object_ids).await.unwrap();
    assert_eq!(records.len(), 2);

    // Operations that need an objectID refuse records without one
    let err = index
        .update_objects(vec![Record::new().with("name", "anonymous")])
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = index
        .partial_update_object(Record::new().with("views", PartialUpdateOp::Increment(1)), true)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_get_object_with_attribute_filter() {
    let client = SearchClient::in_memory();
    let index = client.init_index("get_object_attributes");

    let receipt = index
        .add_object(
            Record::new()
                .with_object_id("1")
                .with("name", "Rob Pike")
                .with("company", "Google"),
        )
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let record = index.get_object("1", &["name".to_string()]).await.unwrap();
    assert_eq!(record.get("name"), Some(&json!("Rob Pike")));
    assert_eq!(record.get("company"), None);
    assert_eq!(record.object_id().unwrap(), "1");

    let records = index
        .get_objects(&["1".to_string(), "404".to_string()])
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_search_pagination() {
    let client = SearchClient::in_memory();
    let index = client.init_index("search_pagination");

    let records = (0..25)
        .map(|i| Record::new().with_object_id(format!("{i:02}")).with("name", format!("contact {i}")))
        .collect();
    let receipt = index.add_objects(records).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let mut params = SearchParams::new();
    params.insert("hitsPerPage".to_string(), json!(10));
    params.insert("page".to_string(), json!(2));
    let res = index.search("contact", &params).await.unwrap();
    assert_eq!(res.nb_hits, 25);
    assert_eq!(res.nb_pages, 3);
    assert_eq!(res.hits.len(), 5);

    let res = index.search("nobody", &SearchParams::new()).await.unwrap();
    assert_eq!(res.nb_hits, 0);
}

#[tokio::test]
async fn test_geo_search_parameters() {
    let client = SearchClient::in_memory();
    let index = client.init_index("geo_search_parameters");
    let receipt = index
        .add_object(Record::new().with_object_id("1").with("name", "Paris"))
        .await
        .unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let valid = [
        json!({"insideBoundingBox": "1.0,2.0,3.0,4.0"}),
        json!({"insideBoundingBox": "1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0"}),
        json!({"insidePolygon": "1.0,2.0,3.0,4.0,5.0,6.0"}),
        json!({"insidePolygon": [[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]]}),
    ];
    for params in valid {
        let params: SearchParams = serde_json::from_value(params).unwrap();
        assert!(index.search("", &params).await.is_ok(), "{params:?} should be accepted");
    }

    let invalid = [
        json!({"insideBoundingBox": ["1.0,2.0,3.0,4.0"]}),
        json!({"insidePolygon": ["1.0,2.0,3.0,4.0"]}),
    ];
    for params in invalid {
        let params: SearchParams = serde_json::from_value(params).unwrap();
        let err = index.search("", &params).await.unwrap_err();
        assert!(err.is_validation(), "{params:?} should be rejected locally");
    }
}

/// Browse walks every record across several pages
#[tokio::test]
async fn test_browse_all_3500_records() {
    let client = SearchClient::in_memory();
    let index = client.init_index("browse_all");

    let records: Vec<Record> = (0..3500)
        .map(|i| Record::new().with_object_id(i.to_string()).with("n", i))
        .collect();
    let receipt = index.add_objects(records).await.unwrap();
    index.wait_task(receipt.task_id).await.unwrap();

    let mut cursor = index.browse_all(SearchParams::new());
    let mut seen = 0;
    loop {
        match cursor.next().await {
            Ok(_) => seen += 1,
            Err(e) if e.is_no_more_hits() => break,
            Err(e) => panic!("browse failed: {e}"),
        }
    }
    assert_eq!(seen, 3500);

    // Exhausted cursors keep reporting the end
    assert!(cursor.next().await.unwrap_err().is_no_more_hits());

    let mut params = SearchParams::new();
    params.insert("hitsPerPage".to_string(), json!(500));
    let streamed = index.browse_all(params).into_stream();
    let count = Box::pin(streamed)
        .fold(0usize, |count, record| async move {
            record.unwrap();
            count + 1
        })
        .await;
    assert_eq!(count, 3500);

    println!("✅ Browsed 3500 records");
}

#[tokio::test]
async fn test_browse_missing_index_surfaces_error() {
    let client = SearchClient::in_memory();
    let mut cursor = client.init_index("does_not_exist").browse_all(SearchParams::new());

    let err = cursor.next().await.unwrap_err();
    assert!(err.is_not_found());
}
