//! Simple SDK Example
//!
//! Indexes a few contacts, applies a partial update, then browses the index.
//! Runs against the in-memory backend unless `SEARCH_APPLICATION_ID` and
//! `SEARCH_API_KEY` are set.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package hosted-search-sdk --example simple
//! ```

use futures::StreamExt;
use hosted_search_sdk::{PartialUpdateOp, Record, SearchClient, SearchParams};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Hosted Search SDK - Simple Example");
    println!("==================================\n");

    let client = match SearchClient::from_env() {
        Ok(client) => client,
        Err(_) => {
            println!("No credentials in the environment, using the in-memory backend\n");
            SearchClient::in_memory()
        }
    };
    let index = client.init_index("sdk_simple_example");

    // 1. Index records
    println!("1. Adding contacts...");
    let receipt = index
        .add_objects(vec![
            Record::new().with_object_id("1").with("name", "Rob Pike").with("views", 10),
            Record::new().with_object_id("2").with("name", "Ken Thompson").with("views", 3),
        ])
        .await?;
    index.wait_task(receipt.task_id).await?;
    println!("   ✓ Task {} published\n", receipt.task_id);

    // 2. Partial update
    println!("2. Incrementing views of contact 1...");
    let receipt = index
        .partial_update_object(
            Record::new()
                .with_object_id("1")
                .with("views", PartialUpdateOp::Increment(5)),
            false,
        )
        .await?;
    index.wait_task(receipt.task_id).await?;
    let record = index.get_object("1", &[]).await?;
    println!("   ✓ views = {}\n", record.get("views").cloned().unwrap_or_default());

    // 3. Browse everything
    println!("3. Browsing the index...");
    let mut records = Box::pin(index.browse_all(SearchParams::new()).into_stream());
    while let Some(record) = records.next().await {
        let record = record?;
        println!("   • {}", serde_json::Value::from(record));
    }

    index.delete().await?;
    println!("\n✓ Done");
    Ok(())
}
