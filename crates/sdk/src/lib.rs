//! Hosted Search SDK - Rust Client Library
//!
//! Index records, tune settings, manage rules, synonyms and API keys, and
//! wait for the asynchronous tasks every mutation produces.
//!
//! # Example
//!
//! ```no_run
//! use hosted_search_sdk::{ClientConfig, Record, SearchClient, SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SearchClient::new(ClientConfig::new("APPID", "ADMIN_KEY"))?;
//!     let index = client.init_index("contacts");
//!
//!     let receipt = index
//!         .add_objects(vec![
//!             Record::new().with("name", "Rob Pike").with("company", "Google"),
//!             Record::new().with("name", "Steve Jobs").with("company", "Apple"),
//!         ])
//!         .await?;
//!     index.wait_task(receipt.task_id).await?;
//!
//!     let res = index.search("rob", &SearchParams::new()).await?;
//!     println!("{} hits", res.nb_hits);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

pub use crate::config::{ClientConfig, ENV_PREFIX};
pub use client::SearchClient;
pub use error::{Result, SdkError};

pub use hosted_search_core::application::{BrowseCursor, Index, KeyService, WaitPolicy};
pub use hosted_search_core::domain::{
    self, AltCorrectionType, Anchoring, BatchOperation, CopyScope, KeyParams, PartialUpdateOp,
    Record, Rule, RuleCondition, RuleConsequence, SearchParams, Settings, Synonym, TaskReceipt,
};
pub use hosted_search_core::SearchError;
