//! Hosted Search Client Implementation

use crate::config::ClientConfig;
use crate::error::Result;
use hosted_search_core::application::{Index, KeyService, TaskTracker, WaitPolicy};
use hosted_search_core::domain::IndexInfo;
use hosted_search_core::port::{InMemorySearchApi, SearchApi};
use hosted_search_infra_http::HttpSearchApi;
use std::sync::Arc;
use tracing::info;

/// Entry point of the SDK.
///
/// Holds one transport shared by every [`Index`] handle it creates.
///
/// # Example
///
/// ```no_run
/// use hosted_search_sdk::{ClientConfig, Record, SearchClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SearchClient::new(ClientConfig::new("APPID", "ADMIN_KEY"))?;
/// let index = client.init_index("contacts");
///
/// let receipt = index.add_object(Record::new().with("name", "Rob Pike")).await?;
/// index.wait_task(receipt.task_id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SearchClient {
    api: Arc<dyn SearchApi>,
    tracker: TaskTracker,
}

impl SearchClient {
    /// Client over the hosted REST interface
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let api = HttpSearchApi::new(config.http_settings()?)?;
        info!(application_id = %config.application_id, "Search client created");
        Ok(Self::with_api(Arc::new(api), config.wait_policy()))
    }

    /// Client configured from `SEARCH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Client over any [`SearchApi`] implementation
    pub fn with_api(api: Arc<dyn SearchApi>, policy: WaitPolicy) -> Self {
        let tracker = TaskTracker::new(Arc::clone(&api), policy);
        Self { api, tracker }
    }

    /// Client over a fresh in-memory backend, for tests and offline use
    pub fn in_memory() -> Self {
        Self::with_api(Arc::new(InMemorySearchApi::new()), WaitPolicy::default())
    }

    /// Handle on `name`. No request is made until the handle is used.
    pub fn init_index(&self, name: impl Into<String>) -> Index {
        Index::new(name, Arc::clone(&self.api), self.tracker.clone())
    }

    pub async fn list_indices(&self) -> hosted_search_core::Result<Vec<IndexInfo>> {
        self.api.list_indices().await
    }

    /// Application-wide API key management
    pub fn keys(&self) -> KeyService {
        KeyService::new(Arc::clone(&self.api), self.tracker.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hosted_search_core::domain::{KeyParams, Record};

    #[tokio::test]
    async fn test_indices_share_one_backend() {
        let client = SearchClient::in_memory();
        let index = client.init_index("contacts");
        let receipt = index
            .add_object(Record::new().with_object_id("1").with("name", "Rob Pike"))
            .await
            .unwrap();
        index.wait_task(receipt.task_id).await.unwrap();

        let indices = client.list_indices().await.unwrap();
        assert_eq!(indices.len(), 1);
        assert_eq!(indices[0].name, "contacts");
        assert_eq!(indices[0].entries, 1);

        let same = client.init_index("contacts");
        assert_eq!(same.get_object("1", &[]).await.unwrap().get("name").unwrap(), "Rob Pike");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(SearchClient::new(ClientConfig::new("", "key")).is_err());
        assert!(SearchClient::new(ClientConfig::new("APPID", "key")).is_ok());
    }

    #[test]
    fn test_key_services_share_one_backend() {
        let client = SearchClient::in_memory();
        let keys = client.keys();
        tokio_test::block_on(async {
            let created = keys.add_key(&KeyParams::new(["search"])).await.unwrap();
            let listed = client.keys().list_keys().await.unwrap();
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].value, created.key);
        });
    }
}
