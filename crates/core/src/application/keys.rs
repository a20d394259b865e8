// Key Service - application-wide API key management

use crate::application::task_tracker::TaskTracker;
use crate::domain::{AddKeyRes, ApiKey, DeleteKeyRes, KeyParams, UpdateKeyRes};
use crate::error::Result;
use crate::port::SearchApi;
use std::sync::Arc;
use tracing::info;

/// Key CRUD plus waiting for eventual visibility.
///
/// Key changes produce no task; use [`KeyService::wait_key`] after
/// `add_key` before relying on the new key.
#[derive(Clone)]
pub struct KeyService {
    api: Arc<dyn SearchApi>,
    tracker: TaskTracker,
}

impl KeyService {
    pub fn new(api: Arc<dyn SearchApi>, tracker: TaskTracker) -> Self {
        Self { api, tracker }
    }

    pub async fn list_keys(&self) -> Result<Vec<ApiKey>> {
        self.api.list_keys().await
    }

    pub async fn get_key(&self, key: &str) -> Result<ApiKey> {
        self.api.get_key(key).await
    }

    pub async fn add_key(&self, params: &KeyParams) -> Result<AddKeyRes> {
        let res = self.api.add_key(params).await?;
        info!(acl = ?params.acl, "API key created");
        Ok(res)
    }

    pub async fn update_key(&self, key: &str, params: &KeyParams) -> Result<UpdateKeyRes> {
        self.api.update_key(key, params).await
    }

    pub async fn delete_key(&self, key: &str) -> Result<DeleteKeyRes> {
        let res = self.api.delete_key(key).await?;
        info!("API key deleted");
        Ok(res)
    }

    /// Wait until `key` is readable
    pub async fn wait_key(&self, key: &str) -> Result<ApiKey> {
        self.tracker.wait_key(key).await
    }

    /// Wait until `key` is readable and `ready` holds, e.g. after an update
    pub async fn wait_key_until<F>(&self, key: &str, ready: F) -> Result<ApiKey>
    where
        F: Fn(&ApiKey) -> bool + Send + Sync,
    {
        self.tracker.wait_key_until(key, ready).await
    }
}
