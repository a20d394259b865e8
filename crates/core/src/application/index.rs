// Index Service - operations scoped to one named index

use crate::application::browse::BrowseCursor;
use crate::application::task_tracker::TaskTracker;
use crate::domain::{
    validate_search_params, AddKeyRes, ApiKey, BatchOperation, BatchRequest, BrowsePage,
    CopyScope, DeleteKeyRes, FacetSearchResult, IndexOperation, KeyParams, PartialUpdateOp, Record, Rule,
    RuleSearchResult, SearchParams, SearchResult, Settings, Synonym, SynonymSearchResult, TaskId,
    TaskReceipt, UpdateKeyRes, OBJECT_ID,
};
use crate::error::{Result, SearchError};
use crate::port::SearchApi;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle on a single index.
///
/// Cheap to clone. Every mutation returns a [`TaskReceipt`]; pass its
/// `task_id` to [`Index::wait_task`] before reading the effect back.
#[derive(Clone)]
pub struct Index {
    name: String,
    api: Arc<dyn SearchApi>,
    tracker: TaskTracker,
}

impl Index {
    pub fn new(name: impl Into<String>, api: Arc<dyn SearchApi>, tracker: TaskTracker) -> Self {
        Self {
            name: name.into(),
            api,
            tracker,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ----- Records -----

    pub async fn add_object(&self, record: Record) -> Result<TaskReceipt> {
        debug!(index = %self.name, "Adding object");
        self.api.add_object(&self.name, &record).await
    }

    pub async fn add_objects(&self, records: Vec<Record>) -> Result<TaskReceipt> {
        self.batch(records.into_iter().map(BatchOperation::add).collect())
            .await
    }

    /// Replace a stored record entirely
    pub async fn update_object(&self, record: Record) -> Result<TaskReceipt> {
        self.update_objects(vec![record]).await
    }

    pub async fn update_objects(&self, records: Vec<Record>) -> Result<TaskReceipt> {
        self.batch(records.into_iter().map(BatchOperation::update).collect())
            .await
    }

    /// Apply the attributes and partial update directives of `record`.
    ///
    /// With `create_if_not_exists` a missing record is created from the update.
    pub async fn partial_update_object(
        &self,
        record: Record,
        create_if_not_exists: bool,
    ) -> Result<TaskReceipt> {
        self.partial_update_objects(vec![record], create_if_not_exists)
            .await
    }

    pub async fn partial_update_objects(
        &self,
        records: Vec<Record>,
        create_if_not_exists: bool,
    ) -> Result<TaskReceipt> {
        for record in &records {
            validate_directives(record)?;
        }
        self.batch(
            records
                .into_iter()
                .map(|record| BatchOperation::partial_update(record, create_if_not_exists))
                .collect(),
        )
        .await
    }

    pub async fn delete_object(&self, object_id: &str) -> Result<TaskReceipt> {
        self.delete_objects(&[object_id.to_string()]).await
    }

    pub async fn delete_objects(&self, object_ids: &[String]) -> Result<TaskReceipt> {
        self.batch(object_ids.iter().map(BatchOperation::delete).collect())
            .await
    }

    /// Fetch one record; an empty `attributes` returns every attribute
    pub async fn get_object(&self, object_id: &str, attributes: &[String]) -> Result<Record> {
        self.api.get_object(&self.name, object_id, attributes).await
    }

    pub async fn get_objects(&self, object_ids: &[String]) -> Result<Vec<Record>> {
        self.api.get_objects(&self.name, object_ids).await
    }

    /// Validate and submit a batch. Nothing is sent when validation fails.
    pub async fn batch(&self, operations: Vec<BatchOperation>) -> Result<TaskReceipt> {
        let request = BatchRequest::new(operations)?;
        debug!(index = %self.name, operations = %request.len(), "Sending batch");
        self.api.batch(&self.name, &request).await
    }

    // ----- Index lifecycle -----

    /// Remove every record, keeping settings, rules and synonyms
    pub async fn clear(&self) -> Result<TaskReceipt> {
        self.api.clear_index(&self.name).await
    }

    pub async fn delete(&self) -> Result<TaskReceipt> {
        info!(index = %self.name, "Deleting index");
        self.api.delete_index(&self.name).await
    }

    pub async fn copy(&self, destination: &str) -> Result<TaskReceipt> {
        self.operation(IndexOperation::copy(destination)).await
    }

    /// Rename this index to `destination`, replacing it if present
    pub async fn move_to(&self, destination: &str) -> Result<TaskReceipt> {
        self.operation(IndexOperation::move_to(destination)).await
    }

    /// Copy only the listed parts; records are never copied
    pub async fn scoped_copy(&self, destination: &str, scope: &[CopyScope]) -> Result<TaskReceipt> {
        self.operation(IndexOperation::scoped_copy(destination, scope.to_vec()))
            .await
    }

    async fn operation(&self, operation: IndexOperation) -> Result<TaskReceipt> {
        info!(
            index = %self.name,
            destination = %operation.destination,
            operation = ?operation.operation,
            scope = ?operation.scope,
            "Index operation"
        );
        self.api.operation_index(&self.name, &operation).await
    }

    // ----- Settings -----

    pub async fn get_settings(&self) -> Result<Settings> {
        self.api.get_settings(&self.name).await
    }

    /// Send the populated fields of `settings`
    pub async fn set_settings(&self, settings: &Settings) -> Result<TaskReceipt> {
        self.set_settings_map(&settings.to_map(), false).await
    }

    /// Send a raw settings map; keys absent from `settings` are left untouched
    pub async fn set_settings_map(
        &self,
        settings: &Map<String, Value>,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.api
            .set_settings(&self.name, settings, forward_to_replicas)
            .await
    }

    // ----- Search -----

    pub async fn search(&self, query: &str, params: &SearchParams) -> Result<SearchResult> {
        validate_search_params(params)?;
        self.api.search(&self.name, query, params).await
    }

    /// Values of `facet` matching `query`, with counts
    pub async fn search_for_facet_values(
        &self,
        facet: &str,
        query: &str,
        params: &SearchParams,
    ) -> Result<FacetSearchResult> {
        self.api
            .search_for_facet_values(&self.name, facet, query, params)
            .await
    }

    #[deprecated(note = "use `search_for_facet_values`")]
    pub async fn search_facet(
        &self,
        facet: &str,
        query: &str,
        params: &SearchParams,
    ) -> Result<FacetSearchResult> {
        self.search_for_facet_values(facet, query, params).await
    }

    /// Single browse page, for callers managing the cursor themselves
    pub async fn browse(&self, cursor: Option<String>, params: &SearchParams) -> Result<BrowsePage> {
        self.api.browse(&self.name, cursor, params).await
    }

    /// Fresh cursor over every record of the index
    pub fn browse_all(&self, params: SearchParams) -> BrowseCursor {
        BrowseCursor::new(Arc::clone(&self.api), self.name.clone(), params)
    }

    // ----- Query rules -----

    pub async fn get_rule(&self, object_id: &str) -> Result<Rule> {
        self.api.get_rule(&self.name, object_id).await
    }

    pub async fn save_rule(&self, rule: &Rule, forward_to_replicas: bool) -> Result<TaskReceipt> {
        self.api
            .save_rule(&self.name, rule, forward_to_replicas)
            .await
    }

    pub async fn batch_rules(
        &self,
        rules: &[Rule],
        forward_to_replicas: bool,
        clear_existing_rules: bool,
    ) -> Result<TaskReceipt> {
        self.api
            .batch_rules(&self.name, rules, forward_to_replicas, clear_existing_rules)
            .await
    }

    pub async fn delete_rule(&self, object_id: &str, forward_to_replicas: bool) -> Result<TaskReceipt> {
        self.api
            .delete_rule(&self.name, object_id, forward_to_replicas)
            .await
    }

    pub async fn search_rules(&self, params: &SearchParams) -> Result<RuleSearchResult> {
        self.api.search_rules(&self.name, params).await
    }

    pub async fn clear_rules(&self, forward_to_replicas: bool) -> Result<TaskReceipt> {
        self.api.clear_rules(&self.name, forward_to_replicas).await
    }

    // ----- Synonyms -----

    pub async fn get_synonym(&self, object_id: &str) -> Result<Synonym> {
        self.api.get_synonym(&self.name, object_id).await
    }

    pub async fn save_synonym(
        &self,
        synonym: &Synonym,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.api
            .save_synonym(&self.name, synonym, forward_to_replicas)
            .await
    }

    pub async fn batch_synonyms(
        &self,
        synonyms: &[Synonym],
        forward_to_replicas: bool,
        replace_existing_synonyms: bool,
    ) -> Result<TaskReceipt> {
        self.api
            .batch_synonyms(
                &self.name,
                synonyms,
                forward_to_replicas,
                replace_existing_synonyms,
            )
            .await
    }

    pub async fn delete_synonym(
        &self,
        object_id: &str,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.api
            .delete_synonym(&self.name, object_id, forward_to_replicas)
            .await
    }

    pub async fn search_synonyms(
        &self,
        query: &str,
        types: &[String],
        page: usize,
        hits_per_page: usize,
    ) -> Result<SynonymSearchResult> {
        self.api
            .search_synonyms(&self.name, query, types, page, hits_per_page)
            .await
    }

    pub async fn clear_synonyms(&self, forward_to_replicas: bool) -> Result<TaskReceipt> {
        self.api.clear_synonyms(&self.name, forward_to_replicas).await
    }

    // ----- Keys restricted to this index -----

    pub async fn add_api_key(&self, params: KeyParams) -> Result<AddKeyRes> {
        let params = params.with_indexes(vec![self.name.clone()]);
        self.api.add_key(&params).await
    }

    /// Keys whose index restriction includes this index
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
        let keys = self.api.list_keys().await?;
        Ok(keys
            .into_iter()
            .filter(|key| self.covers(key))
            .collect())
    }

    /// Fetch `key`, answering not-found when it is not restricted to this index
    pub async fn get_api_key(&self, key: &str) -> Result<ApiKey> {
        let found = self.api.get_key(key).await?;
        if !self.covers(&found) {
            return Err(SearchError::not_found("Key does not exist"));
        }
        Ok(found)
    }

    pub async fn update_api_key(&self, key: &str, params: &KeyParams) -> Result<UpdateKeyRes> {
        self.get_api_key(key).await?;
        self.api.update_key(key, params).await
    }

    pub async fn delete_api_key(&self, key: &str) -> Result<DeleteKeyRes> {
        self.get_api_key(key).await?;
        let res = self.api.delete_key(key).await?;
        info!(index = %self.name, "API key deleted");
        Ok(res)
    }

    /// Wait until `key` is readable through this index
    pub async fn wait_api_key(&self, key: &str) -> Result<ApiKey> {
        self.wait_api_key_until(key, |_| true).await
    }

    pub async fn wait_api_key_until<F>(&self, key: &str, ready: F) -> Result<ApiKey>
    where
        F: Fn(&ApiKey) -> bool + Send + Sync,
    {
        self.tracker
            .wait_key_until(key, |found| self.covers(found) && ready(found))
            .await
    }

    fn covers(&self, key: &ApiKey) -> bool {
        key.indexes.iter().any(|index| index == &self.name)
    }

    // ----- Tasks -----

    pub async fn wait_task(&self, task_id: TaskId) -> Result<()> {
        self.tracker.wait_task(&self.name, task_id).await
    }

    pub async fn wait_tasks(&self, task_ids: &[TaskId]) -> Result<()> {
        self.tracker.wait_tasks(&self.name, task_ids).await
    }
}

/// Reject unknown `_operation` kinds before anything is sent
fn validate_directives(record: &Record) -> Result<()> {
    for (attribute, value) in record.attributes() {
        if attribute != OBJECT_ID {
            PartialUpdateOp::from_value(value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::task_tracker::WaitPolicy;
    use crate::domain::DomainError;
    use crate::error::SearchError;
    use crate::port::{InMemorySearchApi, MockSearchApi};
    use serde_json::json;

    /// Index over a mock with no expectations: any remote call panics
    fn offline_index() -> Index {
        let api: Arc<dyn SearchApi> = Arc::new(MockSearchApi::new());
        let tracker = TaskTracker::new(api.clone(), WaitPolicy::default());
        Index::new("idx", api, tracker)
    }

    fn in_memory_index() -> Index {
        let api: Arc<dyn SearchApi> = Arc::new(InMemorySearchApi::new());
        let tracker = TaskTracker::new(api.clone(), WaitPolicy::default());
        Index::new("idx", api, tracker)
    }

    #[tokio::test]
    async fn test_missing_object_id_rejected_before_any_call() {
        let index = offline_index();
        let err = index
            .update_objects(vec![Record::new().with("key", "value")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::Domain(DomainError::MissingObjectId { position: 0, .. })
        ));

        let err = index
            .partial_update_object(Record::new().with("key", "value"), false)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_invalid_geo_params_rejected_before_any_call() {
        let index = offline_index();
        let params = json!({"insideBoundingBox": ["1.0,2.0,3.0,4.0"]})
            .as_object()
            .cloned()
            .unwrap();
        let err = index.search("", &params).await.unwrap_err();
        assert!(err.to_string().contains("insideBoundingBox"));
    }

    #[tokio::test]
    async fn test_unknown_directive_rejected_before_any_call() {
        let index = offline_index();
        let record = Record::new()
            .with_object_id("1")
            .with("views", json!({"_operation": "Multiply", "value": 2}));
        let err = index.partial_update_object(record, true).await.unwrap_err();
        assert!(err.to_string().contains("Multiply"));
    }

    #[tokio::test]
    async fn test_partial_update_applies_directives() {
        let index = in_memory_index();
        let receipt = index
            .add_object(Record::new().with_object_id("1").with("views", 10))
            .await
            .unwrap();
        index.wait_task(receipt.task_id).await.unwrap();

        let update = Record::new()
            .with_object_id("1")
            .with("views", PartialUpdateOp::Increment(5))
            .with("likes", PartialUpdateOp::Increment(5));
        let receipt = index.partial_update_object(update, false).await.unwrap();
        index.wait_task(receipt.task_id).await.unwrap();

        let record = index.get_object("1", &[]).await.unwrap();
        assert_eq!(record.get("views"), Some(&json!(15)));
        assert_eq!(record.get("likes"), Some(&json!(5)));
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn test_facet_search_alias_matches() {
        let index = in_memory_index();
        let receipt = index
            .set_settings_map(
                json!({"attributesForFaceting": ["searchable(company)"]})
                    .as_object()
                    .unwrap(),
                false,
            )
            .await
            .unwrap();
        index.wait_task(receipt.task_id).await.unwrap();
        index
            .add_objects(vec![
                Record::new().with("company", "Algolia"),
                Record::new().with("company", "Apple"),
            ])
            .await
            .unwrap();

        let params = SearchParams::new();
        let a = index.search_for_facet_values("company", "a", &params).await.unwrap();
        let b = index.search_facet("company", "a", &params).await.unwrap();
        assert_eq!(a.facet_hits, b.facet_hits);
        assert_eq!(a.facet_hits.len(), 2);
    }

    #[tokio::test]
    async fn test_index_scoped_keys() {
        let index = in_memory_index();
        let res = index.add_api_key(KeyParams::new(["search"])).await.unwrap();

        let keys = index.list_api_keys().await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].value, res.key);
        assert_eq!(keys[0].indexes, vec!["idx"]);

        let key = index.wait_api_key(&res.key).await.unwrap();
        assert_eq!(key.acl, vec!["search"]);
    }

    #[tokio::test]
    async fn test_unscoped_key_is_invisible_to_index() {
        let index = in_memory_index();
        let global = index.api.add_key(&KeyParams::new(["search"])).await.unwrap();

        assert!(index.get_api_key(&global.key).await.unwrap_err().is_not_found());
        assert!(index.delete_api_key(&global.key).await.unwrap_err().is_not_found());
        // Still there for the application-wide service
        assert!(index.api.get_key(&global.key).await.is_ok());
    }
}
