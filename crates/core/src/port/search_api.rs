// SearchApi Port (Interface)
//
// Boundary toward the transport. Every mutating method returns a TaskReceipt
// whose task must be waited on before its effects are visible to reads.

use crate::domain::{
    AddKeyRes, ApiKey, BatchRequest, BrowsePage, DeleteKeyRes, FacetSearchResult, IndexInfo,
    IndexOperation, KeyParams, Record, Rule, RuleSearchResult, SearchParams, SearchResult,
    Settings, Synonym, SynonymSearchResult, TaskId, TaskReceipt, TaskStatus, UpdateKeyRes,
};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Remote operations consumed by the client services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchApi: Send + Sync {
    // ----- Indices -----

    async fn list_indices(&self) -> Result<Vec<IndexInfo>>;

    async fn delete_index(&self, index: &str) -> Result<TaskReceipt>;

    /// Remove every record, keeping settings, rules and synonyms
    async fn clear_index(&self, index: &str) -> Result<TaskReceipt>;

    /// Copy, move or scoped copy of `index`
    async fn operation_index(&self, index: &str, operation: &IndexOperation)
        -> Result<TaskReceipt>;

    // ----- Objects -----

    /// Insert a record; the service assigns an `objectID` when it has none
    async fn add_object(&self, index: &str, record: &Record) -> Result<TaskReceipt>;

    /// Fetch one record, optionally restricted to `attributes`
    async fn get_object(&self, index: &str, object_id: &str, attributes: &[String])
        -> Result<Record>;

    async fn get_objects(&self, index: &str, object_ids: &[String]) -> Result<Vec<Record>>;

    /// Submit a validated batch as one atomic request; one task covers it all
    async fn batch(&self, index: &str, batch: &BatchRequest) -> Result<TaskReceipt>;

    // ----- Search -----

    async fn search(&self, index: &str, query: &str, params: &SearchParams) -> Result<SearchResult>;

    async fn search_for_facet_values(
        &self,
        index: &str,
        facet: &str,
        query: &str,
        params: &SearchParams,
    ) -> Result<FacetSearchResult>;

    /// One page of the full object set; `cursor` is the one returned by the previous page
    async fn browse(
        &self,
        index: &str,
        cursor: Option<String>,
        params: &SearchParams,
    ) -> Result<BrowsePage>;

    // ----- Settings -----

    async fn get_settings(&self, index: &str) -> Result<Settings>;

    /// Partial update: only the keys present in `settings` change
    async fn set_settings(
        &self,
        index: &str,
        settings: &Map<String, Value>,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt>;

    // ----- Tasks -----

    async fn get_task_status(&self, index: &str, task_id: TaskId) -> Result<TaskStatus>;

    // ----- Query rules -----

    async fn get_rule(&self, index: &str, object_id: &str) -> Result<Rule>;

    async fn save_rule(&self, index: &str, rule: &Rule, forward_to_replicas: bool)
        -> Result<TaskReceipt>;

    async fn batch_rules(
        &self,
        index: &str,
        rules: &[Rule],
        forward_to_replicas: bool,
        clear_existing_rules: bool,
    ) -> Result<TaskReceipt>;

    async fn delete_rule(
        &self,
        index: &str,
        object_id: &str,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt>;

    async fn search_rules(&self, index: &str, params: &SearchParams) -> Result<RuleSearchResult>;

    async fn clear_rules(&self, index: &str, forward_to_replicas: bool) -> Result<TaskReceipt>;

    // ----- Synonyms -----

    async fn get_synonym(&self, index: &str, object_id: &str) -> Result<Synonym>;

    async fn save_synonym(
        &self,
        index: &str,
        synonym: &Synonym,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt>;

    async fn batch_synonyms(
        &self,
        index: &str,
        synonyms: &[Synonym],
        forward_to_replicas: bool,
        replace_existing_synonyms: bool,
    ) -> Result<TaskReceipt>;

    async fn delete_synonym(
        &self,
        index: &str,
        object_id: &str,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt>;

    /// `types` restricts hits to the given `type` tags; empty means all
    async fn search_synonyms(
        &self,
        index: &str,
        query: &str,
        types: &[String],
        page: usize,
        hits_per_page: usize,
    ) -> Result<SynonymSearchResult>;

    async fn clear_synonyms(&self, index: &str, forward_to_replicas: bool) -> Result<TaskReceipt>;

    // ----- API keys -----

    async fn list_keys(&self) -> Result<Vec<ApiKey>>;

    async fn get_key(&self, key: &str) -> Result<ApiKey>;

    async fn add_key(&self, params: &KeyParams) -> Result<AddKeyRes>;

    async fn update_key(&self, key: &str, params: &KeyParams) -> Result<UpdateKeyRes>;

    async fn delete_key(&self, key: &str) -> Result<DeleteKeyRes>;
}
