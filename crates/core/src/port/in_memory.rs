// In-memory SearchApi
//
// Single-process stand-in for the hosted service. Writes apply immediately
// but their tasks only report `published` after a configurable number of
// status checks, and new keys stay invisible for a configurable number of
// reads, so waiting code paths are exercised.

use crate::domain::{
    apply_partial_update, AddKeyRes, ApiKey, BatchAction, BatchRequest, BrowsePage, CopyScope,
    DeleteKeyRes, FacetHit, FacetSearchResult, IndexInfo, IndexOperation, KeyParams,
    OperationKind, Record, Rule, RuleSearchResult, SearchParams, SearchResult, Settings, Synonym,
    SynonymSearchResult, TaskId, TaskReceipt, TaskStatus, UpdateKeyRes, OBJECT_ID,
};
use crate::error::{Result, SearchError};
use crate::port::SearchApi;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_HITS_PER_PAGE: usize = 20;
const DEFAULT_BROWSE_PAGE_SIZE: usize = 1000;
const DEFAULT_MAX_FACET_HITS: usize = 10;

#[derive(Debug, Clone, Default)]
struct IndexData {
    records: BTreeMap<String, Record>,
    settings: Settings,
    rules: BTreeMap<String, Rule>,
    synonyms: BTreeMap<String, Synonym>,
    created_at: String,
    updated_at: String,
}

impl IndexData {
    fn new() -> Self {
        let now = timestamp();
        Self {
            created_at: now.clone(),
            updated_at: now,
            ..Default::default()
        }
    }
}

#[derive(Default)]
struct State {
    indices: BTreeMap<String, IndexData>,
    /// Pending task id -> status checks left before `published`.
    /// Ids up to `next_task_id` that are absent here are published.
    tasks: HashMap<TaskId, u32>,
    next_task_id: TaskId,
    keys: BTreeMap<String, ApiKey>,
    /// key -> reads left before the key becomes visible
    hidden_keys: HashMap<String, u32>,
    status_checks: u64,
}

impl State {
    fn new_task(&mut self, polls_before_publish: u32) -> TaskId {
        self.next_task_id += 1;
        if polls_before_publish > 0 {
            self.tasks.insert(self.next_task_id, polls_before_publish);
        }
        self.next_task_id
    }

    fn index(&self, name: &str) -> Result<&IndexData> {
        self.indices
            .get(name)
            .ok_or_else(|| SearchError::not_found("Index does not exist"))
    }

    fn index_mut(&mut self, name: &str) -> Result<&mut IndexData> {
        self.indices
            .get_mut(name)
            .ok_or_else(|| SearchError::not_found("Index does not exist"))
    }

    /// Writes create the index on first use
    fn index_or_create(&mut self, name: &str) -> &mut IndexData {
        let index = self
            .indices
            .entry(name.to_string())
            .or_insert_with(IndexData::new);
        index.updated_at = timestamp();
        index
    }
}

/// In-memory implementation of [`SearchApi`]
pub struct InMemorySearchApi {
    state: Mutex<State>,
    polls_before_publish: u32,
    key_visibility_delay: u32,
}

impl Default for InMemorySearchApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySearchApi {
    /// Tasks publish on the first status check, keys are visible immediately
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            polls_before_publish: 0,
            key_visibility_delay: 0,
        }
    }

    /// Every task reports `notPublished` for `polls` status checks
    pub fn with_publish_after(mut self, polls: u32) -> Self {
        self.polls_before_publish = polls;
        self
    }

    /// New keys answer 404 for `reads` lookups
    pub fn with_key_visibility_delay(mut self, reads: u32) -> Self {
        self.key_visibility_delay = reads;
        self
    }

    /// Total number of task status checks served so far
    pub async fn status_checks(&self) -> u64 {
        self.state.lock().await.status_checks
    }

    /// Number of records stored in `index`, 0 when it does not exist
    pub async fn record_count(&self, index: &str) -> usize {
        self.state
            .lock()
            .await
            .indices
            .get(index)
            .map_or(0, |data| data.records.len())
    }

    fn receipt(&self, state: &mut State) -> TaskReceipt {
        TaskReceipt::new(state.new_task(self.polls_before_publish))
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

fn param_usize(params: &SearchParams, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map_or(default, |n| n as usize)
}

fn param_str<'a>(params: &'a SearchParams, name: &str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Case-insensitive containment over every string reachable from `value`
fn value_contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Array(items) => items.iter().any(|item| value_contains(item, needle)),
        Value::Object(map) => map.values().any(|item| value_contains(item, needle)),
        _ => false,
    }
}

/// Facet values carried by one attribute: a string or a list of strings
fn facet_values(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// Wrap the first word prefix of `value` matching `query` in `<em>` tags
fn highlight_prefix(value: &str, query: &str) -> Option<String> {
    if query.is_empty() {
        return Some(value.to_string());
    }
    let query = query.to_lowercase();
    let query_chars = query.chars().count();
    let mut word_start = Some(0);
    for (pos, ch) in value.char_indices() {
        if ch.is_whitespace() {
            word_start = None;
            continue;
        }
        let start = *word_start.get_or_insert(pos);
        if start != pos {
            continue;
        }
        let word = &value[start..];
        if word.to_lowercase().starts_with(&query) {
            let end = word
                .char_indices()
                .nth(query_chars)
                .map_or(value.len(), |(offset, _)| start + offset);
            return Some(format!(
                "{}<em>{}</em>{}",
                &value[..start],
                &value[start..end],
                &value[end..]
            ));
        }
    }
    None
}

/// Attributes declared `searchable(...)` in `attributesForFaceting`
fn is_searchable_facet(settings: &Settings, facet: &str) -> bool {
    settings
        .attributes_for_faceting
        .iter()
        .any(|declared| declared == &format!("searchable({facet})"))
}

fn paginate<T: Clone>(items: &[T], page: usize, hits_per_page: usize) -> (Vec<T>, usize) {
    let hits_per_page = hits_per_page.max(1);
    let nb_pages = items.len().div_ceil(hits_per_page);
    let hits = items
        .iter()
        .skip(page.saturating_mul(hits_per_page))
        .take(hits_per_page)
        .cloned()
        .collect();
    (hits, nb_pages)
}

fn apply_batch(
    records: &mut BTreeMap<String, Record>,
    batch: &BatchRequest,
) -> Result<Vec<String>> {
    let mut object_ids = Vec::with_capacity(batch.len());
    for op in batch.operations() {
        match op.action {
            BatchAction::AddObject | BatchAction::UpdateObject => {
                let mut record = op.body.clone();
                let id = match record.object_id() {
                    Ok(id) => id.to_string(),
                    Err(_) => {
                        let id = uuid::Uuid::new_v4().to_string();
                        record.insert(OBJECT_ID, id.clone());
                        id
                    }
                };
                records.insert(id.clone(), record);
                object_ids.push(id);
            }
            BatchAction::PartialUpdateObject | BatchAction::PartialUpdateObjectNoCreate => {
                let id = op.body.object_id()?.to_string();
                let existing = records.get(&id).cloned();
                let mut record = match existing {
                    Some(record) => record,
                    None if op.action == BatchAction::PartialUpdateObject => {
                        Record::new().with_object_id(id.clone())
                    }
                    None => continue,
                };
                apply_partial_update(&mut record, &op.body)
                    .map_err(|e| SearchError::api(400, e.to_string()))?;
                records.insert(id.clone(), record);
                object_ids.push(id);
            }
            BatchAction::DeleteObject => {
                let id = op.body.object_id()?.to_string();
                records.remove(&id);
                object_ids.push(id);
            }
            BatchAction::Delete | BatchAction::Clear => records.clear(),
        }
    }
    Ok(object_ids)
}

#[async_trait]
impl SearchApi for InMemorySearchApi {
    async fn list_indices(&self) -> Result<Vec<IndexInfo>> {
        let state = self.state.lock().await;
        Ok(state
            .indices
            .iter()
            .map(|(name, data)| IndexInfo {
                name: name.clone(),
                created_at: data.created_at.clone(),
                updated_at: data.updated_at.clone(),
                entries: data.records.len() as i64,
                ..Default::default()
            })
            .collect())
    }

    async fn delete_index(&self, index: &str) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state.indices.remove(index);
        let mut receipt = self.receipt(&mut state);
        receipt.deleted_at = Some(timestamp());
        Ok(receipt)
    }

    async fn clear_index(&self, index: &str) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state.index_or_create(index).records.clear();
        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn operation_index(
        &self,
        index: &str,
        operation: &IndexOperation,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        let source = state.index(index)?.clone();

        let target = if operation.includes_records() {
            IndexData {
                updated_at: timestamp(),
                ..source
            }
        } else {
            let mut target = state
                .indices
                .remove(&operation.destination)
                .unwrap_or_else(IndexData::new);
            if operation.includes(CopyScope::Settings) {
                target.settings = source.settings;
            }
            if operation.includes(CopyScope::Synonyms) {
                target.synonyms = source.synonyms;
            }
            if operation.includes(CopyScope::Rules) {
                target.rules = source.rules;
            }
            target.updated_at = timestamp();
            target
        };
        state.indices.insert(operation.destination.clone(), target);
        if operation.operation == OperationKind::Move {
            state.indices.remove(index);
        }
        debug!(
            source = %index,
            destination = %operation.destination,
            "Index operation applied"
        );

        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn add_object(&self, index: &str, record: &Record) -> Result<TaskReceipt> {
        let batch = BatchRequest::new(vec![crate::domain::BatchOperation::add(record.clone())])?;
        let mut state = self.state.lock().await;
        let ids = apply_batch(&mut state.index_or_create(index).records, &batch)?;
        let mut receipt = self.receipt(&mut state);
        receipt.object_id = ids.into_iter().next();
        receipt.created_at = Some(timestamp());
        Ok(receipt)
    }

    async fn get_object(
        &self,
        index: &str,
        object_id: &str,
        attributes: &[String],
    ) -> Result<Record> {
        let state = self.state.lock().await;
        let record = state
            .index(index)?
            .records
            .get(object_id)
            .ok_or_else(|| SearchError::not_found("ObjectID does not exist"))?;
        if attributes.is_empty() {
            return Ok(record.clone());
        }
        Ok(record
            .attributes()
            .filter(|(name, _)| *name == OBJECT_ID || attributes.contains(*name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }

    async fn get_objects(&self, index: &str, object_ids: &[String]) -> Result<Vec<Record>> {
        let state = self.state.lock().await;
        let data = state.index(index)?;
        Ok(object_ids
            .iter()
            .filter_map(|id| data.records.get(id).cloned())
            .collect())
    }

    async fn batch(&self, index: &str, batch: &BatchRequest) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        let data = state.index_or_create(index);
        // All-or-nothing: work on a copy and commit only on success
        let mut records = data.records.clone();
        let object_ids = apply_batch(&mut records, batch)?;
        data.records = records;

        let mut receipt = self.receipt(&mut state);
        receipt.object_ids = object_ids;
        Ok(receipt)
    }

    async fn search(&self, index: &str, query: &str, params: &SearchParams) -> Result<SearchResult> {
        let state = self.state.lock().await;
        let data = state.index(index)?;
        let needle = query.to_lowercase();
        let matching: Vec<Record> = data
            .records
            .values()
            .filter(|record| {
                needle.is_empty()
                    || record
                        .attributes()
                        .any(|(name, value)| name != OBJECT_ID && value_contains(value, &needle))
            })
            .cloned()
            .collect();

        let page = param_usize(params, "page", 0);
        let hits_per_page = param_usize(params, "hitsPerPage", DEFAULT_HITS_PER_PAGE);
        let (hits, nb_pages) = paginate(&matching, page, hits_per_page);
        Ok(SearchResult {
            hits,
            nb_hits: matching.len(),
            page,
            nb_pages,
            hits_per_page,
            query: query.to_string(),
            ..Default::default()
        })
    }

    async fn search_for_facet_values(
        &self,
        index: &str,
        facet: &str,
        query: &str,
        params: &SearchParams,
    ) -> Result<FacetSearchResult> {
        let state = self.state.lock().await;
        let data = state.index(index)?;
        if !is_searchable_facet(&data.settings, facet) {
            return Err(SearchError::api(
                400,
                format!(
                    "Cannot search in `{facet}` attribute, you need to add `searchable({facet})` to attributesForFaceting."
                ),
            ));
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in data.records.values() {
            if let Some(value) = record.get(facet) {
                for facet_value in facet_values(value) {
                    *counts.entry(facet_value).or_default() += 1;
                }
            }
        }

        let mut facet_hits: Vec<FacetHit> = counts
            .into_iter()
            .filter_map(|(value, count)| {
                highlight_prefix(value, query).map(|highlighted| FacetHit {
                    value: value.to_string(),
                    highlighted,
                    count,
                })
            })
            .collect();
        facet_hits.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        facet_hits.truncate(param_usize(params, "maxFacetHits", DEFAULT_MAX_FACET_HITS));

        Ok(FacetSearchResult {
            facet_hits,
            processing_time_ms: 0,
        })
    }

    async fn browse(
        &self,
        index: &str,
        cursor: Option<String>,
        params: &SearchParams,
    ) -> Result<BrowsePage> {
        let state = self.state.lock().await;
        let data = state.index(index)?;
        let offset = match cursor.as_deref() {
            None => 0,
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| SearchError::api(400, format!("Invalid cursor: {cursor}")))?,
        };
        let page_size = param_usize(params, "hitsPerPage", DEFAULT_BROWSE_PAGE_SIZE).max(1);
        let total = data.records.len();

        let hits: Vec<Record> = data
            .records
            .values()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();
        let next = offset + page_size;
        Ok(BrowsePage {
            hits,
            cursor: (next < total).then(|| next.to_string()),
            nb_hits: total,
            page: offset / page_size,
            nb_pages: total.div_ceil(page_size),
        })
    }

    async fn get_settings(&self, index: &str) -> Result<Settings> {
        let state = self.state.lock().await;
        Ok(state.index(index)?.settings.clone())
    }

    async fn set_settings(
        &self,
        index: &str,
        settings: &Map<String, Value>,
        _forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        let data = state.index_or_create(index);
        let mut merged = data.settings.to_map();
        merged.extend(settings.iter().map(|(k, v)| (k.clone(), v.clone())));
        data.settings =
            Settings::from_map(merged).map_err(|e| SearchError::api(400, e.to_string()))?;

        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn get_task_status(&self, _index: &str, task_id: TaskId) -> Result<TaskStatus> {
        let mut state = self.state.lock().await;
        state.status_checks += 1;
        if task_id <= 0 || task_id > state.next_task_id {
            return Err(SearchError::not_found(format!("Task {task_id} does not exist")));
        }
        match state.tasks.get_mut(&task_id) {
            None => Ok(TaskStatus::Published),
            Some(remaining) if *remaining <= 1 => {
                state.tasks.remove(&task_id);
                Ok(TaskStatus::NotPublished)
            }
            Some(remaining) => {
                *remaining -= 1;
                Ok(TaskStatus::NotPublished)
            }
        }
    }

    async fn get_rule(&self, index: &str, object_id: &str) -> Result<Rule> {
        let state = self.state.lock().await;
        state
            .index(index)?
            .rules
            .get(object_id)
            .cloned()
            .ok_or_else(|| SearchError::not_found("ObjectID does not exist"))
    }

    async fn save_rule(
        &self,
        index: &str,
        rule: &Rule,
        _forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state
            .index_or_create(index)
            .rules
            .insert(rule.object_id.clone(), rule.clone());
        let mut receipt = self.receipt(&mut state);
        receipt.object_id = Some(rule.object_id.clone());
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn batch_rules(
        &self,
        index: &str,
        rules: &[Rule],
        _forward_to_replicas: bool,
        clear_existing_rules: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        let data = state.index_or_create(index);
        if clear_existing_rules {
            data.rules.clear();
        }
        data.rules
            .extend(rules.iter().map(|rule| (rule.object_id.clone(), rule.clone())));
        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn delete_rule(
        &self,
        index: &str,
        object_id: &str,
        _forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state
            .index_mut(index)?
            .rules
            .remove(object_id)
            .ok_or_else(|| SearchError::not_found("ObjectID does not exist"))?;
        let mut receipt = self.receipt(&mut state);
        receipt.deleted_at = Some(timestamp());
        Ok(receipt)
    }

    async fn search_rules(&self, index: &str, params: &SearchParams) -> Result<RuleSearchResult> {
        let state = self.state.lock().await;
        let data = state.index(index)?;
        let needle = param_str(params, "query").to_lowercase();
        let matching: Vec<Rule> = data
            .rules
            .values()
            .filter(|rule| {
                rule.object_id.to_lowercase().contains(&needle)
                    || rule.condition.pattern.to_lowercase().contains(&needle)
                    || rule.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        let page = param_usize(params, "page", 0);
        let hits_per_page = param_usize(params, "hitsPerPage", DEFAULT_HITS_PER_PAGE);
        let (hits, nb_pages) = paginate(&matching, page, hits_per_page);
        Ok(RuleSearchResult {
            hits,
            nb_hits: matching.len(),
            page,
            nb_pages,
        })
    }

    async fn clear_rules(&self, index: &str, _forward_to_replicas: bool) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state.index_or_create(index).rules.clear();
        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn get_synonym(&self, index: &str, object_id: &str) -> Result<Synonym> {
        let state = self.state.lock().await;
        state
            .index(index)?
            .synonyms
            .get(object_id)
            .cloned()
            .ok_or_else(|| SearchError::not_found("Synonym set does not exist"))
    }

    async fn save_synonym(
        &self,
        index: &str,
        synonym: &Synonym,
        _forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state
            .index_or_create(index)
            .synonyms
            .insert(synonym.object_id().to_string(), synonym.clone());
        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn batch_synonyms(
        &self,
        index: &str,
        synonyms: &[Synonym],
        _forward_to_replicas: bool,
        replace_existing_synonyms: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        let data = state.index_or_create(index);
        if replace_existing_synonyms {
            data.synonyms.clear();
        }
        data.synonyms.extend(
            synonyms
                .iter()
                .map(|synonym| (synonym.object_id().to_string(), synonym.clone())),
        );
        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn delete_synonym(
        &self,
        index: &str,
        object_id: &str,
        _forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state
            .index_mut(index)?
            .synonyms
            .remove(object_id)
            .ok_or_else(|| SearchError::not_found("Synonym set does not exist"))?;
        let mut receipt = self.receipt(&mut state);
        receipt.deleted_at = Some(timestamp());
        Ok(receipt)
    }

    async fn search_synonyms(
        &self,
        index: &str,
        query: &str,
        types: &[String],
        page: usize,
        hits_per_page: usize,
    ) -> Result<SynonymSearchResult> {
        let state = self.state.lock().await;
        let data = state.index(index)?;
        let needle = query.to_lowercase();
        let matching: Vec<Synonym> = data
            .synonyms
            .values()
            .filter(|synonym| {
                types.is_empty()
                    || types.iter().any(|t| t.eq_ignore_ascii_case(synonym.type_name()))
            })
            .filter(|synonym| {
                synonym.object_id().to_lowercase().contains(&needle)
                    || synonym
                        .terms()
                        .iter()
                        .any(|term| term.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        let (hits, _) = paginate(&matching, page, hits_per_page);
        Ok(SynonymSearchResult {
            hits,
            nb_hits: matching.len(),
        })
    }

    async fn clear_synonyms(&self, index: &str, _forward_to_replicas: bool) -> Result<TaskReceipt> {
        let mut state = self.state.lock().await;
        state.index_or_create(index).synonyms.clear();
        let mut receipt = self.receipt(&mut state);
        receipt.updated_at = Some(timestamp());
        Ok(receipt)
    }

    async fn list_keys(&self) -> Result<Vec<ApiKey>> {
        let state = self.state.lock().await;
        Ok(state
            .keys
            .values()
            .filter(|key| !state.hidden_keys.contains_key(&key.value))
            .cloned()
            .collect())
    }

    async fn get_key(&self, key: &str) -> Result<ApiKey> {
        let mut state = self.state.lock().await;
        match state.hidden_keys.get(key).copied() {
            Some(0) => {
                state.hidden_keys.remove(key);
            }
            Some(remaining) => {
                state.hidden_keys.insert(key.to_string(), remaining - 1);
                return Err(SearchError::not_found("Key does not exist"));
            }
            None => {}
        }
        state
            .keys
            .get(key)
            .cloned()
            .ok_or_else(|| SearchError::not_found("Key does not exist"))
    }

    async fn add_key(&self, params: &KeyParams) -> Result<AddKeyRes> {
        let mut state = self.state.lock().await;
        let value = uuid::Uuid::new_v4().simple().to_string();
        let mut key = ApiKey {
            value: value.clone(),
            created_at: Some(Utc::now().timestamp()),
            ..Default::default()
        };
        params.apply_to(&mut key);
        state.keys.insert(value.clone(), key);
        if self.key_visibility_delay > 0 {
            state
                .hidden_keys
                .insert(value.clone(), self.key_visibility_delay);
        }
        Ok(AddKeyRes {
            key: value,
            created_at: timestamp(),
        })
    }

    async fn update_key(&self, key: &str, params: &KeyParams) -> Result<UpdateKeyRes> {
        let mut state = self.state.lock().await;
        let existing = state
            .keys
            .get_mut(key)
            .ok_or_else(|| SearchError::not_found("Key does not exist"))?;
        params.apply_to(existing);
        Ok(UpdateKeyRes {
            key: key.to_string(),
            updated_at: timestamp(),
        })
    }

    async fn delete_key(&self, key: &str) -> Result<DeleteKeyRes> {
        let mut state = self.state.lock().await;
        state
            .keys
            .remove(key)
            .ok_or_else(|| SearchError::not_found("Key does not exist"))?;
        state.hidden_keys.remove(key);
        Ok(DeleteKeyRes {
            deleted_at: timestamp(),
        })
    }
}
