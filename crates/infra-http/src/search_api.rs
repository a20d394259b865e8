// REST SearchApi Implementation
//
// One request per port call. No retry and no host failover: transport
// failures surface as `SearchError::Transport`.

use crate::connection::{api_error, create_client, endpoint, map_reqwest_error, HttpSettings};
use async_trait::async_trait;
use hosted_search_core::domain::{
    AddKeyRes, ApiKey, BatchRequest, BrowsePage, DeleteKeyRes, FacetSearchResult, IndexInfo,
    IndexOperation, KeyParams, ListIndicesRes, Record, Rule, RuleSearchResult, SearchParams,
    SearchResult, Settings, Synonym, SynonymSearchResult, TaskId, TaskReceipt, TaskStatus,
    TaskStatusRes, UpdateKeyRes, OBJECT_ID,
};
use hosted_search_core::error::Result;
use hosted_search_core::port::SearchApi;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Copy)]
enum Host {
    Read,
    Write,
}

#[derive(Deserialize)]
struct ListKeysRes {
    keys: Vec<ApiKey>,
}

#[derive(Deserialize)]
struct GetObjectsRes {
    results: Vec<Option<Record>>,
}

/// `SearchApi` over the hosted REST interface
pub struct HttpSearchApi {
    client: Client,
    settings: HttpSettings,
}

impl HttpSearchApi {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        let client = create_client(&settings)?;
        Ok(Self { client, settings })
    }

    fn host(&self, host: Host) -> (&Url, Duration) {
        match host {
            Host::Read => (&self.settings.read_host, self.settings.read_timeout),
            Host::Write => (&self.settings.write_host, self.settings.write_timeout),
        }
    }

    async fn request<B, T>(
        &self,
        method: Method,
        host: Host,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (base, timeout) = self.host(host);
        let url = endpoint(base, segments, query)?;
        debug!(method = %method, path = %url.path(), "Sending request");

        let mut request = self.client.request(method, url).timeout(timeout);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            debug!(status = %status.as_u16(), "Request failed");
            return Err(api_error(status, &bytes));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        host: Host,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        self.request::<Value, T>(Method::GET, host, segments, query, None)
            .await
    }

    async fn send<B, T>(&self, method: Method, host: Host, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, host, segments, &[], Some(body)).await
    }
}

fn forward(forward_to_replicas: bool) -> (&'static str, String) {
    ("forwardToReplicas", forward_to_replicas.to_string())
}

/// `params` plus one extra parameter, as a JSON body
fn params_with(params: &SearchParams, name: &str, value: impl Into<Value>) -> Map<String, Value> {
    let mut body = params.clone();
    body.insert(name.to_string(), value.into());
    body
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn list_indices(&self) -> Result<Vec<IndexInfo>> {
        let res: ListIndicesRes = self.get(Host::Read, &["1", "indexes"], &[]).await?;
        Ok(res.items)
    }

    async fn delete_index(&self, index: &str) -> Result<TaskReceipt> {
        self.request::<Value, _>(Method::DELETE, Host::Write, &["1", "indexes", index], &[], None)
            .await
    }

    async fn clear_index(&self, index: &str) -> Result<TaskReceipt> {
        self.send(Method::POST, Host::Write, &["1", "indexes", index, "clear"], &json!({}))
            .await
    }

    async fn operation_index(
        &self,
        index: &str,
        operation: &IndexOperation,
    ) -> Result<TaskReceipt> {
        self.send(Method::POST, Host::Write, &["1", "indexes", index, "operation"], operation)
            .await
    }

    async fn add_object(&self, index: &str, record: &Record) -> Result<TaskReceipt> {
        self.send(Method::POST, Host::Write, &["1", "indexes", index], record)
            .await
    }

    async fn get_object(
        &self,
        index: &str,
        object_id: &str,
        attributes: &[String],
    ) -> Result<Record> {
        let query = if attributes.is_empty() {
            Vec::new()
        } else {
            vec![("attributes", attributes.join(","))]
        };
        self.get(Host::Read, &["1", "indexes", index, object_id], &query)
            .await
    }

    async fn get_objects(&self, index: &str, object_ids: &[String]) -> Result<Vec<Record>> {
        let requests: Vec<Value> = object_ids
            .iter()
            .map(|id| json!({"indexName": index, OBJECT_ID: id}))
            .collect();
        let res: GetObjectsRes = self
            .send(
                Method::POST,
                Host::Read,
                &["1", "indexes", "*", "objects"],
                &json!({ "requests": requests }),
            )
            .await?;
        Ok(res.results.into_iter().flatten().collect())
    }

    async fn batch(&self, index: &str, batch: &BatchRequest) -> Result<TaskReceipt> {
        self.send(Method::POST, Host::Write, &["1", "indexes", index, "batch"], batch)
            .await
    }

    async fn search(&self, index: &str, query: &str, params: &SearchParams) -> Result<SearchResult> {
        let body = params_with(params, "query", query);
        self.send(Method::POST, Host::Read, &["1", "indexes", index, "query"], &body)
            .await
    }

    async fn search_for_facet_values(
        &self,
        index: &str,
        facet: &str,
        query: &str,
        params: &SearchParams,
    ) -> Result<FacetSearchResult> {
        let body = params_with(params, "facetQuery", query);
        self.send(
            Method::POST,
            Host::Read,
            &["1", "indexes", index, "facets", facet, "query"],
            &body,
        )
        .await
    }

    async fn browse(
        &self,
        index: &str,
        cursor: Option<String>,
        params: &SearchParams,
    ) -> Result<BrowsePage> {
        let body = match cursor {
            Some(cursor) => params_with(params, "cursor", cursor),
            None => params.clone(),
        };
        self.send(Method::POST, Host::Read, &["1", "indexes", index, "browse"], &body)
            .await
    }

    async fn get_settings(&self, index: &str) -> Result<Settings> {
        self.get(
            Host::Read,
            &["1", "indexes", index, "settings"],
            &[("getVersion", "2".to_string())],
        )
        .await
    }

    async fn set_settings(
        &self,
        index: &str,
        settings: &Map<String, Value>,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.request(
            Method::PUT,
            Host::Write,
            &["1", "indexes", index, "settings"],
            &[forward(forward_to_replicas)],
            Some(settings),
        )
        .await
    }

    async fn get_task_status(&self, index: &str, task_id: TaskId) -> Result<TaskStatus> {
        let task_id = task_id.to_string();
        let res: TaskStatusRes = self
            .get(Host::Read, &["1", "indexes", index, "task", &task_id], &[])
            .await?;
        Ok(res.status)
    }

    async fn get_rule(&self, index: &str, object_id: &str) -> Result<Rule> {
        self.get(Host::Read, &["1", "indexes", index, "rules", object_id], &[])
            .await
    }

    async fn save_rule(
        &self,
        index: &str,
        rule: &Rule,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.request(
            Method::PUT,
            Host::Write,
            &["1", "indexes", index, "rules", &rule.object_id],
            &[forward(forward_to_replicas)],
            Some(rule),
        )
        .await
    }

    async fn batch_rules(
        &self,
        index: &str,
        rules: &[Rule],
        forward_to_replicas: bool,
        clear_existing_rules: bool,
    ) -> Result<TaskReceipt> {
        self.request(
            Method::POST,
            Host::Write,
            &["1", "indexes", index, "rules", "batch"],
            &[
                forward(forward_to_replicas),
                ("clearExistingRules", clear_existing_rules.to_string()),
            ],
            Some(rules),
        )
        .await
    }

    async fn delete_rule(
        &self,
        index: &str,
        object_id: &str,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.request::<Value, _>(
            Method::DELETE,
            Host::Write,
            &["1", "indexes", index, "rules", object_id],
            &[forward(forward_to_replicas)],
            None,
        )
        .await
    }

    async fn search_rules(&self, index: &str, params: &SearchParams) -> Result<RuleSearchResult> {
        self.send(Method::POST, Host::Read, &["1", "indexes", index, "rules", "search"], params)
            .await
    }

    async fn clear_rules(&self, index: &str, forward_to_replicas: bool) -> Result<TaskReceipt> {
        self.request(
            Method::POST,
            Host::Write,
            &["1", "indexes", index, "rules", "clear"],
            &[forward(forward_to_replicas)],
            Some(&json!({})),
        )
        .await
    }

    async fn get_synonym(&self, index: &str, object_id: &str) -> Result<Synonym> {
        self.get(Host::Read, &["1", "indexes", index, "synonyms", object_id], &[])
            .await
    }

    async fn save_synonym(
        &self,
        index: &str,
        synonym: &Synonym,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.request(
            Method::PUT,
            Host::Write,
            &["1", "indexes", index, "synonyms", synonym.object_id()],
            &[forward(forward_to_replicas)],
            Some(synonym),
        )
        .await
    }

    async fn batch_synonyms(
        &self,
        index: &str,
        synonyms: &[Synonym],
        forward_to_replicas: bool,
        replace_existing_synonyms: bool,
    ) -> Result<TaskReceipt> {
        self.request(
            Method::POST,
            Host::Write,
            &["1", "indexes", index, "synonyms", "batch"],
            &[
                forward(forward_to_replicas),
                ("replaceExistingSynonyms", replace_existing_synonyms.to_string()),
            ],
            Some(synonyms),
        )
        .await
    }

    async fn delete_synonym(
        &self,
        index: &str,
        object_id: &str,
        forward_to_replicas: bool,
    ) -> Result<TaskReceipt> {
        self.request::<Value, _>(
            Method::DELETE,
            Host::Write,
            &["1", "indexes", index, "synonyms", object_id],
            &[forward(forward_to_replicas)],
            None,
        )
        .await
    }

    async fn search_synonyms(
        &self,
        index: &str,
        query: &str,
        types: &[String],
        page: usize,
        hits_per_page: usize,
    ) -> Result<SynonymSearchResult> {
        let mut body = json!({
            "query": query,
            "page": page,
            "hitsPerPage": hits_per_page,
        });
        if !types.is_empty() {
            body["type"] = Value::String(types.join(","));
        }
        self.send(
            Method::POST,
            Host::Read,
            &["1", "indexes", index, "synonyms", "search"],
            &body,
        )
        .await
    }

    async fn clear_synonyms(&self, index: &str, forward_to_replicas: bool) -> Result<TaskReceipt> {
        self.request(
            Method::POST,
            Host::Write,
            &["1", "indexes", index, "synonyms", "clear"],
            &[forward(forward_to_replicas)],
            Some(&json!({})),
        )
        .await
    }

    async fn list_keys(&self) -> Result<Vec<ApiKey>> {
        let res: ListKeysRes = self.get(Host::Read, &["1", "keys"], &[]).await?;
        Ok(res.keys)
    }

    async fn get_key(&self, key: &str) -> Result<ApiKey> {
        self.get(Host::Read, &["1", "keys", key], &[]).await
    }

    async fn add_key(&self, params: &KeyParams) -> Result<AddKeyRes> {
        self.send(Method::POST, Host::Write, &["1", "keys"], params)
            .await
    }

    async fn update_key(&self, key: &str, params: &KeyParams) -> Result<UpdateKeyRes> {
        self.send(Method::PUT, Host::Write, &["1", "keys", key], params)
            .await
    }

    async fn delete_key(&self, key: &str) -> Result<DeleteKeyRes> {
        self.request::<Value, _>(Method::DELETE, Host::Write, &["1", "keys", key], &[], None)
            .await
    }
}
