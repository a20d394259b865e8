// API Key Domain Model
//
// Keys are fully server-owned and only eventually visible after creation.

use serde::{Deserialize, Serialize};

/// An API key as reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKey {
    pub value: String,
    pub acl: Vec<String>,
    pub description: String,
    pub indexes: Vec<String>,
    pub max_hits_per_query: i64,
    #[serde(rename = "maxQueriesPerIPPerHour")]
    pub max_queries_per_ip_per_hour: i64,
    pub query_parameters: String,
    pub referers: Vec<String>,
    pub validity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Parameters for creating or updating a key. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyParams {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub acl: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hits_per_query: Option<i64>,
    #[serde(
        rename = "maxQueriesPerIPPerHour",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_queries_per_ip_per_hour: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<i64>,
}

impl KeyParams {
    pub fn new(acl: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            acl: acl.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<String>) -> Self {
        self.indexes = Some(indexes);
        self
    }

    pub fn with_max_hits_per_query(mut self, max: i64) -> Self {
        self.max_hits_per_query = Some(max);
        self
    }

    pub fn with_max_queries_per_ip_per_hour(mut self, max: i64) -> Self {
        self.max_queries_per_ip_per_hour = Some(max);
        self
    }

    pub fn with_query_parameters(mut self, params: impl Into<String>) -> Self {
        self.query_parameters = Some(params.into());
        self
    }

    pub fn with_referers(mut self, referers: Vec<String>) -> Self {
        self.referers = Some(referers);
        self
    }

    /// Lifetime of the key in seconds
    pub fn with_validity(mut self, seconds: i64) -> Self {
        self.validity = Some(seconds);
        self
    }

    /// Overwrite the fields of `key` that these parameters set.
    pub fn apply_to(&self, key: &mut ApiKey) {
        if !self.acl.is_empty() {
            key.acl = self.acl.clone();
        }
        if let Some(description) = &self.description {
            key.description = description.clone();
        }
        if let Some(indexes) = &self.indexes {
            key.indexes = indexes.clone();
        }
        if let Some(max) = self.max_hits_per_query {
            key.max_hits_per_query = max;
        }
        if let Some(max) = self.max_queries_per_ip_per_hour {
            key.max_queries_per_ip_per_hour = max;
        }
        if let Some(params) = &self.query_parameters {
            key.query_parameters = params.clone();
        }
        if let Some(referers) = &self.referers {
            key.referers = referers.clone();
        }
        if let Some(validity) = self.validity {
            key.validity = validity;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddKeyRes {
    pub key: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKeyRes {
    pub key: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKeyRes {
    pub deleted_at: String,
}
