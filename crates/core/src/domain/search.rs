// Search, Facet Search and Browse Domain Model

use crate::domain::error::{DomainError, Result};
use crate::domain::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form query parameters
pub type SearchParams = Map<String, Value>;

/// Geo parameters that accept either a string or a list of coordinate lists
const GEO_PARAMS: [&str; 2] = ["insideBoundingBox", "insidePolygon"];
const GEO_EXPECTED: &str = "string or array of number arrays";

/// Check parameters whose type the service would reject.
///
/// Runs before any request is sent.
pub fn validate_search_params(params: &SearchParams) -> Result<()> {
    for name in GEO_PARAMS {
        let Some(value) = params.get(name) else {
            continue;
        };
        let valid = match value {
            Value::String(_) => true,
            Value::Array(rows) => rows.iter().all(|row| {
                row.as_array()
                    .is_some_and(|coords| coords.iter().all(Value::is_number))
            }),
            _ => false,
        };
        if !valid {
            return Err(DomainError::invalid_type(name, GEO_EXPECTED));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub hits: Vec<Record>,
    pub nb_hits: usize,
    pub page: usize,
    pub nb_pages: usize,
    pub hits_per_page: usize,
    #[serde(rename = "processingTimeMS")]
    pub processing_time_ms: u64,
    pub query: String,
    pub params: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetHit {
    pub value: String,
    pub highlighted: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacetSearchResult {
    pub facet_hits: Vec<FacetHit>,
    #[serde(rename = "processingTimeMS")]
    pub processing_time_ms: u64,
}

/// One page of a browse; `cursor` is absent on the last page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowsePage {
    pub hits: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    pub nb_hits: usize,
    pub page: usize,
    pub nb_pages: usize,
}
