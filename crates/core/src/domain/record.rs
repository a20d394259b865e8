// Record Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Object identifier (`objectID` on the wire)
pub type ObjectId = String;

/// Wire name of the identifier attribute
pub const OBJECT_ID: &str = "objectID";

/// A single indexed document: attribute name -> dynamic value.
///
/// Attribute order carries no meaning. A record sent without `objectID`
/// gets one assigned by the service on insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(attribute.into(), value.into());
        self
    }

    pub fn with_object_id(self, object_id: impl Into<String>) -> Self {
        self.with(OBJECT_ID, object_id.into())
    }

    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(attribute.into(), value.into())
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.0.remove(attribute)
    }

    /// The record's identifier.
    ///
    /// Fails when `objectID` is missing, not a string, or empty.
    pub fn object_id(&self) -> Result<&str> {
        match self.0.get(OBJECT_ID) {
            Some(Value::String(id)) if !id.is_empty() => Ok(id),
            _ => Err(DomainError::RecordWithoutObjectId),
        }
    }

    pub fn has_object_id(&self) -> bool {
        self.object_id().is_ok()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::unexpected_shape("record", &other)),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_id_present() {
        let record = Record::new().with_object_id("one").with("company", "apple");
        assert_eq!(record.object_id().unwrap(), "one");
        assert!(record.has_object_id());
    }

    #[test]
    fn test_object_id_missing_or_invalid() {
        assert!(Record::new().with("key", "value").object_id().is_err());
        assert!(Record::new().with(OBJECT_ID, "").object_id().is_err());
        assert!(Record::new().with(OBJECT_ID, 42).object_id().is_err());
    }

    #[test]
    fn test_try_from_value_rejects_non_objects() {
        assert!(Record::try_from(json!({"a": 1})).is_ok());
        let err = Record::try_from(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("array"));
    }
}
