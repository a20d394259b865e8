//! Polymorphic settings values
//!
//! A few settings accept more than one wire shape depending on how the index
//! was configured and which server version answers. Each one is modelled as a
//! tagged union decoded through a strict match: the documented shapes map to a
//! variant, anything else is a `DomainError::UnexpectedShape` naming the field.

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// `removeStopWords`: `true`/`false` for every language, or a list of language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveStopWords {
    Enabled(bool),
    Languages(Vec<String>),
}

impl RemoveStopWords {
    pub const FIELD: &'static str = "removeStopWords";

    /// Decode a dynamic wire value.
    ///
    /// Lists arrive as generic element lists; every element must be a string.
    pub fn decode(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(enabled) => Ok(Self::Enabled(*enabled)),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(language) => Ok(language.clone()),
                    other => Err(DomainError::unexpected_shape(Self::FIELD, other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Languages),
            other => Err(DomainError::unexpected_shape(Self::FIELD, other)),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Enabled(enabled) => Value::Bool(*enabled),
            Self::Languages(languages) => {
                Value::Array(languages.iter().cloned().map(Value::String).collect())
            }
        }
    }

    /// Booleans compare to booleans, language lists compare as sets.
    pub fn semantically_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Enabled(a), Self::Enabled(b)) => a == b,
            (Self::Languages(a), Self::Languages(b)) => same_elements(a, b),
            _ => false,
        }
    }
}

/// `distinct`: on/off, or the number of hits kept per distinct group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distinct {
    Enabled(bool),
    Count(i64),
}

impl Distinct {
    pub const FIELD: &'static str = "distinct";

    /// Decode a dynamic wire value.
    ///
    /// Numbers may come back float-encoded and are truncated.
    pub fn decode(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(enabled) => Ok(Self::Enabled(*enabled)),
            Value::Number(n) => {
                let count = match n.as_i64() {
                    Some(count) => count,
                    None => n
                        .as_f64()
                        .map(|f| f.trunc() as i64)
                        .ok_or_else(|| DomainError::unexpected_shape(Self::FIELD, value))?,
                };
                Ok(Self::Count(count))
            }
            other => Err(DomainError::unexpected_shape(Self::FIELD, other)),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Enabled(enabled) => Value::Bool(*enabled),
            Self::Count(count) => Value::from(*count),
        }
    }

    /// Hits kept per group: `false` is 0, `true` is 1.
    pub fn as_count(&self) -> i64 {
        match self {
            Self::Enabled(enabled) => i64::from(*enabled),
            Self::Count(count) => *count,
        }
    }

    /// The server may echo a boolean back integer-encoded, so compare by count.
    pub fn semantically_eq(&self, other: &Self) -> bool {
        self.as_count() == other.as_count()
    }
}

/// Order-independent comparison of two string lists.
pub fn same_elements(a: &[String], b: &[String]) -> bool {
    a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
}

macro_rules! impl_wire_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                self.to_value().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let value = Value::deserialize(deserializer)?;
                <$ty>::decode(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_wire_serde!(RemoveStopWords);
impl_wire_serde!(Distinct);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remove_stop_words_decodes_both_shapes() {
        assert_eq!(
            RemoveStopWords::decode(&json!(true)).unwrap(),
            RemoveStopWords::Enabled(true)
        );
        assert_eq!(
            RemoveStopWords::decode(&json!(["en", "fr"])).unwrap(),
            RemoveStopWords::Languages(vec!["en".to_string(), "fr".to_string()])
        );
    }

    #[test]
    fn test_remove_stop_words_rejects_other_shapes() {
        let err = RemoveStopWords::decode(&json!("en")).unwrap_err();
        assert!(err.to_string().contains("removeStopWords"));

        // A list is only valid when every element is a string
        let err = RemoveStopWords::decode(&json!(["en", 3])).unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_distinct_truncates_float_encoded_numbers() {
        assert_eq!(Distinct::decode(&json!(2.0)).unwrap(), Distinct::Count(2));
        assert_eq!(Distinct::decode(&json!(3.9)).unwrap(), Distinct::Count(3));
        assert_eq!(Distinct::decode(&json!(4)).unwrap(), Distinct::Count(4));
        assert_eq!(Distinct::decode(&json!(false)).unwrap(), Distinct::Enabled(false));
    }

    #[test]
    fn test_distinct_rejects_other_shapes() {
        for value in [json!("1"), json!(null), json!([1]), json!({"count": 1})] {
            let err = Distinct::decode(&value).unwrap_err();
            assert!(
                matches!(err, DomainError::UnexpectedShape { ref field, .. } if field == "distinct"),
                "unexpected error for {value}: {err}"
            );
        }
    }

    #[test]
    fn test_semantic_equality() {
        assert!(Distinct::Enabled(true).semantically_eq(&Distinct::Count(1)));
        assert!(Distinct::Enabled(false).semantically_eq(&Distinct::Count(0)));
        assert!(!Distinct::Enabled(true).semantically_eq(&Distinct::Count(2)));

        let a = RemoveStopWords::Languages(vec!["fr".into(), "en".into()]);
        let b = RemoveStopWords::Languages(vec!["en".into(), "fr".into()]);
        assert!(a.semantically_eq(&b));
        assert!(!a.semantically_eq(&RemoveStopWords::Enabled(true)));
    }

    #[test]
    fn test_serde_goes_through_decoder() {
        let distinct: Distinct = serde_json::from_value(json!(1.0)).unwrap();
        assert_eq!(distinct, Distinct::Count(1));
        assert_eq!(serde_json::to_value(Distinct::Enabled(true)).unwrap(), json!(true));

        let err = serde_json::from_value::<RemoveStopWords>(json!(12)).unwrap_err();
        assert!(err.to_string().contains("removeStopWords"));
    }
}
