// Query Rule Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a rule pattern must match the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchoring {
    Is,
    StartsWith,
    EndsWith,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub pattern: String,
    pub anchoring: Anchoring,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl RuleCondition {
    pub fn new(anchoring: Anchoring, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            anchoring,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenObject {
    #[serde(rename = "objectID")]
    pub object_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotedObject {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub position: u32,
}

/// Parameter overrides and record placement applied when a rule fires
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConsequence {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub promote: Vec<PromotedObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide: Vec<HiddenObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Value>,
}

/// Window during which a rule is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub from: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub until: DateTime<Utc>,
}

/// Facet filter derived automatically from a `{facet:...}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticFacetFilter {
    pub facet: String,
    #[serde(default)]
    pub disjunctive: bool,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditType {
    Remove,
    Replace,
}

/// Query rewrite applied by a rule consequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    #[serde(rename = "type")]
    pub edit_type: EditType,
    pub delete: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<String>,
}

impl Edit {
    pub fn remove(word: impl Into<String>) -> Self {
        Self {
            edit_type: EditType::Remove,
            delete: word.into(),
            insert: None,
        }
    }

    pub fn replace(word: impl Into<String>, with: impl Into<String>) -> Self {
        Self {
            edit_type: EditType::Replace,
            delete: word.into(),
            insert: Some(with.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub condition: RuleCondition,
    pub consequence: RuleConsequence,
    /// Rules are active unless explicitly disabled
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validity: Vec<TimeRange>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn enabled_by_default() -> bool {
    true
}

impl Rule {
    pub fn new(
        object_id: impl Into<String>,
        condition: RuleCondition,
        consequence: RuleConsequence,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            condition,
            consequence,
            enabled: true,
            validity: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_validity(mut self, validity: Vec<TimeRange>) -> Self {
        self.validity = validity;
        self
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Whether the rule is active at `at`. Rules without validity are always active.
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.enabled
            && (self.validity.is_empty()
                || self.validity.iter().any(|range| range.from <= at && at <= range.until))
    }
}

/// Response of a rule search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSearchResult {
    pub hits: Vec<Rule>,
    #[serde(default)]
    pub nb_hits: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub nb_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_enabled_defaults_to_true_on_the_wire() {
        let rule: Rule = serde_json::from_value(json!({
            "objectID": "brand_tagging",
            "condition": {"pattern": "{facet:brand}", "anchoring": "contains"},
            "consequence": {"params": {"automaticFacetFilters": ["brand"]}}
        }))
        .unwrap();
        assert!(rule.enabled);
        assert!(rule.validity.is_empty());
    }

    #[test]
    fn test_validity_uses_unix_seconds() {
        let from = Utc.with_ymd_and_hms(2018, 7, 24, 13, 35, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2018, 7, 25, 13, 35, 0).unwrap();
        let mut rule = Rule::new(
            "with_validity",
            RuleCondition::new(Anchoring::Is, "apple"),
            RuleConsequence::default(),
        )
        .with_validity(vec![TimeRange { from, until }]);
        rule.disable();

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["validity"][0]["from"], json!(from.timestamp()));
        assert_eq!(value["enabled"], json!(false));

        let back: Rule = serde_json::from_value(value).unwrap();
        assert_eq!(back, rule);
        assert!(!back.is_active_at(from));
    }

    #[test]
    fn test_consequence_helpers_round_trip() {
        let edits = vec![Edit::remove("android")];
        let consequence = RuleConsequence {
            params: json!({"query": {"edits": edits}}).as_object().cloned().unwrap(),
            hide: vec![HiddenObject {
                object_id: "42".to_string(),
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&consequence).unwrap();
        assert_eq!(value["params"]["query"]["edits"][0], json!({"type": "remove", "delete": "android"}));

        let decoded: Vec<Edit> =
            serde_json::from_value(value["params"]["query"]["edits"].clone()).unwrap();
        assert_eq!(decoded, edits);
    }
}
