// Index Settings Domain Model

use crate::domain::polymorphic::{same_elements, Distinct, RemoveStopWords};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Configuration of an index.
///
/// Scalars are `None` when the server did not report them. List fields are
/// never sent empty: an empty list on the wire clears server-side state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // Scalars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_syntax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_compression_of_integer_array: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_typos_on_numeric_tokens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_for_distinct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_plurals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_diacritics_on_characters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values_per_facet: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_proximity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_word_sizefor1_typo: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_word_sizefor2_typos: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_limited_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_synonyms_in_highlight: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separators_to_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_ellipsis_text: Option<String>,
    /// `"true"`, `"false"`, `"min"` or `"strict"`; a JSON boolean is accepted too.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_bool"
    )]
    pub typo_tolerance: Option<String>,

    // String lists
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub attributes_for_faceting: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub searchable_attributes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub custom_ranking: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub numeric_attributes_for_filtering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub ranking: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub replicas: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub unretrievable_attributes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub disable_typo_tolerance_on_attributes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub disable_typo_tolerance_on_words: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub attributes_to_highlight: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub attributes_to_retrieve: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub attributes_to_snippet: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "nullable_list")]
    pub optional_words: Vec<String>,

    // Polymorphic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_stop_words: Option<RemoveStopWords>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<Distinct>,
}

impl Settings {
    /// Generic map suitable for a partial "set settings" call.
    ///
    /// One entry per populated field, keyed by wire name. Empty lists are
    /// omitted entirely.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Only strings, integers, booleans and lists of strings are involved
            _ => unreachable!("Settings always serialises to a JSON object"),
        }
    }

    /// Decode settings from a generic map (e.g. a `getSettings` response).
    pub fn from_map(map: Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(map))
    }

    /// Wire names of the fields that differ semantically.
    ///
    /// Scalars compare by equality, lists as sets, polymorphic fields through
    /// their decoder semantics.
    pub fn differences(&self, other: &Settings) -> Vec<&'static str> {
        let mut diffs = Vec::new();

        macro_rules! scalars {
            ($($field:ident => $name:literal),* $(,)?) => {
                $(if self.$field != other.$field { diffs.push($name); })*
            };
        }
        macro_rules! lists {
            ($($field:ident => $name:literal),* $(,)?) => {
                $(if !same_elements(&self.$field, &other.$field) { diffs.push($name); })*
            };
        }

        scalars! {
            advanced_syntax => "advancedSyntax",
            allow_compression_of_integer_array => "allowCompressionOfIntegerArray",
            allow_typos_on_numeric_tokens => "allowTyposOnNumericTokens",
            attribute_for_distinct => "attributeForDistinct",
            highlight_pre_tag => "highlightPreTag",
            highlight_post_tag => "highlightPostTag",
            hits_per_page => "hitsPerPage",
            ignore_plurals => "ignorePlurals",
            keep_diacritics_on_characters => "keepDiacriticsOnCharacters",
            max_values_per_facet => "maxValuesPerFacet",
            min_proximity => "minProximity",
            min_word_sizefor1_typo => "minWordSizefor1Typo",
            min_word_sizefor2_typos => "minWordSizefor2Typos",
            pagination_limited_to => "paginationLimitedTo",
            query_type => "queryType",
            replace_synonyms_in_highlight => "replaceSynonymsInHighlight",
            separators_to_index => "separatorsToIndex",
            snippet_ellipsis_text => "snippetEllipsisText",
            typo_tolerance => "typoTolerance",
        }

        lists! {
            attributes_for_faceting => "attributesForFaceting",
            searchable_attributes => "searchableAttributes",
            custom_ranking => "customRanking",
            numeric_attributes_for_filtering => "numericAttributesForFiltering",
            ranking => "ranking",
            replicas => "replicas",
            unretrievable_attributes => "unretrievableAttributes",
            disable_typo_tolerance_on_attributes => "disableTypoToleranceOnAttributes",
            disable_typo_tolerance_on_words => "disableTypoToleranceOnWords",
            attributes_to_highlight => "attributesToHighlight",
            attributes_to_retrieve => "attributesToRetrieve",
            attributes_to_snippet => "attributesToSnippet",
            optional_words => "optionalWords",
        }

        let stop_words_match = match (&self.remove_stop_words, &other.remove_stop_words) {
            (Some(a), Some(b)) => a.semantically_eq(b),
            (None, None) => true,
            _ => false,
        };
        if !stop_words_match {
            diffs.push(RemoveStopWords::FIELD);
        }

        let distinct_match = match (&self.distinct, &other.distinct) {
            (Some(a), Some(b)) => a.semantically_eq(b),
            (None, None) => true,
            _ => false,
        };
        if !distinct_match {
            diffs.push(Distinct::FIELD);
        }

        diffs
    }

    pub fn semantically_eq(&self, other: &Settings) -> bool {
        self.differences(other).is_empty()
    }
}

fn nullable_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "Unexpected shape for `typoTolerance`: {}",
            crate::domain::error::json_kind(&other)
        ))),
    }
}
