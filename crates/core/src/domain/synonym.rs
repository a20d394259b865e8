// Synonym Domain Model

use serde::{Deserialize, Serialize};

/// Symmetric group of equivalent terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularSynonym {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub synonyms: Vec<String>,
}

/// `input` expands to `synonyms`, not the other way round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWaySynonym {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub input: String,
    pub synonyms: Vec<String>,
}

/// A `<token>` in records matched by any of `replacements`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSynonym {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub placeholder: String,
    pub replacements: Vec<String>,
}

/// `word` matches `corrections` as if with one or two typos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltCorrectionSynonym {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub word: String,
    pub corrections: Vec<String>,
}

/// Typo-distance class of an alternative correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltCorrectionType {
    One,
    Two,
}

/// A synonym, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Synonym {
    #[serde(rename = "synonym")]
    Regular(RegularSynonym),
    #[serde(rename = "oneWaySynonym", alias = "onewaysynonym")]
    OneWay(OneWaySynonym),
    #[serde(rename = "placeholder")]
    Placeholder(PlaceholderSynonym),
    #[serde(rename = "altCorrection1", alias = "altcorrection1")]
    AltCorrection1(AltCorrectionSynonym),
    #[serde(rename = "altCorrection2", alias = "altcorrection2")]
    AltCorrection2(AltCorrectionSynonym),
}

impl Synonym {
    pub fn regular(object_id: impl Into<String>, synonyms: Vec<String>) -> Self {
        Self::Regular(RegularSynonym {
            object_id: object_id.into(),
            synonyms,
        })
    }

    pub fn one_way(
        object_id: impl Into<String>,
        input: impl Into<String>,
        synonyms: Vec<String>,
    ) -> Self {
        Self::OneWay(OneWaySynonym {
            object_id: object_id.into(),
            input: input.into(),
            synonyms,
        })
    }

    pub fn placeholder(
        object_id: impl Into<String>,
        placeholder: impl Into<String>,
        replacements: Vec<String>,
    ) -> Self {
        Self::Placeholder(PlaceholderSynonym {
            object_id: object_id.into(),
            placeholder: placeholder.into(),
            replacements,
        })
    }

    pub fn alt_correction(
        object_id: impl Into<String>,
        corrections: Vec<String>,
        word: impl Into<String>,
        kind: AltCorrectionType,
    ) -> Self {
        let synonym = AltCorrectionSynonym {
            object_id: object_id.into(),
            word: word.into(),
            corrections,
        };
        match kind {
            AltCorrectionType::One => Self::AltCorrection1(synonym),
            AltCorrectionType::Two => Self::AltCorrection2(synonym),
        }
    }

    pub fn object_id(&self) -> &str {
        match self {
            Self::Regular(s) => &s.object_id,
            Self::OneWay(s) => &s.object_id,
            Self::Placeholder(s) => &s.object_id,
            Self::AltCorrection1(s) | Self::AltCorrection2(s) => &s.object_id,
        }
    }

    /// Wire value of the `type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Regular(_) => "synonym",
            Self::OneWay(_) => "oneWaySynonym",
            Self::Placeholder(_) => "placeholder",
            Self::AltCorrection1(_) => "altCorrection1",
            Self::AltCorrection2(_) => "altCorrection2",
        }
    }

    /// Every term the synonym mentions, used for text matching.
    pub fn terms(&self) -> Vec<&str> {
        match self {
            Self::Regular(s) => s.synonyms.iter().map(String::as_str).collect(),
            Self::OneWay(s) => std::iter::once(s.input.as_str())
                .chain(s.synonyms.iter().map(String::as_str))
                .collect(),
            Self::Placeholder(s) => std::iter::once(s.placeholder.as_str())
                .chain(s.replacements.iter().map(String::as_str))
                .collect(),
            Self::AltCorrection1(s) | Self::AltCorrection2(s) => std::iter::once(s.word.as_str())
                .chain(s.corrections.iter().map(String::as_str))
                .collect(),
        }
    }
}

/// Response of a synonym search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynonymSearchResult {
    pub hits: Vec<Synonym>,
    #[serde(default)]
    pub nb_hits: usize,
}
