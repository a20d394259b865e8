// Index Domain Model

use serde::{Deserialize, Serialize};

/// Entry of the index listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexInfo {
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub entries: i64,
    pub data_size: i64,
    pub file_size: i64,
    pub last_build_time_s: i64,
    pub number_of_pending_tasks: i64,
    pub pending_task: bool,
}

/// Response of `GET /1/indexes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIndicesRes {
    pub items: Vec<IndexInfo>,
    #[serde(default)]
    pub nb_pages: usize,
}

/// Part of an index that a scoped copy carries over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyScope {
    Settings,
    Synonyms,
    Rules,
}

impl std::str::FromStr for CopyScope {
    type Err = crate::domain::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "settings" => Ok(Self::Settings),
            "synonyms" => Ok(Self::Synonyms),
            "rules" => Ok(Self::Rules),
            other => Err(crate::domain::DomainError::ValidationError(format!(
                "Unknown copy scope: {other} (expected settings, synonyms or rules)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Copy,
    Move,
}

/// Body of `POST /1/indexes/{index}/operation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOperation {
    pub operation: OperationKind,
    pub destination: String,
    /// Empty means the whole index
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<CopyScope>,
}

impl IndexOperation {
    pub fn copy(destination: impl Into<String>) -> Self {
        Self {
            operation: OperationKind::Copy,
            destination: destination.into(),
            scope: Vec::new(),
        }
    }

    pub fn scoped_copy(destination: impl Into<String>, scope: Vec<CopyScope>) -> Self {
        Self {
            scope,
            ..Self::copy(destination)
        }
    }

    pub fn move_to(destination: impl Into<String>) -> Self {
        Self {
            operation: OperationKind::Move,
            destination: destination.into(),
            scope: Vec::new(),
        }
    }

    /// Whether `part` travels with this operation
    pub fn includes(&self, part: CopyScope) -> bool {
        self.scope.is_empty() || self.scope.contains(&part)
    }

    /// Whether records travel with this operation (only unscoped ones carry them)
    pub fn includes_records(&self) -> bool {
        self.scope.is_empty()
    }
}
