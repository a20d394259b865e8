// Batch Operation Encoder

use crate::domain::error::{DomainError, Result};
use crate::domain::record::Record;
use serde::{Deserialize, Serialize};

/// Action of a single batch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchAction {
    AddObject,
    UpdateObject,
    PartialUpdateObject,
    PartialUpdateObjectNoCreate,
    DeleteObject,
    Delete,
    Clear,
}

impl BatchAction {
    /// Actions that target an existing record and therefore need its `objectID`
    pub fn requires_object_id(&self) -> bool {
        matches!(
            self,
            Self::UpdateObject
                | Self::PartialUpdateObject
                | Self::PartialUpdateObjectNoCreate
                | Self::DeleteObject
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddObject => "addObject",
            Self::UpdateObject => "updateObject",
            Self::PartialUpdateObject => "partialUpdateObject",
            Self::PartialUpdateObjectNoCreate => "partialUpdateObjectNoCreate",
            Self::DeleteObject => "deleteObject",
            Self::Delete => "delete",
            Self::Clear => "clear",
        }
    }
}

impl std::fmt::Display for BatchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation of a batch. Transient: built per call, dropped after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOperation {
    pub action: BatchAction,
    pub body: Record,
}

impl BatchOperation {
    pub fn new(action: BatchAction, body: Record) -> Self {
        Self { action, body }
    }

    pub fn add(record: Record) -> Self {
        Self::new(BatchAction::AddObject, record)
    }

    pub fn update(record: Record) -> Self {
        Self::new(BatchAction::UpdateObject, record)
    }

    pub fn partial_update(record: Record, create_if_not_exists: bool) -> Self {
        let action = if create_if_not_exists {
            BatchAction::PartialUpdateObject
        } else {
            BatchAction::PartialUpdateObjectNoCreate
        };
        Self::new(action, record)
    }

    pub fn delete(object_id: impl Into<String>) -> Self {
        Self::new(
            BatchAction::DeleteObject,
            Record::new().with_object_id(object_id),
        )
    }
}

/// A batch that passed validation.
///
/// The only way to build one is [`BatchRequest::new`], so a batch reaching
/// the `SearchApi` port has already been checked in full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRequest {
    requests: Vec<BatchOperation>,
}

impl BatchRequest {
    /// Validate the whole batch, all-or-nothing.
    ///
    /// The first operation whose action needs an `objectID` and whose body has
    /// none rejects the batch.
    pub fn new(operations: Vec<BatchOperation>) -> Result<Self> {
        if let Some((position, op)) = operations
            .iter()
            .enumerate()
            .find(|(_, op)| op.action.requires_object_id() && !op.body.has_object_id())
        {
            return Err(DomainError::MissingObjectId {
                action: op.action.to_string(),
                position,
            });
        }
        Ok(Self {
            requests: operations,
        })
    }

    pub fn operations(&self) -> &[BatchOperation] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
