// Task Domain Model
//
// Tasks live entirely server-side; the client only holds their identifiers.

use serde::{Deserialize, Serialize};

/// Server-side task identifier
pub type TaskId = i64;

/// Remote status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Terminal: the task's effects are visible to reads
    Published,
    NotPublished,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Published)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Published => write!(f, "published"),
            TaskStatus::NotPublished => write!(f, "notPublished"),
            TaskStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Response of `GET /1/indexes/{index}/task/{taskID}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusRes {
    pub status: TaskStatus,
    #[serde(default)]
    pub pending_task: bool,
}

/// What every mutating call returns.
///
/// Pass `task_id` to the task tracker before relying on the effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReceipt {
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    #[serde(rename = "objectID", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(rename = "objectIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub object_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl TaskReceipt {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            ..Default::default()
        }
    }
}
