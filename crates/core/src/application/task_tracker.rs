// Task Completion Tracker
//
// Mutations are asynchronous on the server. The tracker polls task status
// until it is published or the attempt budget is spent.

use crate::application::constants::{DEFAULT_WAIT_DELAY, DEFAULT_WAIT_MAX_ATTEMPTS};
use crate::domain::{ApiKey, TaskId};
use crate::error::{Result, SearchError};
use crate::port::SearchApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// How long to keep polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_WAIT_MAX_ATTEMPTS,
            delay: DEFAULT_WAIT_DELAY,
        }
    }
}

impl WaitPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Polling state of a single wait.
///
/// `Submitted -> Polling -> Completed | TimedOut`. Finished states absorb
/// every further observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Submitted,
    Polling { attempt: u32 },
    Completed { attempts: u32 },
    TimedOut { attempts: u32 },
}

impl PollState {
    /// Advance with the outcome of one status check
    pub fn observe(self, done: bool, max_attempts: u32) -> Self {
        match self {
            PollState::Submitted | PollState::Polling { .. } => {
                let attempt = self.attempts() + 1;
                if done {
                    PollState::Completed { attempts: attempt }
                } else if attempt >= max_attempts {
                    PollState::TimedOut { attempts: attempt }
                } else {
                    PollState::Polling { attempt }
                }
            }
            finished => finished,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            PollState::Submitted => 0,
            PollState::Polling { attempt } => *attempt,
            PollState::Completed { attempts } | PollState::TimedOut { attempts } => *attempts,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            PollState::Completed { .. } | PollState::TimedOut { .. }
        )
    }
}

/// Waits for tasks and keys to become visible
#[derive(Clone)]
pub struct TaskTracker {
    api: Arc<dyn SearchApi>,
    policy: WaitPolicy,
}

impl TaskTracker {
    pub fn new(api: Arc<dyn SearchApi>, policy: WaitPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> WaitPolicy {
        self.policy
    }

    /// Block until `task_id` is published.
    ///
    /// Transport failures count as an unfinished attempt. Any other error
    /// ends the wait.
    pub async fn wait_task(&self, index: &str, task_id: TaskId) -> Result<()> {
        let mut state = PollState::Submitted;
        loop {
            let done = match self.api.get_task_status(index, task_id).await {
                Ok(status) => {
                    debug!(
                        index = %index,
                        task_id = %task_id,
                        status = %status,
                        attempt = %(state.attempts() + 1),
                        "Task status checked"
                    );
                    status.is_terminal()
                }
                Err(SearchError::Transport(e)) => {
                    warn!(index = %index, task_id = %task_id, error = %e, "Task status check failed");
                    false
                }
                Err(e) => return Err(e),
            };

            state = state.observe(done, self.policy.max_attempts);
            match state {
                PollState::Completed { attempts } => {
                    info!(index = %index, task_id = %task_id, attempts = %attempts, "Task published");
                    return Ok(());
                }
                PollState::TimedOut { attempts } => {
                    warn!(index = %index, task_id = %task_id, attempts = %attempts, "Task wait timed out");
                    return Err(SearchError::TaskTimeout { task_id, attempts });
                }
                _ => sleep(self.policy.delay).await,
            }
        }
    }

    /// Wait for every task concurrently, one worker per identifier.
    ///
    /// All workers are joined before returning; the first failure observed
    /// is reported.
    pub async fn wait_tasks(&self, index: &str, task_ids: &[TaskId]) -> Result<()> {
        let mut workers = JoinSet::new();
        for &task_id in task_ids {
            let tracker = self.clone();
            let index = index.to_string();
            workers.spawn(async move { tracker.wait_task(&index, task_id).await });
        }

        let mut first_error = None;
        while let Some(joined) = workers.join_next().await {
            let outcome = joined
                .map_err(|e| SearchError::Internal(format!("Task wait worker failed: {e}")))
                .and_then(|result| result);
            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Wait until `key` can be read back
    pub async fn wait_key(&self, key: &str) -> Result<ApiKey> {
        self.wait_key_until(key, |_| true).await
    }

    /// Wait until `key` can be read back and `ready` accepts it
    pub async fn wait_key_until<F>(&self, key: &str, ready: F) -> Result<ApiKey>
    where
        F: Fn(&ApiKey) -> bool + Send + Sync,
    {
        let mut state = PollState::Submitted;
        loop {
            let found = match self.api.get_key(key).await {
                Ok(api_key) if ready(&api_key) => Some(api_key),
                Ok(_) => None,
                Err(e) if e.is_not_found() => None,
                Err(SearchError::Transport(e)) => {
                    warn!(error = %e, "Key lookup failed");
                    None
                }
                Err(e) => return Err(e),
            };

            state = state.observe(found.is_some(), self.policy.max_attempts);
            match (state, found) {
                (PollState::Completed { attempts }, Some(api_key)) => {
                    debug!(attempts = %attempts, "Key visible");
                    return Ok(api_key);
                }
                (PollState::TimedOut { attempts }, _) => {
                    warn!(attempts = %attempts, "Key wait timed out");
                    return Err(SearchError::KeyTimeout {
                        key: key.to_string(),
                        attempts,
                    });
                }
                _ => sleep(self.policy.delay).await,
            }
        }
    }
}
