//! Remote task API port.
//!
//! One method per endpoint of a task service that is the system of record.
//! Transport and encoding are the adapter's concern.

use crate::task::domain::{CreateTaskInput, Quadrant, Task, TaskId, UpdateTaskInput};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for remote task API calls.
pub type TaskApiResult<T> = Result<T, TaskApiError>;

/// Remote task service contract.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists every task held by the service.
    async fn list(&self) -> TaskApiResult<Vec<Task>>;

    /// Creates a task and returns the service's canonical copy.
    async fn create(&self, input: &CreateTaskInput) -> TaskApiResult<Task>;

    /// Applies a partial edit.
    async fn update(&self, id: TaskId, input: &UpdateTaskInput) -> TaskApiResult<Task>;

    /// Deletes a task.
    async fn delete(&self, id: TaskId) -> TaskApiResult<()>;

    /// Moves a task to another quadrant.
    async fn move_to_quadrant(&self, id: TaskId, quadrant: Quadrant) -> TaskApiResult<Task>;

    /// Flips a task's completion state.
    async fn toggle_completion(&self, id: TaskId) -> TaskApiResult<Task>;

    /// Sets a task's completion state.
    async fn set_completion(&self, id: TaskId, completed: bool) -> TaskApiResult<Task>;

    /// Deletes every task and returns how many were removed.
    async fn clear_all(&self) -> TaskApiResult<usize>;

    /// Replaces the service's tasks with its demo set and returns it.
    async fn demo_tasks(&self) -> TaskApiResult<Vec<Task>>;
}

/// Errors returned by remote task API implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskApiError {
    /// The service could not be reached.
    #[error("unable to reach the task service: {0}")]
    Unreachable(String),

    /// The service does not know the task.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The service refused the request.
    #[error("task service rejected the request: {0}")]
    Rejected(String),
}
