//! Repository port for persisting the canonical task collection.

use crate::task::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task collection persistence contract.
///
/// The store always hands over the whole collection, so implementations
/// replace what they hold rather than merging.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Loads the full collection in stored order.
    ///
    /// Returns an empty collection when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the medium cannot be
    /// read, or [`TaskRepositoryError::Corrupt`] when stored data cannot be
    /// decoded.
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Replaces the stored collection with `tasks`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Removes everything stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the medium cannot be
    /// cleared.
    async fn clear(&self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Stored data exists but cannot be decoded.
    #[error("stored task data is corrupt: {0}")]
    Corrupt(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
