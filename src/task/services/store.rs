//! The task store: canonical collection plus the only mutation surface.

use crate::task::{
    domain::{
        CreateTaskInput, Quadrant, Task, TaskId, UpdateTaskInput, ValidationError, demo_tasks,
    },
    ports::{TaskRepository, TaskRepositoryError},
    validation::{ValidationConfig, validate_create, validate_update},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Store-level errors for task operations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Input validation failed; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The referenced task does not exist; nothing was changed.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The repository failed. The in-memory collection keeps the change.
    #[error(transparent)]
    Persistence(#[from] TaskRepositoryError),
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Canonical in-memory task collection backed by a repository.
///
/// Every mutation validates first, applies to the collection atomically,
/// then saves the whole collection. The outcome of the latest operation is
/// mirrored in a single error slot readable through
/// [`TaskStore::last_error`].
pub struct TaskStore<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Vec<Task>,
    repository: Arc<R>,
    clock: Arc<C>,
    config: ValidationConfig,
    last_error: Option<TaskStoreError>,
}

impl<R, C> TaskStore<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates an empty store without reading the repository.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            tasks: Vec::new(),
            repository,
            clock,
            config: ValidationConfig::default(),
            last_error: None,
        }
    }

    /// Creates a store and loads the persisted collection into it.
    ///
    /// A load failure is not fatal: the store starts empty and the failure
    /// is available through [`TaskStore::last_error`].
    pub async fn hydrate(repository: Arc<R>, clock: Arc<C>) -> Self {
        let mut store = Self::new(repository, clock);
        if store.reload().await.is_err() {
            debug!("task store hydrated empty after a load failure");
        }
        store
    }

    /// Replaces the validation limits.
    #[must_use]
    pub const fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the validation limits in force.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Returns the collection in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the failure of the most recent unsuccessful operation, unless
    /// a later operation succeeded or the slot was cleared.
    #[must_use]
    pub const fn last_error(&self) -> Option<&TaskStoreError> {
        self.last_error.as_ref()
    }

    /// Clears the error slot.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Replaces the collection with what the repository holds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when loading fails; the
    /// collection is left as it was.
    pub async fn reload(&mut self) -> TaskStoreResult<usize> {
        match self.repository.load().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "hydrated task store");
                self.tasks = tasks;
                self.succeed(self.tasks.len())
            }
            Err(err) => {
                warn!(error = %err, "failed to load tasks; keeping in-memory state");
                self.fail(err.into())
            }
        }
    }

    /// Creates a task in the unassigned inbox.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] when any field is invalid, or
    /// [`TaskStoreError::Persistence`] when saving fails (the task is kept
    /// in memory).
    pub async fn create(&mut self, input: &CreateTaskInput) -> TaskStoreResult<Task> {
        let new_task = match validate_create(input, &self.config) {
            Ok(new_task) => new_task,
            Err(err) => return self.fail(err.into()),
        };
        let task = Task::create(new_task, &*self.clock);
        debug!(task_id = %task.id(), "created task");
        self.tasks.push(task.clone());
        self.persist(task).await
    }

    /// Applies a partial edit to a task.
    ///
    /// Flag edits never move the task between quadrants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] or [`TaskStoreError::Validation`]
    /// without changing anything, or [`TaskStoreError::Persistence`] when
    /// saving fails.
    pub async fn update(&mut self, id: TaskId, input: &UpdateTaskInput) -> TaskStoreResult<Task> {
        if self.get(id).is_none() {
            return self.fail(TaskStoreError::NotFound(id));
        }
        let changes = match validate_update(input, &self.config) {
            Ok(changes) => changes,
            Err(err) => return self.fail(err.into()),
        };
        let Some(updated) = self.mutate(id, |task, clock| task.apply_changes(changes, clock))
        else {
            return self.fail(TaskStoreError::NotFound(id));
        };
        debug!(task_id = %id, "updated task");
        self.persist(updated).await
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is unknown, or
    /// [`TaskStoreError::Persistence`] when saving fails.
    pub async fn delete(&mut self, id: TaskId) -> TaskStoreResult<Task> {
        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            return self.fail(TaskStoreError::NotFound(id));
        };
        let removed = self.tasks.remove(index);
        debug!(task_id = %id, "deleted task");
        self.persist(removed).await
    }

    /// Moves a task to `quadrant`, rewriting its urgent/important flags for
    /// every matrix quadrant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is unknown, or
    /// [`TaskStoreError::Persistence`] when saving fails.
    pub async fn move_to_quadrant(
        &mut self,
        id: TaskId,
        quadrant: Quadrant,
    ) -> TaskStoreResult<Task> {
        let Some(moved) = self.mutate(id, |task, clock| task.move_to_quadrant(quadrant, clock))
        else {
            return self.fail(TaskStoreError::NotFound(id));
        };
        debug!(task_id = %id, quadrant = %quadrant, "moved task");
        self.persist(moved).await
    }

    /// Flips a task's completion state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is unknown, or
    /// [`TaskStoreError::Persistence`] when saving fails.
    pub async fn toggle_completion(&mut self, id: TaskId) -> TaskStoreResult<Task> {
        let Some(toggled) = self.mutate(id, |task, clock| task.toggle_completion(clock)) else {
            return self.fail(TaskStoreError::NotFound(id));
        };
        debug!(task_id = %id, completed = toggled.completed(), "toggled completion");
        self.persist(toggled).await
    }

    /// Sets a task's completion state; a no-op when already in that state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is unknown, or
    /// [`TaskStoreError::Persistence`] when saving fails.
    pub async fn set_completion(&mut self, id: TaskId, completed: bool) -> TaskStoreResult<Task> {
        let mut changed = false;
        let Some(task) = self.mutate(id, |task, clock| {
            changed = task.set_completion(completed, clock);
        }) else {
            return self.fail(TaskStoreError::NotFound(id));
        };
        if !changed {
            return self.succeed(task);
        }
        debug!(task_id = %id, completed, "set completion");
        self.persist(task).await
    }

    /// Removes every task and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the repository cannot be
    /// cleared; the in-memory collection is empty regardless.
    pub async fn clear_all(&mut self) -> TaskStoreResult<usize> {
        let removed = self.tasks.len();
        self.tasks.clear();
        info!(removed, "cleared all tasks");
        match self.repository.clear().await {
            Ok(()) => self.succeed(removed),
            Err(err) => {
                warn!(error = %err, "failed to clear persisted tasks");
                self.fail(err.into())
            }
        }
    }

    /// Replaces the collection with the built-in demo set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when saving fails.
    pub async fn load_demo_tasks(&mut self) -> TaskStoreResult<usize> {
        self.tasks = demo_tasks(&*self.clock);
        let count = self.tasks.len();
        info!(count, "loaded demo tasks");
        self.persist(count).await
    }

    /// Applies `mutate` to the task with `id` and returns the result.
    fn mutate<F>(&mut self, id: TaskId, mutate: F) -> Option<Task>
    where
        F: FnOnce(&mut Task, &C),
    {
        let clock = &*self.clock;
        let task = self.tasks.iter_mut().find(|task| task.id() == id)?;
        mutate(task, clock);
        Some(task.clone())
    }

    async fn persist<T>(&mut self, value: T) -> TaskStoreResult<T> {
        match self.repository.save(&self.tasks).await {
            Ok(()) => self.succeed(value),
            Err(err) => {
                warn!(error = %err, "failed to persist tasks; keeping in-memory state");
                self.fail(err.into())
            }
        }
    }

    fn succeed<T>(&mut self, value: T) -> TaskStoreResult<T> {
        self.last_error = None;
        Ok(value)
    }

    fn fail<T>(&mut self, err: TaskStoreError) -> TaskStoreResult<T> {
        self.last_error = Some(err.clone());
        Err(err)
    }
}
