//! In-memory stand-in for the remote task service.
//!
//! Applies the same domain rules as the task store so optimistic clients
//! can be exercised without a network. Reachability can be switched off to
//! simulate an outage.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{CreateTaskInput, Quadrant, Task, TaskId, UpdateTaskInput, demo_tasks},
    ports::{TaskApi, TaskApiError, TaskApiResult},
    validation::{ValidationConfig, validate_create, validate_update},
};

/// Thread-safe in-memory task service.
///
/// Clones share state, so a test can keep a handle for outage simulation
/// after giving another to a sync board.
pub struct InMemoryTaskApi<C>
where
    C: Clock,
{
    tasks: Arc<RwLock<Vec<Task>>>,
    reachable: Arc<AtomicBool>,
    clock: Arc<C>,
    config: ValidationConfig,
}

impl<C> Clone for InMemoryTaskApi<C>
where
    C: Clock,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            reachable: Arc::clone(&self.reachable),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<C> InMemoryTaskApi<C>
where
    C: Clock,
{
    /// Creates an empty, reachable service.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            tasks: Arc::new(RwLock::new(Vec::new())),
            reachable: Arc::new(AtomicBool::new(true)),
            clock,
            config: ValidationConfig::default(),
        }
    }

    /// Replaces the validation limits the service enforces.
    #[must_use]
    pub const fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Switches simulated connectivity on or off.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Returns a copy of the tasks the service currently holds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskApiError::Unreachable`] when the lock is poisoned.
    pub fn snapshot(&self) -> TaskApiResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.clone())
    }

    fn ensure_reachable(&self) -> TaskApiResult<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TaskApiError::Unreachable(
                "connection refused by in-memory task service".to_owned(),
            ))
        }
    }

    fn with_task<F>(&self, id: TaskId, mutate: F) -> TaskApiResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> TaskApiResult<()>,
    {
        self.ensure_reachable()?;
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskApiError::NotFound(id))?;
        mutate(task, &*self.clock)?;
        Ok(task.clone())
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskApiError {
    TaskApiError::Unreachable(err.to_string())
}

#[async_trait]
impl<C> TaskApi for InMemoryTaskApi<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> TaskApiResult<Vec<Task>> {
        self.ensure_reachable()?;
        self.snapshot()
    }

    async fn create(&self, input: &CreateTaskInput) -> TaskApiResult<Task> {
        self.ensure_reachable()?;
        let new_task = validate_create(input, &self.config)
            .map_err(|err| TaskApiError::Rejected(err.to_string()))?;
        let task = Task::create(new_task, &*self.clock);
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, input: &UpdateTaskInput) -> TaskApiResult<Task> {
        let config = self.config;
        self.with_task(id, |task, clock| {
            let changes = validate_update(input, &config)
                .map_err(|err| TaskApiError::Rejected(err.to_string()))?;
            task.apply_changes(changes, clock);
            Ok(())
        })
    }

    async fn delete(&self, id: TaskId) -> TaskApiResult<()> {
        self.ensure_reachable()?;
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == before {
            return Err(TaskApiError::NotFound(id));
        }
        Ok(())
    }

    async fn move_to_quadrant(&self, id: TaskId, quadrant: Quadrant) -> TaskApiResult<Task> {
        self.with_task(id, |task, clock| {
            task.move_to_quadrant(quadrant, clock);
            Ok(())
        })
    }

    async fn toggle_completion(&self, id: TaskId) -> TaskApiResult<Task> {
        self.with_task(id, |task, clock| {
            task.toggle_completion(clock);
            Ok(())
        })
    }

    async fn set_completion(&self, id: TaskId, completed: bool) -> TaskApiResult<Task> {
        self.with_task(id, |task, clock| {
            task.set_completion(completed, clock);
            Ok(())
        })
    }

    async fn clear_all(&self) -> TaskApiResult<usize> {
        self.ensure_reachable()?;
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let removed = tasks.len();
        tasks.clear();
        Ok(removed)
    }

    async fn demo_tasks(&self) -> TaskApiResult<Vec<Task>> {
        self.ensure_reachable()?;
        let demo = demo_tasks(&*self.clock);
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        demo.clone_into(&mut *tasks);
        Ok(demo)
    }
}
