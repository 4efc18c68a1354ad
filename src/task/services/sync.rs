//! Optimistic synchronisation against a remote task service.
//!
//! Every operation runs in two phases. `begin_*` applies a tentative result
//! to the local collection straight away and returns a [`PendingSync`]
//! handle. [`TaskSyncBoard::settle`] then issues the remote call: on success
//! the service's canonical task replaces the tentative one, on failure the
//! tentative effect is rolled back.
//!
//! A task takes part in at most one unsettled sync at a time, and a pending
//! clear-all excludes every other operation. Rollbacks restore snapshots, so
//! overlapping syncs on the same task could otherwise undo a change the
//! service has already confirmed.

use crate::task::{
    domain::{
        CreateTaskInput, Quadrant, SyncId, Task, TaskId, UpdateTaskInput, ValidationError,
    },
    ports::{TaskApi, TaskApiError},
    validation::{ValidationConfig, validate_create, validate_update},
};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the sync board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// Local validation rejected the operation before anything changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The task is not in the local collection.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The remote call failed; the tentative change was rolled back.
    #[error(transparent)]
    Remote(#[from] TaskApiError),
    /// The task already has an unsettled sync.
    #[error("task {0} has a sync in flight")]
    InFlight(TaskId),
    /// A sync that touches the whole collection is unsettled, or one would
    /// have to wait for unsettled syncs.
    #[error("the task collection has syncs in flight")]
    CollectionInFlight,
}

/// Lifecycle of one optimistic operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// Applied locally, not yet confirmed.
    Pending,
    /// Confirmed by the service. Carries the canonical task when the
    /// operation produces one.
    Committed(Option<Task>),
    /// Rejected or unreachable service; the local change was undone.
    Failed(TaskApiError),
}

/// Remote call an optimistic operation stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOperation {
    /// Create a task.
    Create(CreateTaskInput),
    /// Edit a task.
    Update(TaskId, UpdateTaskInput),
    /// Delete a task.
    Delete(TaskId),
    /// Move a task to another quadrant.
    Move(TaskId, Quadrant),
    /// Flip completion.
    ToggleCompletion(TaskId),
    /// Set completion.
    SetCompletion(TaskId, bool),
    /// Delete every task.
    ClearAll,
}

#[derive(Debug, Clone)]
enum Rollback {
    Remove(TaskId),
    Replace(Task),
    Reinsert { index: usize, task: Task },
    Restore(Vec<Task>),
}

/// Handle for an operation applied locally and awaiting confirmation.
#[derive(Debug, Clone)]
#[must_use = "a pending sync does nothing until it is settled"]
pub struct PendingSync {
    id: SyncId,
    operation: SyncOperation,
    subject: Option<TaskId>,
    tentative: Option<Task>,
    rollback: Rollback,
}

impl PendingSync {
    /// Returns the synchronisation identifier.
    #[must_use]
    pub const fn id(&self) -> SyncId {
        self.id
    }

    /// Returns the remote operation this handle stands for.
    #[must_use]
    pub const fn operation(&self) -> &SyncOperation {
        &self.operation
    }

    /// Returns the tentative task shown until the service confirms.
    #[must_use]
    pub const fn tentative(&self) -> Option<&Task> {
        self.tentative.as_ref()
    }
}

/// Local task collection kept in step with a remote task service.
pub struct TaskSyncBoard<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    tasks: Vec<Task>,
    api: Arc<A>,
    clock: Arc<C>,
    config: ValidationConfig,
    syncs: HashMap<SyncId, SyncState>,
    in_flight: HashSet<TaskId>,
    clearing: bool,
    last_error: Option<SyncError>,
}

impl<A, C> TaskSyncBoard<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    /// Creates an empty board.
    #[must_use]
    pub fn new(api: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            tasks: Vec::new(),
            api,
            clock,
            config: ValidationConfig::default(),
            syncs: HashMap::new(),
            in_flight: HashSet::new(),
            clearing: false,
            last_error: None,
        }
    }

    /// Replaces the validation limits used for tentative changes.
    #[must_use]
    pub const fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the local collection, tentative changes included.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with `id`, if present locally.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the state of a sync started by this board.
    #[must_use]
    pub fn sync_state(&self, id: SyncId) -> Option<&SyncState> {
        self.syncs.get(&id)
    }

    /// Returns how many syncs are still awaiting settlement.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.syncs
            .values()
            .filter(|state| matches!(state, SyncState::Pending))
            .count()
    }

    /// Drops the recorded outcome of a settled sync and returns it.
    ///
    /// Pending syncs are kept and yield `None`.
    pub fn forget(&mut self, id: SyncId) -> Option<SyncState> {
        if matches!(self.syncs.get(&id), Some(SyncState::Pending)) {
            return None;
        }
        self.syncs.remove(&id)
    }

    /// Returns `true` when `id` has an unsettled sync.
    #[must_use]
    pub fn is_in_flight(&self, id: TaskId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Returns the most recent failure, unless cleared or superseded by a
    /// success.
    #[must_use]
    pub const fn last_error(&self) -> Option<&SyncError> {
        self.last_error.as_ref()
    }

    /// Clears the error slot.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Replaces the local collection with the service's.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::CollectionInFlight`] while any sync is
    /// unsettled, or [`SyncError::Remote`] when listing fails; the local
    /// collection is kept in both cases.
    pub async fn refresh(&mut self) -> Result<usize, SyncError> {
        self.ensure_settled()?;
        match self.api.list().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "refreshed tasks from service");
                self.tasks = tasks;
                self.last_error = None;
                Ok(self.tasks.len())
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Replaces the service's and the local collection with the demo set.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::CollectionInFlight`] while any sync is
    /// unsettled, or [`SyncError::Remote`] when the service call fails.
    pub async fn load_demo_tasks(&mut self) -> Result<usize, SyncError> {
        self.ensure_settled()?;
        match self.api.demo_tasks().await {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded demo tasks from service");
                self.tasks = tasks;
                self.last_error = None;
                Ok(self.tasks.len())
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Tentatively creates a task in the inbox.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] when the input is invalid, or
    /// [`SyncError::CollectionInFlight`] while a clear-all is unsettled.
    pub fn begin_create(&mut self, input: CreateTaskInput) -> Result<PendingSync, SyncError> {
        self.ensure_available(None)?;
        let new_task = match validate_create(&input, &self.config) {
            Ok(new_task) => new_task,
            Err(err) => return self.fail(err.into()),
        };
        let task = Task::create(new_task, &*self.clock);
        self.tasks.push(task.clone());
        Ok(self.start(
            SyncOperation::Create(input),
            Some(task.id()),
            Some(task.clone()),
            Rollback::Remove(task.id()),
        ))
    }

    /// Tentatively edits a task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`], [`SyncError::InFlight`] or
    /// [`SyncError::Validation`] without changing anything.
    pub fn begin_update(
        &mut self,
        id: TaskId,
        input: UpdateTaskInput,
    ) -> Result<PendingSync, SyncError> {
        if self.get(id).is_none() {
            return self.fail(SyncError::NotFound(id));
        }
        self.ensure_available(Some(id))?;
        let changes = match validate_update(&input, &self.config) {
            Ok(changes) => changes,
            Err(err) => return self.fail(err.into()),
        };
        self.begin_mutation(SyncOperation::Update(id, input), id, |task, clock| {
            task.apply_changes(changes, clock);
        })
    }

    /// Tentatively deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when `id` is not present locally, or
    /// [`SyncError::InFlight`] while it has an unsettled sync.
    pub fn begin_delete(&mut self, id: TaskId) -> Result<PendingSync, SyncError> {
        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            return self.fail(SyncError::NotFound(id));
        };
        self.ensure_available(Some(id))?;
        let task = self.tasks.remove(index);
        Ok(self.start(
            SyncOperation::Delete(id),
            Some(id),
            None,
            Rollback::Reinsert { index, task },
        ))
    }

    /// Tentatively moves a task, overwriting its flags for matrix quadrants.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when `id` is not present locally, or
    /// [`SyncError::InFlight`] while it has an unsettled sync.
    pub fn begin_move(&mut self, id: TaskId, quadrant: Quadrant) -> Result<PendingSync, SyncError> {
        self.begin_mutation(SyncOperation::Move(id, quadrant), id, |task, clock| {
            task.move_to_quadrant(quadrant, clock);
        })
    }

    /// Tentatively flips a task's completion state.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when `id` is not present locally, or
    /// [`SyncError::InFlight`] while it has an unsettled sync.
    pub fn begin_toggle_completion(&mut self, id: TaskId) -> Result<PendingSync, SyncError> {
        self.begin_mutation(SyncOperation::ToggleCompletion(id), id, |task, clock| {
            task.toggle_completion(clock);
        })
    }

    /// Tentatively sets a task's completion state.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when `id` is not present locally, or
    /// [`SyncError::InFlight`] while it has an unsettled sync.
    pub fn begin_set_completion(
        &mut self,
        id: TaskId,
        completed: bool,
    ) -> Result<PendingSync, SyncError> {
        self.begin_mutation(
            SyncOperation::SetCompletion(id, completed),
            id,
            |task, clock| {
                task.set_completion(completed, clock);
            },
        )
    }

    /// Tentatively removes every task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::CollectionInFlight`] while any sync is unsettled.
    pub fn begin_clear_all(&mut self) -> Result<PendingSync, SyncError> {
        self.ensure_settled()?;
        let previous = std::mem::take(&mut self.tasks);
        Ok(self.start(
            SyncOperation::ClearAll,
            None,
            None,
            Rollback::Restore(previous),
        ))
    }

    /// Undoes a tentative change without contacting the service.
    ///
    /// The sync's record is dropped, as if it had never started.
    pub fn abandon(&mut self, pending: PendingSync) {
        let PendingSync {
            id,
            operation,
            subject,
            rollback,
            ..
        } = pending;
        self.release(subject);
        self.roll_back(rollback);
        self.syncs.remove(&id);
        debug!(sync_id = %id, ?operation, "abandoned tentative change");
    }

    /// Confirms a pending operation with the service.
    ///
    /// On success the canonical result replaces the tentative one; on
    /// failure the tentative change is undone and the error is recorded.
    pub async fn settle(&mut self, pending: PendingSync) -> SyncState {
        let PendingSync {
            id,
            operation,
            subject,
            tentative,
            rollback,
        } = pending;
        self.release(subject);

        let state = match self.call_remote(&operation).await {
            Ok(canonical) => {
                if let Some(task) = canonical.as_ref() {
                    let local_id = tentative.as_ref().map_or(task.id(), Task::id);
                    self.replace(local_id, task.clone());
                }
                debug!(sync_id = %id, ?operation, "sync committed");
                self.last_error = None;
                SyncState::Committed(canonical)
            }
            Err(err) => {
                warn!(sync_id = %id, ?operation, error = %err, "sync failed; rolling back");
                self.roll_back(rollback);
                self.last_error = Some(SyncError::Remote(err.clone()));
                SyncState::Failed(err)
            }
        };
        self.syncs.insert(id, state.clone());
        state
    }

    async fn call_remote(&self, operation: &SyncOperation) -> Result<Option<Task>, TaskApiError> {
        let api = &*self.api;
        match operation {
            SyncOperation::Create(input) => api.create(input).await.map(Some),
            SyncOperation::Update(id, input) => api.update(*id, input).await.map(Some),
            SyncOperation::Delete(id) => api.delete(*id).await.map(|()| None),
            SyncOperation::Move(id, quadrant) => {
                api.move_to_quadrant(*id, *quadrant).await.map(Some)
            }
            SyncOperation::ToggleCompletion(id) => api.toggle_completion(*id).await.map(Some),
            SyncOperation::SetCompletion(id, completed) => {
                api.set_completion(*id, *completed).await.map(Some)
            }
            SyncOperation::ClearAll => api.clear_all().await.map(|_| None),
        }
    }

    fn begin_mutation<F>(
        &mut self,
        operation: SyncOperation,
        id: TaskId,
        mutate: F,
    ) -> Result<PendingSync, SyncError>
    where
        F: FnOnce(&mut Task, &C),
    {
        self.ensure_available(Some(id))?;
        let clock = &*self.clock;
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            return self.fail(SyncError::NotFound(id));
        };
        let before = task.clone();
        mutate(task, clock);
        let tentative = task.clone();
        Ok(self.start(
            operation,
            Some(id),
            Some(tentative),
            Rollback::Replace(before),
        ))
    }

    /// Records a new pending sync. `subject` is the task it locks; `None`
    /// locks the whole collection.
    fn start(
        &mut self,
        operation: SyncOperation,
        subject: Option<TaskId>,
        tentative: Option<Task>,
        rollback: Rollback,
    ) -> PendingSync {
        let id = SyncId::new();
        debug!(sync_id = %id, ?operation, "applied tentative change");
        self.clearing = subject.is_none();
        self.in_flight.extend(subject);
        self.syncs.insert(id, SyncState::Pending);
        self.last_error = None;
        PendingSync {
            id,
            operation,
            subject,
            tentative,
            rollback,
        }
    }

    fn release(&mut self, subject: Option<TaskId>) {
        let Some(task_id) = subject else {
            self.clearing = false;
            return;
        };
        self.in_flight.remove(&task_id);
    }

    fn ensure_available(&mut self, id: Option<TaskId>) -> Result<(), SyncError> {
        if self.clearing {
            return self.fail(SyncError::CollectionInFlight);
        }
        if let Some(task_id) = id
            && self.in_flight.contains(&task_id)
        {
            return self.fail(SyncError::InFlight(task_id));
        }
        Ok(())
    }

    fn ensure_settled(&mut self) -> Result<(), SyncError> {
        if self.clearing || !self.in_flight.is_empty() {
            return self.fail(SyncError::CollectionInFlight);
        }
        Ok(())
    }

    fn replace(&mut self, local_id: TaskId, canonical: Task) {
        let Some(slot) = self.tasks.iter_mut().find(|task| task.id() == local_id) else {
            debug!(task_id = %local_id, "confirmed task no longer present locally");
            return;
        };
        *slot = canonical;
    }

    fn roll_back(&mut self, rollback: Rollback) {
        match rollback {
            Rollback::Remove(id) => self.tasks.retain(|task| task.id() != id),
            Rollback::Replace(previous) => {
                let id = previous.id();
                self.replace(id, previous);
            }
            Rollback::Reinsert { index, task } => {
                let at = index.min(self.tasks.len());
                self.tasks.insert(at, task);
            }
            Rollback::Restore(previous) => {
                let added_since = std::mem::take(&mut self.tasks);
                self.tasks = previous;
                self.tasks.extend(added_since);
            }
        }
    }

    fn fail<T>(&mut self, err: SyncError) -> Result<T, SyncError> {
        self.last_error = Some(err.clone());
        Err(err)
    }
}
