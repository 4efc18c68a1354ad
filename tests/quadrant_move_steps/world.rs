//! Shared world state for quadrant move BDD scenarios.

use std::sync::Arc;

use eisenhower::task::{
    adapters::memory::{InMemoryTaskApi, InMemoryTaskRepository},
    domain::{Quadrant, Task, TaskId},
    services::{SyncState, TaskStore, TaskStoreError, TaskSyncBoard},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestTaskStore = TaskStore<InMemoryTaskRepository, DefaultClock>;

/// Sync board type used by the BDD world.
pub type TestSyncBoard = TaskSyncBoard<InMemoryTaskApi<DefaultClock>, DefaultClock>;

/// Scenario world for quadrant move behaviour tests.
pub struct QuadrantMoveWorld {
    pub store: TestTaskStore,
    pub board: TestSyncBoard,
    pub api: InMemoryTaskApi<DefaultClock>,
    pub current_task: Option<TaskId>,
    pub last_move_result: Option<Result<Task, TaskStoreError>>,
    pub last_sync_state: Option<SyncState>,
}

impl QuadrantMoveWorld {
    /// Creates a world with an empty store and an empty reachable service.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let api = InMemoryTaskApi::new(Arc::clone(&clock));
        Self {
            store: TaskStore::new(Arc::new(InMemoryTaskRepository::new()), Arc::clone(&clock)),
            board: TaskSyncBoard::new(Arc::new(api.clone()), clock),
            api,
            current_task: None,
            last_move_result: None,
            last_sync_state: None,
        }
    }

    /// Returns the task the scenario is working on.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for QuadrantMoveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QuadrantMoveWorld {
    QuadrantMoveWorld::default()
}

/// Parses a quadrant name used in a feature file.
pub fn parse_quadrant(raw: &str) -> Result<Quadrant, eyre::Report> {
    Quadrant::try_from(raw).map_err(|err| eyre::eyre!("invalid quadrant in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
