//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use eisenhower::task::{
    adapters::memory::{InMemoryTaskApi, InMemoryTaskRepository},
    services::{TaskStore, TaskSyncBoard},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store over a shared in-memory repository.
pub type MemoryStore = TaskStore<InMemoryTaskRepository, DefaultClock>;

/// Sync board over the in-memory task service.
pub type MemoryBoard = TaskSyncBoard<InMemoryTaskApi<DefaultClock>, DefaultClock>;

/// Provides a clock for task creation.
#[fixture]
pub fn clock() -> Arc<DefaultClock> {
    Arc::new(DefaultClock)
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Provides an empty store and the repository behind it.
#[fixture]
pub fn store(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<DefaultClock>,
) -> (MemoryStore, Arc<InMemoryTaskRepository>) {
    (TaskStore::new(Arc::clone(&repository), clock), repository)
}

/// Provides an empty board and a handle on the service behind it.
#[fixture]
pub fn board(clock: Arc<DefaultClock>) -> (MemoryBoard, InMemoryTaskApi<DefaultClock>) {
    let api = InMemoryTaskApi::new(Arc::clone(&clock));
    (TaskSyncBoard::new(Arc::new(api.clone()), clock), api)
}
