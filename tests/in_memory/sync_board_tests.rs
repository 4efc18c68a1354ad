//! In-memory integration tests for optimistic synchronisation.

use super::helpers::{MemoryBoard, board};
use eisenhower::task::{
    adapters::memory::InMemoryTaskApi,
    domain::{CreateTaskInput, Quadrant, Task},
    services::{SyncError, SyncState},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn several_pending_operations_settle_independently(
    board: (MemoryBoard, InMemoryTaskApi<DefaultClock>),
) -> Result<(), eyre::Report> {
    let (mut board, api) = board;
    let first = board.begin_create(CreateTaskInput::new("Draft agenda"))?;
    let second = board.begin_create(CreateTaskInput::new("Invite speakers"))?;
    eyre::ensure!(board.pending_count() == 2, "two syncs should be pending");

    let second_state = board.settle(second).await;
    let first_state = board.settle(first).await;

    eyre::ensure!(
        matches!(first_state, SyncState::Committed(Some(_))),
        "first: {first_state:?}"
    );
    eyre::ensure!(
        matches!(second_state, SyncState::Committed(Some(_))),
        "second: {second_state:?}"
    );
    eyre::ensure!(board.pending_count() == 0, "nothing should remain pending");
    let local: Vec<&str> = board.tasks().iter().map(Task::title).collect();
    eyre::ensure!(
        local == ["Draft agenda", "Invite speakers"],
        "local order changed: {local:?}"
    );
    let server = api.snapshot()?;
    eyre::ensure!(board.tasks() == server.as_slice(), "board and service diverged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outage_rolls_back_and_recovery_succeeds(
    board: (MemoryBoard, InMemoryTaskApi<DefaultClock>),
) -> Result<(), eyre::Report> {
    let (mut board, api) = board;
    let pending = board.begin_create(CreateTaskInput::new("Prepare demo"))?;
    board.settle(pending).await;
    let id = board
        .tasks()
        .first()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("created task missing"))?;

    api.set_reachable(false);
    let pending = board.begin_move(id, Quadrant::Do)?;
    let state = board.settle(pending).await;
    eyre::ensure!(matches!(state, SyncState::Failed(_)), "state: {state:?}");
    eyre::ensure!(
        board.get(id).map(Task::quadrant) == Some(Quadrant::Unassigned),
        "move was not rolled back"
    );
    eyre::ensure!(
        matches!(board.last_error(), Some(SyncError::Remote(_))),
        "remote failure not recorded"
    );

    api.set_reachable(true);
    let pending = board.begin_move(id, Quadrant::Do)?;
    let state = board.settle(pending).await;
    eyre::ensure!(matches!(state, SyncState::Committed(_)), "state: {state:?}");
    eyre::ensure!(board.last_error().is_none(), "success should clear the error");
    eyre::ensure!(
        api.snapshot()?.first().map(Task::quadrant) == Some(Quadrant::Do),
        "service did not record the move"
    );
    Ok(())
}
