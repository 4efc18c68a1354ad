//! Then steps for quadrant move BDD scenarios.

use super::world::{QuadrantMoveWorld, parse_quadrant};
use eisenhower::task::{
    domain::Task,
    services::{SyncState, TaskStoreError},
};
use rstest_bdd_macros::then;

fn current_task(world: &QuadrantMoveWorld) -> Result<&Task, eyre::Report> {
    let id = world.task_id()?;
    world
        .store
        .get(id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from store"))
}

#[then(r#"the task is in quadrant "{quadrant}""#)]
fn task_in_quadrant(world: &QuadrantMoveWorld, quadrant: String) -> Result<(), eyre::Report> {
    let expected = parse_quadrant(&quadrant)?;
    let task = current_task(world)?;
    eyre::ensure!(
        task.quadrant() == expected,
        "expected quadrant {expected}, found {}",
        task.quadrant()
    );
    Ok(())
}

#[then("the task is urgent")]
fn task_is_urgent(world: &QuadrantMoveWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(current_task(world)?.urgent(), "task should be urgent");
    Ok(())
}

#[then("the task is important")]
fn task_is_important(world: &QuadrantMoveWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(current_task(world)?.important(), "task should be important");
    Ok(())
}

#[then("the task is not important")]
fn task_is_not_important(world: &QuadrantMoveWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !current_task(world)?.important(),
        "task should not be important"
    );
    Ok(())
}

#[then("the move fails because the task was not found")]
fn move_fails_not_found(world: &QuadrantMoveWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    eyre::ensure!(
        matches!(result, Err(TaskStoreError::NotFound(_))),
        "expected NotFound error, got {result:?}"
    );
    Ok(())
}

#[then("the sync fails")]
fn sync_fails(world: &QuadrantMoveWorld) -> Result<(), eyre::Report> {
    let state = world
        .last_sync_state
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sync state"))?;
    eyre::ensure!(
        matches!(state, SyncState::Failed(_)),
        "expected failed sync, got {state:?}"
    );
    Ok(())
}

#[then(r#"the synced task is in quadrant "{quadrant}""#)]
fn synced_task_in_quadrant(
    world: &QuadrantMoveWorld,
    quadrant: String,
) -> Result<(), eyre::Report> {
    let expected = parse_quadrant(&quadrant)?;
    let id = world.task_id()?;
    let task = world
        .board
        .get(id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from board"))?;
    eyre::ensure!(
        task.quadrant() == expected,
        "expected quadrant {expected}, found {}",
        task.quadrant()
    );
    Ok(())
}
