//! When steps for quadrant move BDD scenarios.

use super::world::{QuadrantMoveWorld, parse_quadrant, run_async};
use eisenhower::task::domain::{TaskId, UpdateTaskInput};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the task is moved to "{quadrant}""#)]
fn move_task(world: &mut QuadrantMoveWorld, quadrant: String) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let target = parse_quadrant(&quadrant)?;
    let result = run_async(world.store.move_to_quadrant(id, target));
    world.last_move_result = Some(result);
    Ok(())
}

#[when(r#"an unknown task is moved to "{quadrant}""#)]
fn move_unknown_task(world: &mut QuadrantMoveWorld, quadrant: String) -> Result<(), eyre::Report> {
    let target = parse_quadrant(&quadrant)?;
    let result = run_async(world.store.move_to_quadrant(TaskId::new(), target));
    world.last_move_result = Some(result);
    Ok(())
}

#[when("the task is marked urgent")]
fn mark_urgent(world: &mut QuadrantMoveWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    run_async(
        world
            .store
            .update(id, &UpdateTaskInput::new().with_urgent(true)),
    )
    .wrap_err("mark task urgent")?;
    Ok(())
}

#[when(r#"the task is optimistically moved to "{quadrant}""#)]
fn move_optimistically(
    world: &mut QuadrantMoveWorld,
    quadrant: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let target = parse_quadrant(&quadrant)?;
    let pending = world
        .board
        .begin_move(id, target)
        .wrap_err("apply tentative move")?;
    let state = run_async(world.board.settle(pending));
    world.last_sync_state = Some(state);
    Ok(())
}
