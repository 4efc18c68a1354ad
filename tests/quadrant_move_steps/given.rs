//! Given steps for quadrant move BDD scenarios.

use super::world::{QuadrantMoveWorld, parse_quadrant, run_async};
use eisenhower::task::{domain::CreateTaskInput, ports::TaskApi};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"an inbox task titled "{title}""#)]
fn inbox_task(world: &mut QuadrantMoveWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.store.create(&CreateTaskInput::new(title)))
        .wrap_err("create inbox task for scenario")?;
    world.current_task = Some(created.id());
    Ok(())
}

#[given(r#"the task has been moved to "{quadrant}""#)]
fn task_has_been_moved(
    world: &mut QuadrantMoveWorld,
    quadrant: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let target = parse_quadrant(&quadrant)?;
    run_async(world.store.move_to_quadrant(id, target))
        .wrap_err("move task in scenario setup")?;
    Ok(())
}

#[given(r#"a task titled "{title}" on the task service"#)]
fn remote_task(world: &mut QuadrantMoveWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.api.create(&CreateTaskInput::new(title)))
        .wrap_err("create task on the service")?;
    run_async(world.board.refresh()).wrap_err("refresh board from the service")?;
    world.current_task = Some(created.id());
    Ok(())
}

#[given("the task service is unreachable")]
fn service_unreachable(world: &mut QuadrantMoveWorld) {
    world.api.set_reachable(false);
}
