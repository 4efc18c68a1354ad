//! In-memory integration tests for the task store lifecycle.

use std::sync::Arc;

use super::helpers::{MemoryStore, clock, repository, store};
use eisenhower::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{CreateTaskInput, Quadrant, Task, UpdateTaskInput},
    ports::TaskRepository,
    services::TaskStore,
    views::{by_quadrant, unassigned},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inbox_task_is_triaged_then_completed(
    store: (MemoryStore, Arc<InMemoryTaskRepository>),
) -> Result<(), eyre::Report> {
    let (mut store, repository) = store;

    let task = store
        .create(
            &CreateTaskInput::new("Renew car insurance")
                .with_description("<p>Compare <b>three</b> quotes</p>")
                .with_due_date("2030-06-01"),
        )
        .await?;
    eyre::ensure!(
        unassigned(store.tasks()).len() == 1,
        "new task should wait in the inbox"
    );

    store.move_to_quadrant(task.id(), Quadrant::Schedule).await?;
    store
        .update(task.id(), &UpdateTaskInput::new().with_urgent(true))
        .await?;
    let done = store.toggle_completion(task.id()).await?;

    eyre::ensure!(done.quadrant() == Quadrant::Schedule, "flag edit moved the task");
    eyre::ensure!(done.urgent() && done.important(), "flags: {done:?}");
    eyre::ensure!(done.completed_at().is_some(), "completion time missing");
    eyre::ensure!(unassigned(store.tasks()).is_empty(), "inbox should be empty");

    let persisted = repository.load().await?;
    eyre::ensure!(persisted == vec![done], "repository out of sync");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stores_sharing_a_repository_see_saved_state(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<DefaultClock>,
) -> Result<(), eyre::Report> {
    let mut writer = TaskStore::new(Arc::clone(&repository), Arc::clone(&clock));
    for (title, quadrant) in [
        ("Fix prod bug", Quadrant::Do),
        ("Write roadmap", Quadrant::Schedule),
        ("Answer survey", Quadrant::Delegate),
    ] {
        let task = writer.create(&CreateTaskInput::new(title)).await?;
        writer.move_to_quadrant(task.id(), quadrant).await?;
    }

    let reader = TaskStore::hydrate(repository, clock).await;

    eyre::ensure!(reader.tasks() == writer.tasks(), "hydrated collection differs");
    let scheduled: Vec<&str> = by_quadrant(reader.tasks(), Quadrant::Schedule)
        .into_iter()
        .map(Task::title)
        .collect();
    eyre::ensure!(scheduled == ["Write roadmap"], "scheduled: {scheduled:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_then_clear_leaves_nothing_behind(
    store: (MemoryStore, Arc<InMemoryTaskRepository>),
) -> Result<(), eyre::Report> {
    let (mut store, repository) = store;

    let loaded = store.load_demo_tasks().await?;
    eyre::ensure!(repository.load().await?.len() == loaded, "demo set not saved");

    let removed = store.clear_all().await?;
    eyre::ensure!(removed == loaded, "removed {removed}, loaded {loaded}");
    eyre::ensure!(store.is_empty(), "store should be empty");
    eyre::ensure!(repository.load().await?.is_empty(), "repository should be empty");
    Ok(())
}
