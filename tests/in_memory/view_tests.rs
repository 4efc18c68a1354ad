//! Integration tests for views over the demo collection.

use std::sync::Arc;

use super::helpers::{MemoryStore, store};
use chrono::Utc;
use eisenhower::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Quadrant,
    views::{GroupBy, TaskFilters, apply_filters, count_by_quadrant, group_by},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_collection_counts_and_groups(
    store: (MemoryStore, Arc<InMemoryTaskRepository>),
) -> Result<(), eyre::Report> {
    let (mut store, _repository) = store;
    store.load_demo_tasks().await?;
    let today = Utc::now().date_naive();

    let counts = count_by_quadrant(store.tasks());
    for quadrant in Quadrant::MATRIX {
        eyre::ensure!(counts.get(quadrant) == 2, "{quadrant}: {}", counts.get(quadrant));
    }
    eyre::ensure!(counts.get(Quadrant::Unassigned) == 3, "inbox count");

    let open = apply_filters(store.tasks(), &TaskFilters::default());
    eyre::ensure!(open.len() == 9, "two demo tasks are completed");

    let groups = group_by(store.tasks(), GroupBy::Quadrant, today);
    let total: usize = groups.iter().map(|group| group.count()).sum();
    eyre::ensure!(groups.len() == 5, "every quadrant has demo tasks");
    eyre::ensure!(total == store.len(), "grouping lost tasks");

    let by_status = group_by(store.tasks(), GroupBy::Overdue, today);
    let completed = by_status
        .iter()
        .find(|group| group.label == "Completed")
        .map(|group| group.count());
    eyre::ensure!(completed == Some(2), "completed group: {completed:?}");
    Ok(())
}
