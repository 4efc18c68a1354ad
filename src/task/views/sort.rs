//! Orderings for task projections.

use crate::task::domain::Task;
use std::cmp::Ordering;

/// Ordering applied by [`sort_tasks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskSort {
    /// Most pressing quadrant first, newest first within a quadrant.
    #[default]
    Priority,
    /// Earliest due date first; undated tasks last.
    DueDate,
    /// Most recently created first.
    CreatedNewest,
    /// Title, ignoring case.
    Title,
}

/// Sorts a projection in place. Ties keep their relative order.
pub fn sort_tasks(tasks: &mut [&Task], sort: TaskSort) {
    match sort {
        TaskSort::Priority => tasks.sort_by(|a, b| {
            b.quadrant()
                .priority_level()
                .cmp(&a.quadrant().priority_level())
                .then_with(|| b.created_at().cmp(&a.created_at()))
        }),
        TaskSort::DueDate => tasks.sort_by(|a, b| compare_due_dates(a, b)),
        TaskSort::CreatedNewest => tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        TaskSort::Title => tasks.sort_by_cached_key(|task| task.title().to_lowercase()),
    }
}

fn compare_due_dates(a: &Task, b: &Task) -> Ordering {
    match (a.due_date(), b.due_date()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
