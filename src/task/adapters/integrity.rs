//! Consistency checks for collections read back from storage.

use crate::task::domain::Task;
use std::collections::HashSet;

/// Describes the first way `tasks` breaks the collection invariants, if any.
///
/// The checks cover what serde cannot: unique ids, non-blank titles, a
/// completion timestamp exactly when completed, and `updated_at` not before
/// `created_at`.
pub(super) fn find_inconsistency(tasks: &[Task]) -> Option<String> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks.iter().find_map(|task| {
        let problem = if !seen.insert(task.id()) {
            "duplicate id"
        } else if task.title().trim().is_empty() {
            "blank title"
        } else if task.completed() != task.completed_at().is_some() {
            "completion timestamp does not match completion state"
        } else if task.updated_at() < task.created_at() {
            "updated before it was created"
        } else {
            return None;
        };
        Some(format!("task {}: {problem}", task.id()))
    })
}
