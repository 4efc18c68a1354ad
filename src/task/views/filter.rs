//! Filtering projections over a task collection.

use super::plain_text;
use crate::task::domain::{Quadrant, Task};
use chrono::NaiveDate;

/// Filter criteria applied by [`apply_filters`].
///
/// The restrictions are combined with AND. Completed tasks are hidden unless
/// `show_completed` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    /// Case-insensitive text matched against the title and the plain text
    /// of the description. Blank means no search.
    pub search: String,
    /// Include completed tasks.
    pub show_completed: bool,
    /// Only urgent tasks.
    pub show_urgent: bool,
    /// Only important tasks.
    pub show_important: bool,
    /// Only tasks in this quadrant.
    pub quadrant: Option<Quadrant>,
}

impl TaskFilters {
    /// Sets the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets whether completed tasks are shown.
    #[must_use]
    pub const fn with_show_completed(mut self, show_completed: bool) -> Self {
        self.show_completed = show_completed;
        self
    }

    /// Restricts the result to urgent tasks.
    #[must_use]
    pub const fn with_show_urgent(mut self, show_urgent: bool) -> Self {
        self.show_urgent = show_urgent;
        self
    }

    /// Restricts the result to important tasks.
    #[must_use]
    pub const fn with_show_important(mut self, show_important: bool) -> Self {
        self.show_important = show_important;
        self
    }

    /// Restricts the result to one quadrant.
    #[must_use]
    pub const fn with_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = Some(quadrant);
        self
    }

    /// Returns how many criteria deviate from the defaults.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.show_completed,
            self.show_urgent,
            self.show_important,
            self.quadrant.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    fn matches(&self, task: &Task, needle: Option<&str>) -> bool {
        if !self.show_completed && task.completed() {
            return false;
        }
        if self.show_urgent && !task.urgent() {
            return false;
        }
        if self.show_important && !task.important() {
            return false;
        }
        if let Some(quadrant) = self.quadrant
            && task.quadrant() != quadrant
        {
            return false;
        }
        needle.is_none_or(|text| matches_search(task, text))
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    if task.title().to_lowercase().contains(needle) {
        return true;
    }
    task.description()
        .is_some_and(|description| plain_text(description).to_lowercase().contains(needle))
}

/// Returns the tasks in `quadrant`, in collection order.
#[must_use]
pub fn by_quadrant(tasks: &[Task], quadrant: Quadrant) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.quadrant() == quadrant)
        .collect()
}

/// Returns the tasks still waiting in the inbox.
#[must_use]
pub fn unassigned(tasks: &[Task]) -> Vec<&Task> {
    by_quadrant(tasks, Quadrant::Unassigned)
}

/// Returns the completed tasks.
#[must_use]
pub fn completed(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.completed()).collect()
}

/// Returns the tasks that are overdue on `today`.
#[must_use]
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| is_overdue(task, today)).collect()
}

/// Returns the tasks matching every criterion in `filters`.
#[must_use]
pub fn apply_filters<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    let trimmed = filters.search.trim();
    let needle = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
    tasks
        .iter()
        .filter(|task| filters.matches(task, needle.as_deref()))
        .collect()
}

/// A task is overdue when it is incomplete and due strictly before `today`.
#[must_use]
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed() && task.due_date().is_some_and(|due| due < today)
}

/// Task totals per quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantCounts {
    /// Tasks in [`Quadrant::Do`].
    pub do_now: usize,
    /// Tasks in [`Quadrant::Schedule`].
    pub schedule: usize,
    /// Tasks in [`Quadrant::Delegate`].
    pub delegate: usize,
    /// Tasks in [`Quadrant::Delete`].
    pub delete: usize,
    /// Tasks in [`Quadrant::Unassigned`].
    pub unassigned: usize,
}

impl QuadrantCounts {
    /// Returns the number of tasks in `quadrant`.
    #[must_use]
    pub const fn get(&self, quadrant: Quadrant) -> usize {
        match quadrant {
            Quadrant::Do => self.do_now,
            Quadrant::Schedule => self.schedule,
            Quadrant::Delegate => self.delegate,
            Quadrant::Delete => self.delete,
            Quadrant::Unassigned => self.unassigned,
        }
    }

    /// Returns the number of tasks across all quadrants.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.do_now + self.schedule + self.delegate + self.delete + self.unassigned
    }

    const fn slot(&mut self, quadrant: Quadrant) -> &mut usize {
        match quadrant {
            Quadrant::Do => &mut self.do_now,
            Quadrant::Schedule => &mut self.schedule,
            Quadrant::Delegate => &mut self.delegate,
            Quadrant::Delete => &mut self.delete,
            Quadrant::Unassigned => &mut self.unassigned,
        }
    }
}

/// Counts the tasks in each quadrant, completed ones included.
#[must_use]
pub fn count_by_quadrant(tasks: &[Task]) -> QuadrantCounts {
    let mut counts = QuadrantCounts::default();
    for task in tasks {
        *counts.slot(task.quadrant()) += 1;
    }
    counts
}
