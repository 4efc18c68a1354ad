//! Grouping of task projections into labelled sections.

use super::is_overdue;
use crate::task::domain::{Quadrant, Task};
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dimension tasks are grouped by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// Single group holding every task.
    #[default]
    None,
    /// One group per populated quadrant.
    Quadrant,
    /// Relative due-date buckets.
    Date,
    /// Overdue status.
    Overdue,
    /// Urgent/important flag combination.
    Priority,
}

impl GroupBy {
    /// Returns the lowercase name accepted by [`GroupBy::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quadrant => "quadrant",
            Self::Date => "date",
            Self::Overdue => "overdue",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a grouping name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grouping: {0}")]
pub struct ParseGroupByError(pub String);

impl FromStr for GroupBy {
    type Err = ParseGroupByError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "quadrant" => Ok(Self::Quadrant),
            "date" => Ok(Self::Date),
            "overdue" => Ok(Self::Overdue),
            "priority" => Ok(Self::Priority),
            _ => Err(ParseGroupByError(value.to_owned())),
        }
    }
}

/// A labelled section of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup<'a> {
    /// Stable group identifier.
    pub id: String,
    /// Heading shown for the group.
    pub label: String,
    /// Member tasks, in input order.
    pub tasks: Vec<&'a Task>,
}

impl TaskGroup<'_> {
    /// Returns the number of tasks in the group.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// Sort position of a group: a rank, then a date for dated buckets.
type GroupRank = (usize, Option<NaiveDate>);

/// Splits `tasks` into groups along `dimension`.
///
/// Only populated groups are returned, except for [`GroupBy::None`] which
/// always yields the single `all` group. `today` anchors the date-relative
/// buckets.
#[must_use]
pub fn group_by<'a, I>(tasks: I, dimension: GroupBy, today: NaiveDate) -> Vec<TaskGroup<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    if dimension == GroupBy::None {
        return vec![TaskGroup {
            id: "all".to_owned(),
            label: "All Tasks".to_owned(),
            tasks: tasks.into_iter().collect(),
        }];
    }

    let mut groups: BTreeMap<GroupRank, TaskGroup<'a>> = BTreeMap::new();
    for task in tasks {
        let (rank, id, label) = classify(task, dimension, today);
        groups
            .entry(rank)
            .or_insert_with(|| TaskGroup {
                id,
                label,
                tasks: Vec::new(),
            })
            .tasks
            .push(task);
    }
    groups.into_values().collect()
}

fn classify(task: &Task, dimension: GroupBy, today: NaiveDate) -> (GroupRank, String, String) {
    match dimension {
        GroupBy::None => ((0, None), "all".to_owned(), "All Tasks".to_owned()),
        GroupBy::Quadrant => {
            let quadrant = task.quadrant();
            (
                (quadrant.display_index(), None),
                quadrant.as_str().to_owned(),
                quadrant.label().to_owned(),
            )
        }
        GroupBy::Date => {
            let (rank, label) = date_bucket(task.due_date(), today);
            (rank, label.clone(), label)
        }
        GroupBy::Overdue => {
            let (rank, label) = if task.completed() {
                (3, "Completed")
            } else if is_overdue(task, today) {
                (0, "Overdue")
            } else if task.due_date().is_some() {
                (1, "Upcoming")
            } else {
                (2, "No Due Date")
            };
            ((rank, None), label.to_owned(), label.to_owned())
        }
        GroupBy::Priority => {
            let (rank, label) = priority_band(task);
            ((rank, None), label.to_owned(), label.to_owned())
        }
    }
}

fn date_bucket(due_date: Option<NaiveDate>, today: NaiveDate) -> (GroupRank, String) {
    let Some(due) = due_date else {
        return ((4, None), "No Date".to_owned());
    };
    let tomorrow = today.checked_add_days(Days::new(1));
    let yesterday = today.checked_sub_days(Days::new(1));
    if due == today {
        ((1, None), "Today".to_owned())
    } else if Some(due) == tomorrow {
        ((2, None), "Tomorrow".to_owned())
    } else if Some(due) == yesterday {
        ((3, Some(due)), "Yesterday".to_owned())
    } else if due < today {
        ((0, None), "Overdue".to_owned())
    } else {
        ((3, Some(due)), due.format("%b %-d, %Y").to_string())
    }
}

const fn priority_band(task: &Task) -> (usize, &'static str) {
    match Quadrant::for_flags(task.urgent(), task.important()) {
        Quadrant::Do => (0, "High Priority (Urgent & Important)"),
        Quadrant::Schedule => (1, "Medium Priority (Important)"),
        Quadrant::Delegate => (2, "Medium Priority (Urgent)"),
        Quadrant::Delete | Quadrant::Unassigned => (3, "Low Priority"),
    }
}
