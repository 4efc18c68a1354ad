//! Eisenhower quadrants and the flag mapping that ties them to the matrix
//! axes.

use super::ParseQuadrantError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorisation bucket a task currently sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quadrant {
    /// Urgent and important.
    Do,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither urgent nor important.
    Delete,
    /// Inbox for tasks that have not been categorised yet.
    Unassigned,
}

impl Quadrant {
    /// Every quadrant in display order.
    pub const ALL: [Self; 5] = [
        Self::Do,
        Self::Schedule,
        Self::Delegate,
        Self::Delete,
        Self::Unassigned,
    ];

    /// The four matrix quadrants, excluding the inbox.
    pub const MATRIX: [Self; 4] = [Self::Do, Self::Schedule, Self::Delegate, Self::Delete];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Do => "DO",
            Self::Schedule => "SCHEDULE",
            Self::Delegate => "DELEGATE",
            Self::Delete => "DELETE",
            Self::Unassigned => "UNASSIGNED",
        }
    }

    /// Returns the `(urgent, important)` pair a task takes on when it is
    /// moved into this quadrant.
    ///
    /// The inbox has no position on either axis, so it returns `None` and
    /// moving a task there keeps the task's existing flags.
    #[must_use]
    pub const fn flags(self) -> Option<(bool, bool)> {
        match self {
            Self::Do => Some((true, true)),
            Self::Schedule => Some((false, true)),
            Self::Delegate => Some((true, false)),
            Self::Delete => Some((false, false)),
            Self::Unassigned => None,
        }
    }

    /// Returns the matrix quadrant that a flag pair belongs to.
    #[must_use]
    pub const fn for_flags(urgent: bool, important: bool) -> Self {
        match (urgent, important) {
            (true, true) => Self::Do,
            (false, true) => Self::Schedule,
            (true, false) => Self::Delegate,
            (false, false) => Self::Delete,
        }
    }

    /// Returns the heading used when tasks are grouped by quadrant.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Do => "Do (Urgent & Important)",
            Self::Schedule => "Schedule (Important, Not Urgent)",
            Self::Delegate => "Delegate (Urgent, Not Important)",
            Self::Delete => "Delete (Neither Urgent nor Important)",
            Self::Unassigned => "Unassigned Tasks",
        }
    }

    /// Returns a one-line description of what belongs in the quadrant.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Do => "Critical tasks that require immediate attention",
            Self::Schedule => "Important goals and strategic work",
            Self::Delegate => "Tasks that can be handled by others",
            Self::Delete => "Time-wasters and unnecessary activities",
            Self::Unassigned => "Newly created tasks awaiting categorization",
        }
    }

    /// Returns a sort weight, higher meaning more pressing.
    #[must_use]
    pub const fn priority_level(self) -> u8 {
        match self {
            Self::Do => 4,
            Self::Schedule => 3,
            Self::Delegate => 2,
            Self::Delete => 1,
            Self::Unassigned => 0,
        }
    }

    /// Position of the quadrant in [`Quadrant::ALL`].
    #[must_use]
    pub const fn display_index(self) -> usize {
        match self {
            Self::Do => 0,
            Self::Schedule => 1,
            Self::Delegate => 2,
            Self::Delete => 3,
            Self::Unassigned => 4,
        }
    }
}

impl TryFrom<&str> for Quadrant {
    type Error = ParseQuadrantError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "DO" => Ok(Self::Do),
            "SCHEDULE" => Ok(Self::Schedule),
            "DELEGATE" => Ok(Self::Delegate),
            "DELETE" => Ok(Self::Delete),
            "UNASSIGNED" => Ok(Self::Unassigned),
            _ => Err(ParseQuadrantError(value.to_owned())),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
