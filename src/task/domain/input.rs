//! Raw and validated input payloads for task creation and edits.
//!
//! [`CreateTaskInput`] and [`UpdateTaskInput`] carry caller-supplied text as
//! entered. Validation turns them into [`NewTask`] and [`TaskChanges`], the
//! only forms the [`Task`](super::Task) aggregate accepts.

use chrono::NaiveDate;

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskInput {
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    urgent: bool,
    important: bool,
}

impl CreateTaskInput {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date, as `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the urgent flag.
    #[must_use]
    pub const fn with_urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    /// Sets the important flag.
    #[must_use]
    pub const fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    /// Returns the title as entered.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description as entered.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date as entered.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Returns the urgent flag.
    #[must_use]
    pub const fn urgent(&self) -> bool {
        self.urgent
    }

    /// Returns the important flag.
    #[must_use]
    pub const fn important(&self) -> bool {
        self.important
    }
}

/// Partial edit of an existing task.
///
/// Every field is optional; only supplied fields are validated and merged.
/// The quadrant is intentionally not editable here: use a quadrant move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskInput {
    title: Option<String>,
    description: Option<Option<String>>,
    due_date: Option<Option<String>>,
    urgent: Option<bool>,
    important: Option<bool>,
    completed: Option<bool>,
}

impl UpdateTaskInput {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Sets the urgent flag without moving the task.
    #[must_use]
    pub const fn with_urgent(mut self, urgent: bool) -> Self {
        self.urgent = Some(urgent);
        self
    }

    /// Sets the important flag without moving the task.
    #[must_use]
    pub const fn with_important(mut self, important: bool) -> Self {
        self.important = Some(important);
        self
    }

    /// Sets the completion state.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns the supplied title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the supplied description change: `Some(None)` clears it.
    #[must_use]
    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    /// Returns the supplied due date change: `Some(None)` clears it.
    #[must_use]
    pub fn due_date(&self) -> Option<Option<&str>> {
        self.due_date.as_ref().map(Option::as_deref)
    }

    /// Returns the supplied urgent flag, if any.
    #[must_use]
    pub const fn urgent(&self) -> Option<bool> {
        self.urgent
    }

    /// Returns the supplied important flag, if any.
    #[must_use]
    pub const fn important(&self) -> Option<bool> {
        self.important
    }

    /// Returns the supplied completion state, if any.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.urgent.is_none()
            && self.important.is_none()
            && self.completed.is_none()
    }
}

/// Validated fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description; `None` when absent or blank.
    pub description: Option<String>,
    /// Calendar due date.
    pub due_date: Option<NaiveDate>,
    /// Urgent flag.
    pub urgent: bool,
    /// Important flag.
    pub important: bool,
}

/// Validated deltas to merge into an existing task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement urgent flag.
    pub urgent: Option<bool>,
    /// Replacement important flag.
    pub important: Option<bool>,
    /// Replacement completion state.
    pub completed: Option<bool>,
}
