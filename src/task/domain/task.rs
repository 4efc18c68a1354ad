//! Task aggregate root and its state transitions.

use super::{NewTask, Quadrant, TaskChanges, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// The quadrant only changes through [`Task::move_to_quadrant`], which also
/// rewrites the urgent/important flags. Editing the flags through
/// [`Task::apply_changes`] never relocates the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    urgent: bool,
    important: bool,
    quadrant: Quadrant,
    #[serde(default)]
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted urgent flag.
    pub urgent: bool,
    /// Persisted important flag.
    pub important: bool,
    /// Persisted quadrant.
    pub quadrant: Quadrant,
    /// Persisted completion state.
    pub completed: bool,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task in the unassigned inbox.
    ///
    /// The supplied flags are kept as-is; they do not pick a quadrant.
    #[must_use]
    pub fn create(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: new_task.title,
            description: new_task.description,
            due_date: new_task.due_date,
            urgent: new_task.urgent,
            important: new_task.important,
            quadrant: Quadrant::Unassigned,
            completed: false,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            urgent: data.urgent,
            important: data.important,
            quadrant: data.quadrant,
            completed: data.completed,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, which may contain markup.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
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

    /// Returns the current quadrant.
    #[must_use]
    pub const fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns when the task was completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Merges validated field changes into the task.
    ///
    /// The quadrant is left alone even when the urgent/important flags
    /// change. A completion change is routed through
    /// [`Task::set_completion`] so `completed_at` stays consistent.
    pub fn apply_changes(&mut self, changes: TaskChanges, clock: &impl Clock) {
        let TaskChanges {
            title,
            description,
            due_date,
            urgent,
            important,
            completed,
        } = changes;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }
        if let Some(flag) = urgent {
            self.urgent = flag;
        }
        if let Some(flag) = important {
            self.important = flag;
        }
        if let Some(done) = completed {
            self.set_completion(done, clock);
        }
        self.touch(clock);
    }

    /// Moves the task to `quadrant`, overwriting the flags for every matrix
    /// quadrant and keeping them when the target is the inbox.
    pub fn move_to_quadrant(&mut self, quadrant: Quadrant, clock: &impl Clock) {
        self.quadrant = quadrant;
        if let Some((urgent, important)) = quadrant.flags() {
            self.urgent = urgent;
            self.important = important;
        }
        self.touch(clock);
    }

    /// Flips the completion state.
    pub fn toggle_completion(&mut self, clock: &impl Clock) {
        let target = !self.completed;
        self.set_completion(target, clock);
    }

    /// Sets the completion state.
    ///
    /// Returns `false` and leaves the task untouched when it is already in
    /// the requested state.
    pub fn set_completion(&mut self, completed: bool, clock: &impl Clock) -> bool {
        if self.completed == completed {
            return false;
        }
        self.completed = completed;
        self.completed_at = completed.then(|| clock.utc());
        self.touch(clock);
        true
    }

    /// Refreshes `updated_at`, never letting it fall behind `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
    }
}
