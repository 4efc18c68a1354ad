//! Built-in demo task set covering every quadrant.

use super::{PersistedTaskData, Quadrant, Task, TaskId};
use chrono::{Days, NaiveDate};
use mockable::Clock;

struct DemoEntry {
    title: &'static str,
    description: &'static str,
    due_in_days: Option<u64>,
    quadrant: Quadrant,
    urgent: bool,
    important: bool,
    completed: bool,
}

const DEMO_ENTRIES: [DemoEntry; 11] = [
    DemoEntry {
        title: "Review quarterly budget report",
        description: "Analyze Q4 expenses and prepare recommendations for next quarter",
        due_in_days: Some(1),
        quadrant: Quadrant::Unassigned,
        urgent: false,
        important: true,
        completed: false,
    },
    DemoEntry {
        title: "Fix critical login bug",
        description: "Users unable to login due to authentication service timeout",
        due_in_days: Some(0),
        quadrant: Quadrant::Unassigned,
        urgent: true,
        important: true,
        completed: false,
    },
    DemoEntry {
        title: "Plan team building event",
        description: "Organize quarterly team outing and team building activities",
        due_in_days: Some(30),
        quadrant: Quadrant::Unassigned,
        urgent: false,
        important: false,
        completed: false,
    },
    DemoEntry {
        title: "Handle client emergency",
        description: "Production server down for major client - needs immediate attention",
        due_in_days: Some(0),
        quadrant: Quadrant::Do,
        urgent: true,
        important: true,
        completed: false,
    },
    DemoEntry {
        title: "Submit tax documents",
        description: "Corporate tax filing deadline is today",
        due_in_days: Some(0),
        quadrant: Quadrant::Do,
        urgent: true,
        important: true,
        completed: true,
    },
    DemoEntry {
        title: "Complete project planning",
        description: "Define scope, timeline, and resources for next quarter project",
        due_in_days: Some(7),
        quadrant: Quadrant::Schedule,
        urgent: false,
        important: true,
        completed: false,
    },
    DemoEntry {
        title: "Update team documentation",
        description: "Review and update development workflow documentation",
        due_in_days: Some(7),
        quadrant: Quadrant::Schedule,
        urgent: false,
        important: true,
        completed: false,
    },
    DemoEntry {
        title: "Schedule vendor meetings",
        description: "Coordinate meetings with all software vendors for contract renewal",
        due_in_days: Some(1),
        quadrant: Quadrant::Delegate,
        urgent: true,
        important: false,
        completed: false,
    },
    DemoEntry {
        title: "Order office supplies",
        description: "Printer paper, pens, and other office essentials are running low",
        due_in_days: Some(0),
        quadrant: Quadrant::Delegate,
        urgent: true,
        important: false,
        completed: false,
    },
    DemoEntry {
        title: "Watch industry webinar",
        description: "Optional webinar about emerging technology trends",
        due_in_days: Some(30),
        quadrant: Quadrant::Delete,
        urgent: false,
        important: false,
        completed: false,
    },
    DemoEntry {
        title: "Organize desk drawer",
        description: "Clean and organize personal workspace",
        due_in_days: None,
        quadrant: Quadrant::Delete,
        urgent: false,
        important: false,
        completed: true,
    },
];

/// Builds the demo task set with due dates relative to the clock's
/// current UTC day.
#[must_use]
pub fn demo_tasks(clock: &impl Clock) -> Vec<Task> {
    let now = clock.utc();
    let today = now.date_naive();
    DEMO_ENTRIES
        .iter()
        .map(|entry| {
            Task::from_persisted(PersistedTaskData {
                id: TaskId::new(),
                title: entry.title.to_owned(),
                description: Some(entry.description.to_owned()),
                due_date: entry.due_in_days.and_then(|days| offset(today, days)),
                urgent: entry.urgent,
                important: entry.important,
                quadrant: entry.quadrant,
                completed: entry.completed,
                completed_at: entry.completed.then_some(now),
                created_at: now,
                updated_at: now,
            })
        })
        .collect()
}

fn offset(today: NaiveDate, days: u64) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(days))
}
