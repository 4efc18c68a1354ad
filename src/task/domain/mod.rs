//! Domain model for the Eisenhower task matrix.
//!
//! The domain owns the task aggregate, its quadrant/flag transition rules,
//! and the input payloads accepted by the store, while keeping persistence
//! and presentation outside of the domain boundary.

mod demo;
mod error;
mod ids;
mod input;
mod quadrant;
mod task;

pub use demo::demo_tasks;
pub use error::{ParseQuadrantError, ValidationError};
pub use ids::{SyncId, TaskId};
pub use input::{CreateTaskInput, NewTask, TaskChanges, UpdateTaskInput};
pub use quadrant::Quadrant;
pub use task::{PersistedTaskData, Task};
