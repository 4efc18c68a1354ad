//! Port contracts for task persistence and remote synchronisation.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod api;
pub mod repository;

pub use api::{TaskApi, TaskApiError, TaskApiResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
