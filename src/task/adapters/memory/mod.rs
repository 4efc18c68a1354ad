//! In-memory adapters for tests and ephemeral sessions.

mod api;
mod repository;

pub use api::InMemoryTaskApi;
pub use repository::InMemoryTaskRepository;
