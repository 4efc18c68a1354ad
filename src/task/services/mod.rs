//! Application services that own a task collection.
//!
//! [`TaskStore`] is the local source of truth backed by a repository.
//! [`TaskSyncBoard`] mirrors a remote task service with optimistic updates.

mod store;
mod sync;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
pub use sync::{PendingSync, SyncError, SyncOperation, SyncState, TaskSyncBoard};
