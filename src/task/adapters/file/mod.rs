//! JSON file adapter for task persistence.
//!
//! Behaves like a local key-value store: the whole collection lives under a
//! single key, written as one JSON array to `<key>.json` inside a
//! capability-scoped directory. Timestamped copies of that file can be kept
//! under `backups/` and restored later.

mod backup;
mod repository;

pub use backup::{BACKUP_DIR, BackupError, StorageInfo};
pub use repository::{DEFAULT_STORAGE_KEY, JsonFileTaskRepository};
