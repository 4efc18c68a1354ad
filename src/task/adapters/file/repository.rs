//! The JSON file repository.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::task::{
    adapters::integrity::find_inconsistency,
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "eisenhower-tasks";

/// Task repository backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileTaskRepository {
    pub(super) dir: Arc<Dir>,
    pub(super) storage_key: String,
    file_name: String,
    temp_name: String,
}

impl JsonFileTaskRepository {
    /// Opens a repository storing `<storage_key>.json` in an already opened
    /// directory.
    #[must_use]
    pub fn new(dir: Dir, storage_key: &str) -> Self {
        Self {
            dir: Arc::new(dir),
            storage_key: storage_key.to_owned(),
            file_name: format!("{storage_key}.json"),
            temp_name: format!(".{storage_key}.json.tmp"),
        }
    }

    /// Opens (creating if needed) `path` and stores tasks under
    /// `storage_key` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(path: &Utf8Path, storage_key: &str) -> TaskRepositoryResult<Self> {
        std::fs::create_dir_all(path).map_err(TaskRepositoryError::persistence)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(dir, storage_key))
    }

    /// Returns the name of the file holding the collection.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Runs filesystem work off the async executor.
    pub(super) async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskRepositoryError> + Send + 'static,
    {
        let repository = self.clone();
        tokio::task::spawn_blocking(move || f(&repository))
            .await
            .map_err(|err| E::from(TaskRepositoryError::persistence(err)))?
    }

    fn read_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(TaskRepositoryError::persistence(err)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        decode(&self.file_name, &contents)
    }

    /// Replaces the task file with `contents` through a temporary file, so
    /// readers never see a partial write.
    pub(super) fn write_data(&self, contents: &[u8]) -> TaskRepositoryResult<()> {
        self.dir
            .write(&self.temp_name, contents)
            .map_err(TaskRepositoryError::persistence)?;
        self.dir
            .rename(&self.temp_name, &self.dir, &self.file_name)
            .map_err(TaskRepositoryError::persistence)
    }

    fn remove_data(&self) -> TaskRepositoryResult<()> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TaskRepositoryError::persistence(err)),
        }
    }
}

/// Parses a stored collection read from `source` and checks its invariants.
pub(super) fn decode(source: &str, contents: &str) -> TaskRepositoryResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(contents)
        .map_err(|err| TaskRepositoryError::Corrupt(format!("{source}: {err}")))?;
    find_inconsistency(&tasks).map_or(Ok(tasks), |problem| {
        Err(TaskRepositoryError::Corrupt(format!("{source}: {problem}")))
    })
}

#[async_trait]
impl TaskRepository for JsonFileTaskRepository {
    async fn load(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(Self::read_tasks).await
    }

    async fn save(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let encoded = serde_json::to_vec_pretty(tasks).map_err(TaskRepositoryError::persistence)?;
        self.run_blocking(move |repository| repository.write_data(&encoded))
            .await
    }

    async fn clear(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(Self::remove_data).await
    }
}
