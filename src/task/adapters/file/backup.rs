//! Timestamped backups of the JSON task file.
//!
//! Backups are plain copies named `<key>_backup_<YYYYMMDD_HHMMSS>.json`
//! inside [`BACKUP_DIR`]. Names that collide within one second get a `-N`
//! suffix.

use super::repository::{JsonFileTaskRepository, decode};
use crate::task::{domain::Task, ports::TaskRepositoryError};
use chrono::{Days, NaiveDateTime};
use mockable::Clock;
use std::io::ErrorKind;
use thiserror::Error;
use tracing::{info, warn};

/// Subdirectory of the data directory holding backups.
pub const BACKUP_DIR: &str = "backups";

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors raised by backup operations.
#[derive(Debug, Clone, Error)]
pub enum BackupError {
    /// There is no task file to copy.
    #[error("no task file exists to back up")]
    NothingToBackUp,
    /// The name does not denote a backup of this repository.
    #[error("unknown backup: {0}")]
    UnknownBackup(String),
    /// Reading or writing failed, or the backup does not hold a valid
    /// collection.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Snapshot of what the repository keeps on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    /// Name of the task file.
    pub file_name: String,
    /// Size of the task file; `None` when it does not exist.
    pub file_size_bytes: Option<u64>,
    /// Number of backups of this repository.
    pub backup_count: usize,
}

impl JsonFileTaskRepository {
    /// Copies the task file into [`BACKUP_DIR`] and returns the backup name.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::NothingToBackUp`] when no task file exists, or
    /// [`BackupError::Repository`] when copying fails.
    pub async fn create_backup(&self, clock: &impl Clock) -> Result<String, BackupError> {
        let stamp = clock.utc().format(STAMP_FORMAT).to_string();
        let name = self
            .run_blocking(move |repository| repository.copy_to_backup(&stamp))
            .await?;
        info!(backup = %name, "created task backup");
        Ok(name)
    }

    /// Lists this repository's backups, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Repository`] when the backup directory cannot
    /// be read.
    pub async fn list_backups(&self) -> Result<Vec<String>, BackupError> {
        self.run_blocking(Self::backup_names).await
    }

    /// Replaces the task file with the backup called `name` and returns the
    /// restored collection.
    ///
    /// The current task file, if any, is backed up first. Callers holding a
    /// store over this repository should reload it afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::UnknownBackup`] when `name` is not one of this
    /// repository's backups, and [`BackupError::Repository`] when the backup
    /// is corrupt or cannot be written back.
    pub async fn restore_backup(
        &self,
        name: &str,
        clock: &impl Clock,
    ) -> Result<Vec<Task>, BackupError> {
        if self.backup_key(name).is_none() {
            return Err(BackupError::UnknownBackup(name.to_owned()));
        }
        let stamp = clock.utc().format(STAMP_FORMAT).to_string();
        let backup = name.to_owned();
        let tasks = self
            .run_blocking(move |repository| repository.restore_from(&backup, &stamp))
            .await?;
        info!(backup = %name, count = tasks.len(), "restored tasks from backup");
        Ok(tasks)
    }

    /// Deletes backups stamped more than `retention_days` days before now
    /// and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Repository`] when listing or deleting fails.
    pub async fn prune_backups(
        &self,
        retention_days: u32,
        clock: &impl Clock,
    ) -> Result<usize, BackupError> {
        let cutoff = clock
            .utc()
            .naive_utc()
            .checked_sub_days(Days::new(u64::from(retention_days)))
            .unwrap_or(NaiveDateTime::MIN);
        let removed = self
            .run_blocking(move |repository| repository.remove_backups_before(cutoff))
            .await?;
        if removed > 0 {
            info!(removed, "pruned old task backups");
        }
        Ok(removed)
    }

    /// Describes the task file and its backups.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Repository`] when the directory cannot be
    /// inspected.
    pub async fn storage_info(&self) -> Result<StorageInfo, BackupError> {
        self.run_blocking(Self::describe).await
    }

    fn backup_prefix(&self) -> String {
        format!("{}_backup_", self.storage_key)
    }

    /// Parses a backup name into its timestamp and collision counter.
    fn backup_key(&self, name: &str) -> Option<(NaiveDateTime, u32)> {
        let rest = name
            .strip_prefix(self.backup_prefix().as_str())?
            .strip_suffix(".json")?;
        let (stamp, attempt) = rest.split_once('-').map_or(Some((rest, 1)), |(stamp, attempt)| {
            attempt.parse().ok().map(|counter| (stamp, counter))
        })?;
        let at = NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()?;
        Some((at, attempt))
    }

    fn copy_to_backup(&self, stamp: &str) -> Result<String, BackupError> {
        let contents = match self.dir.read(self.file_name()) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(BackupError::NothingToBackUp);
            }
            Err(err) => return Err(TaskRepositoryError::persistence(err).into()),
        };
        self.dir
            .create_dir_all(BACKUP_DIR)
            .map_err(TaskRepositoryError::persistence)?;
        let name = self.unused_backup_name(stamp);
        self.dir
            .write(backup_path(&name), contents)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(name)
    }

    fn unused_backup_name(&self, stamp: &str) -> String {
        let prefix = self.backup_prefix();
        let first = format!("{prefix}{stamp}.json");
        if !self.dir.exists(backup_path(&first)) {
            return first;
        }
        (2..=u32::MAX)
            .map(|attempt| format!("{prefix}{stamp}-{attempt}.json"))
            .find(|name| !self.dir.exists(backup_path(name)))
            .unwrap_or(first)
    }

    fn backup_names(&self) -> Result<Vec<String>, BackupError> {
        let entries = match self.dir.read_dir(BACKUP_DIR) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(TaskRepositoryError::persistence(err).into()),
        };
        let mut keyed = Vec::new();
        for item in entries {
            let entry = item.map_err(TaskRepositoryError::persistence)?;
            let name = entry.file_name().map_err(TaskRepositoryError::persistence)?;
            let is_file = entry
                .file_type()
                .map_err(TaskRepositoryError::persistence)?
                .is_file();
            if let Some(key) = self.backup_key(&name)
                && is_file
            {
                keyed.push((key, name));
            }
        }
        keyed.sort();
        Ok(keyed.into_iter().map(|(_, name)| name).collect())
    }

    fn restore_from(&self, name: &str, stamp: &str) -> Result<Vec<Task>, BackupError> {
        let contents = match self.dir.read_to_string(backup_path(name)) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(BackupError::UnknownBackup(name.to_owned()));
            }
            Err(err) => return Err(TaskRepositoryError::persistence(err).into()),
        };
        let tasks = decode(name, &contents)?;
        if self.dir.exists(self.file_name())
            && let Err(err) = self.copy_to_backup(stamp)
        {
            warn!(error = %err, "could not back up current tasks before restoring");
        }
        self.write_data(contents.as_bytes())?;
        Ok(tasks)
    }

    fn remove_backups_before(&self, cutoff: NaiveDateTime) -> Result<usize, BackupError> {
        let stale: Vec<String> = self
            .backup_names()?
            .into_iter()
            .filter(|name| self.backup_key(name).is_some_and(|(at, _)| at < cutoff))
            .collect();
        for name in &stale {
            self.dir
                .remove_file(backup_path(name))
                .map_err(TaskRepositoryError::persistence)?;
        }
        Ok(stale.len())
    }

    fn describe(&self) -> Result<StorageInfo, BackupError> {
        let file_size_bytes = match self.dir.metadata(self.file_name()) {
            Ok(metadata) => Some(metadata.len()),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => return Err(TaskRepositoryError::persistence(err).into()),
        };
        Ok(StorageInfo {
            file_name: self.file_name().to_owned(),
            file_size_bytes,
            backup_count: self.backup_names()?.len(),
        })
    }
}

fn backup_path(name: &str) -> String {
    format!("{BACKUP_DIR}/{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::domain::{CreateTaskInput, demo_tasks};
    use crate::task::ports::TaskRepository;
    use crate::task::tests::FixedClock;
    use crate::task::validation::{ValidationConfig, validate_create};
    use camino::Utf8PathBuf;
    use chrono::Duration;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Harness {
        _temp: TempDir,
        root: Utf8PathBuf,
        repository: JsonFileTaskRepository,
        clock: FixedClock,
    }

    #[fixture]
    fn harness() -> Harness {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("UTF-8 temp path");
        let repository = JsonFileTaskRepository::open(&root, "inbox").expect("open repository");
        Harness {
            _temp: temp,
            root,
            repository,
            clock: FixedClock::default(),
        }
    }

    fn task(title: &str, clock: &FixedClock) -> Task {
        let new_task = validate_create(&CreateTaskInput::new(title), &ValidationConfig::default())
            .expect("valid input");
        Task::create(new_task, clock)
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn backup_without_task_file_is_refused(harness: Harness) {
        let result = harness.repository.create_backup(&harness.clock).await;
        assert!(matches!(result, Err(BackupError::NothingToBackUp)), "{result:?}");
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn backups_are_timestamped_and_listed_oldest_first(harness: Harness) {
        let Harness {
            repository, clock, ..
        } = &harness;
        repository.save(&[task("First", clock)]).await.expect("save");

        let first = repository.create_backup(clock).await.expect("backup");
        let same_second = repository.create_backup(clock).await.expect("backup");
        clock.advance(Duration::hours(1));
        let later = repository.create_backup(clock).await.expect("backup");

        assert_eq!(first, "inbox_backup_20260315_120000.json");
        assert_eq!(same_second, "inbox_backup_20260315_120000-2.json");
        assert_eq!(later, "inbox_backup_20260315_130000.json");
        assert_eq!(
            repository.list_backups().await.expect("list"),
            vec![first, same_second, later]
        );
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn listing_ignores_other_keys_and_stray_files(harness: Harness) {
        let other = JsonFileTaskRepository::open(&harness.root, "work").expect("open repository");
        other.save(&[task("Elsewhere", &harness.clock)]).await.expect("save");
        other.create_backup(&harness.clock).await.expect("backup");
        std::fs::write(harness.root.join(BACKUP_DIR).join("notes.txt"), "hello")
            .expect("write stray file");

        assert!(harness.repository.list_backups().await.expect("list").is_empty());
        assert_eq!(other.list_backups().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn restore_brings_back_the_saved_collection(harness: Harness) {
        let Harness {
            repository, clock, ..
        } = &harness;
        let original = demo_tasks(clock);
        repository.save(&original).await.expect("save");
        let backup = repository.create_backup(clock).await.expect("backup");
        clock.advance(Duration::minutes(5));
        repository.save(&[task("Replacement", clock)]).await.expect("save");

        let restored = repository
            .restore_backup(&backup, clock)
            .await
            .expect("restore");

        assert_eq!(restored, original);
        assert_eq!(repository.load().await.expect("load"), original);
        let backups = repository.list_backups().await.expect("list");
        assert_eq!(backups.len(), 2, "current data should be kept: {backups:?}");
    }

    #[rstest]
    #[case::other_key("work_backup_20260315_120000.json")]
    #[case::traversal("inbox_backup_../../etc.json")]
    #[case::missing("inbox_backup_20200101_000000.json")]
    #[tokio::test(flavor = "multi_thread")]
    async fn restore_rejects_unknown_names(harness: Harness, #[case] name: &str) {
        let result = harness.repository.restore_backup(name, &harness.clock).await;
        assert!(
            matches!(&result, Err(BackupError::UnknownBackup(unknown)) if unknown == name),
            "{result:?}"
        );
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn corrupt_backup_leaves_task_file_alone(harness: Harness) {
        let Harness {
            root,
            repository,
            clock,
            ..
        } = &harness;
        let current = vec![task("Keep me", clock)];
        repository.save(&current).await.expect("save");
        let backup = repository.create_backup(clock).await.expect("backup");
        std::fs::write(root.join(BACKUP_DIR).join(&backup), "[{\"id\": 1}]")
            .expect("corrupt backup");

        let result = repository.restore_backup(&backup, clock).await;

        assert!(
            matches!(result, Err(BackupError::Repository(TaskRepositoryError::Corrupt(_)))),
            "{result:?}"
        );
        assert_eq!(repository.load().await.expect("load"), current);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn prune_removes_only_expired_backups(harness: Harness) {
        let Harness {
            repository, clock, ..
        } = &harness;
        repository.save(&[task("Aging", clock)]).await.expect("save");
        repository.create_backup(clock).await.expect("backup");
        clock.advance(Duration::days(20));
        let recent = repository.create_backup(clock).await.expect("backup");
        clock.advance(Duration::days(15));

        let removed = repository.prune_backups(30, clock).await.expect("prune");

        assert_eq!(removed, 1);
        assert_eq!(repository.list_backups().await.expect("list"), vec![recent]);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn storage_info_reports_file_and_backups(harness: Harness) {
        let Harness {
            repository, clock, ..
        } = &harness;
        let empty = repository.storage_info().await.expect("info");
        assert_eq!(
            empty,
            StorageInfo {
                file_name: "inbox.json".to_owned(),
                file_size_bytes: None,
                backup_count: 0,
            }
        );

        repository.save(&[task("Measured", clock)]).await.expect("save");
        repository.create_backup(clock).await.expect("backup");
        let info = repository.storage_info().await.expect("info");

        assert!(info.file_size_bytes.is_some_and(|size| size > 0));
        assert_eq!(info.backup_count, 1);
    }
}
