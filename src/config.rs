//! Runtime configuration for task persistence and validation.
//!
//! Values come from `EISENHOWER_*` environment variables; anything unset
//! falls back to [`StoreConfig::default`].

use crate::task::adapters::file::DEFAULT_STORAGE_KEY;
use crate::task::validation::ValidationConfig;
use camino::Utf8PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the storage key.
pub const STORAGE_KEY_ENV: &str = "EISENHOWER_STORAGE_KEY";
/// Environment variable naming the JSON data directory.
pub const DATA_DIR_ENV: &str = "EISENHOWER_DATA_DIR";
/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_ENV: &str = "EISENHOWER_DATABASE_URL";
/// Environment variable overriding the title length limit.
pub const MAX_TITLE_CHARS_ENV: &str = "EISENHOWER_MAX_TITLE_CHARS";
/// Environment variable overriding the description length limit.
pub const MAX_DESCRIPTION_CHARS_ENV: &str = "EISENHOWER_MAX_DESCRIPTION_CHARS";
/// Environment variable setting how many days backups are kept.
pub const BACKUP_RETENTION_DAYS_ENV: &str = "EISENHOWER_BACKUP_RETENTION_DAYS";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BACKUP_RETENTION_DAYS: u32 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable that must hold a positive integer did not.
    #[error("{name} must be a positive integer (got '{value}')")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
    /// A variable was set but blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Where tasks are stored and which limits apply to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the JSON repository stores the collection under.
    pub storage_key: String,
    /// Directory holding the JSON file.
    pub data_dir: Utf8PathBuf,
    /// `PostgreSQL` URL; when set, a database repository is preferred.
    pub database_url: Option<String>,
    /// Validation limits.
    pub validation: ValidationConfig,
    /// Age in days after which JSON backups are pruned.
    pub backup_retention_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            database_url: None,
            validation: ValidationConfig::default(),
            backup_retention_days: DEFAULT_BACKUP_RETENTION_DAYS,
        }
    }
}

impl StoreConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    ///
    /// # Examples
    ///
    /// ```
    /// use eisenhower::config::StoreConfig;
    ///
    /// let config = StoreConfig::from_lookup(|name| match name {
    ///     "EISENHOWER_MAX_TITLE_CHARS" => Some("80".to_owned()),
    ///     _ => None,
    /// })
    /// .expect("valid configuration");
    /// assert_eq!(config.validation.max_title_chars, 80);
    /// assert_eq!(config.storage_key, "eisenhower-tasks");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let storage_key = match lookup(STORAGE_KEY_ENV) {
            Some(raw) => non_empty(STORAGE_KEY_ENV, &raw)?,
            None => defaults.storage_key,
        };
        let data_dir = match lookup(DATA_DIR_ENV) {
            Some(raw) => Utf8PathBuf::from(non_empty(DATA_DIR_ENV, &raw)?),
            None => defaults.data_dir,
        };
        let database_url = lookup(DATABASE_URL_ENV)
            .map(|raw| raw.trim().to_owned())
            .filter(|url| !url.is_empty());
        let max_title_chars = lookup(MAX_TITLE_CHARS_ENV)
            .map(|raw| positive(MAX_TITLE_CHARS_ENV, &raw))
            .transpose()?
            .unwrap_or(defaults.validation.max_title_chars);
        let max_description_chars = lookup(MAX_DESCRIPTION_CHARS_ENV)
            .map(|raw| positive(MAX_DESCRIPTION_CHARS_ENV, &raw))
            .transpose()?
            .unwrap_or(defaults.validation.max_description_chars);
        let backup_retention_days = lookup(BACKUP_RETENTION_DAYS_ENV)
            .map(|raw| positive(BACKUP_RETENTION_DAYS_ENV, &raw))
            .transpose()?
            .unwrap_or(defaults.backup_retention_days);

        Ok(Self {
            storage_key,
            data_dir,
            database_url,
            validation: ValidationConfig {
                max_title_chars,
                max_description_chars,
            },
            backup_retention_days,
        })
    }
}

fn non_empty(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(name));
    }
    Ok(trimmed.to_owned())
}

fn positive<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: raw.to_owned(),
        }),
    }
}
