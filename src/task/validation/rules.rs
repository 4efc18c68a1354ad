//! Individual validation rule implementations.
//!
//! Each rule is a pure function that checks one field and returns the
//! normalised value on success. The same rules run on create and update.

use super::ValidationConfig;
use crate::task::domain::{
    CreateTaskInput, NewTask, TaskChanges, UpdateTaskInput, ValidationError,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Validates a title and returns it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] when nothing is left after
/// trimming, or [`ValidationError::TitleTooLong`] when the trimmed title
/// exceeds `config.max_title_chars`.
pub fn validate_title(raw: &str, config: &ValidationConfig) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let actual = trimmed.chars().count();
    if actual > config.max_title_chars {
        return Err(ValidationError::TitleTooLong {
            max: config.max_title_chars,
            actual,
        });
    }
    Ok(trimmed.to_owned())
}

/// Validates a description and returns it trimmed, or `None` when blank.
///
/// Over-long descriptions are rejected rather than truncated.
///
/// # Errors
///
/// Returns [`ValidationError::DescriptionTooLong`] when the trimmed text
/// exceeds `config.max_description_chars`.
pub fn validate_description(
    raw: &str,
    config: &ValidationConfig,
) -> Result<Option<String>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let actual = trimmed.chars().count();
    if actual > config.max_description_chars {
        return Err(ValidationError::DescriptionTooLong {
            max: config.max_description_chars,
            actual,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Parses a due date into a calendar day.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; a timestamp is reduced to
/// its UTC calendar day. Blank input means "no due date".
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDueDate`] when the input is neither
/// form.
///
/// # Examples
///
/// ```
/// use eisenhower::task::validation::rules::parse_due_date;
/// use chrono::NaiveDate;
///
/// let parsed = parse_due_date("2026-03-14T22:30:00Z").expect("valid timestamp");
/// assert_eq!(parsed, NaiveDate::from_ymd_opt(2026, 3, 14));
/// assert_eq!(parse_due_date("  ").expect("blank is allowed"), None);
/// assert!(parse_due_date("next tuesday").is_err());
/// ```
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| Some(timestamp.with_timezone(&Utc).date_naive()))
        .map_err(|_| ValidationError::InvalidDueDate(raw.to_owned()))
}

/// Validates every field of a creation request.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered; nothing is produced
/// unless every field is valid.
pub fn validate_create(
    input: &CreateTaskInput,
    config: &ValidationConfig,
) -> Result<NewTask, ValidationError> {
    let title = validate_title(input.title(), config)?;
    let description = match input.description() {
        Some(raw) => validate_description(raw, config)?,
        None => None,
    };
    let due_date = match input.due_date() {
        Some(raw) => parse_due_date(raw)?,
        None => None,
    };

    Ok(NewTask {
        title,
        description,
        due_date,
        urgent: input.urgent(),
        important: input.important(),
    })
}

/// Validates every supplied field of an edit.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered; no partial change set
/// is produced.
pub fn validate_update(
    input: &UpdateTaskInput,
    config: &ValidationConfig,
) -> Result<TaskChanges, ValidationError> {
    let title = input
        .title()
        .map(|raw| validate_title(raw, config))
        .transpose()?;
    let description = match input.description() {
        Some(Some(raw)) => Some(validate_description(raw, config)?),
        Some(None) => Some(None),
        None => None,
    };
    let due_date = match input.due_date() {
        Some(Some(raw)) => Some(parse_due_date(raw)?),
        Some(None) => Some(None),
        None => None,
    };

    Ok(TaskChanges {
        title,
        description,
        due_date,
        urgent: input.urgent(),
        important: input.important(),
        completed: input.completed(),
    })
}
