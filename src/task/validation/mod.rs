//! Field validation for task input.
//!
//! The rules in [`rules`] are applied identically by the task store, the
//! optimistic sync board and the in-memory task API, so a payload accepted
//! by one is accepted by all of them.

pub mod rules;

pub use rules::{
    parse_due_date, validate_create, validate_description, validate_title, validate_update,
};

/// Limits applied by the validation rules.
///
/// # Examples
///
/// ```
/// use eisenhower::task::validation::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.max_title_chars, 100);
/// assert_eq!(config.max_description_chars, 2000);
///
/// let strict = ValidationConfig::strict();
/// assert_eq!(strict.max_description_chars, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum trimmed title length in characters.
    pub max_title_chars: usize,
    /// Maximum trimmed description length in characters.
    pub max_description_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_title_chars: 100,
            max_description_chars: 2000,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration with the shorter description limit used by
    /// plain-text clients.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_title_chars: 100,
            max_description_chars: 500,
        }
    }
}
