//! Validated text values: project and tag names, task titles and descriptions.

use super::{Field, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length, in characters, of names and titles.
pub const MAX_NAME_CHARS: u64 = 255;

/// Maximum size, in bytes, of a task description.
pub const MAX_DESCRIPTION_BYTES: u64 = 4_294_967_295;

/// Trims `raw` and checks it is non-blank and within `MAX_NAME_CHARS`.
fn required_line(raw: String, field: Field) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    let actual = u64::try_from(trimmed.chars().count()).unwrap_or(u64::MAX);
    if actual > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_CHARS,
            actual,
        });
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Name of a project, unique per owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] or [`ValidationError::TooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        required_line(value.into(), Field::Name).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a tag, unique within its project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagName(String);

impl TagName {
    /// Creates a validated tag name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] or [`ValidationError::TooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        required_line(value.into(), Field::Name).map(Self)
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Title of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] or [`ValidationError::TooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        required_line(value.into(), Field::Title).map(Self)
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form task description; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated task description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TooLong`] when the text exceeds
    /// [`MAX_DESCRIPTION_BYTES`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let actual = u64::try_from(raw.len()).unwrap_or(u64::MAX);
        if actual > MAX_DESCRIPTION_BYTES {
            return Err(ValidationError::TooLong {
                field: Field::Description,
                max: MAX_DESCRIPTION_BYTES,
                actual,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the description is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
