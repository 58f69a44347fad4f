//! Validation errors for tracker domain values.

use super::{StatusId, TagId};
use std::fmt;
use thiserror::Error;

/// Input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Project or tag name.
    Name,
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Task status reference.
    Status,
    /// Requested tag identifiers.
    Tags,
    /// Per-project task number.
    Number,
}

impl Field {
    /// Returns the field name as reported to callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status_id",
            Self::Tags => "tag_ids",
            Self::Number => "nr",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned while validating tracker input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    Blank {
        /// Offending field.
        field: Field,
    },

    /// A text field exceeds its length limit.
    #[error("{field} is {actual} long, the limit is {max}")]
    TooLong {
        /// Offending field.
        field: Field,
        /// Maximum permitted length.
        max: u64,
        /// Observed length.
        actual: u64,
    },

    /// The status identifier does not name a known status.
    #[error("unknown status id {0}")]
    UnknownStatus(StatusId),

    /// A requested tag does not belong to the task's project.
    #[error("tag {0} not found in project")]
    TagNotInProject(TagId),

    /// The owner already has a project with this name.
    #[error("a project named '{0}' already exists")]
    DuplicateProjectName(String),

    /// The project already has a tag with this name.
    #[error("a tag named '{0}' already exists in this project")]
    DuplicateTagName(String),

    /// The project has used every representable task number.
    #[error("task numbers are exhausted for this project")]
    TaskNumbersExhausted,

    /// A task number outside the persisted range was supplied.
    #[error("invalid task number {0}, expected a positive integer")]
    InvalidTaskNumber(i64),
}

impl ValidationError {
    /// Returns the input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } => *field,
            Self::UnknownStatus(_) => Field::Status,
            Self::TagNotInProject(_) => Field::Tags,
            Self::DuplicateProjectName(_) | Self::DuplicateTagName(_) => Field::Name,
            Self::TaskNumbersExhausted | Self::InvalidTaskNumber(_) => Field::Number,
        }
    }
}
