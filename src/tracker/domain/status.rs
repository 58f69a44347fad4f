//! Task status enumeration.

use super::{StatusId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// Statuses are global seed data with stable identifiers; the derived
/// ordering follows those identifiers, matching a sort on `status_id`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Work has not started.
    #[default]
    ToDo,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Done,
}

impl Status {
    /// Every status, in identifier order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Returns the stable status identifier.
    #[must_use]
    pub const fn id(self) -> StatusId {
        match self {
            Self::ToDo => StatusId::new(1),
            Self::InProgress => StatusId::new(2),
            Self::Done => StatusId::new(3),
        }
    }

    /// Returns the display name seeded for this status.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ToDo => "To do",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }

    /// Resolves a status from its identifier, if one exists.
    #[must_use]
    pub const fn from_id(id: StatusId) -> Option<Self> {
        match id.value() {
            1 => Some(Self::ToDo),
            2 => Some(Self::InProgress),
            3 => Some(Self::Done),
            _ => None,
        }
    }
}

impl TryFrom<StatusId> for Status {
    type Error = ValidationError;

    fn try_from(id: StatusId) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(ValidationError::UnknownStatus(id))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
