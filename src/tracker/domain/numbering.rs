//! Per-project sequential task numbers.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive task number, unique within its project.
///
/// Numbers are assigned once when a task is created and never reassigned.
/// They are distinct from the global [`TaskId`](super::TaskId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskNumber(u32);

impl TaskNumber {
    /// Largest number representable in the `INTEGER` storage column.
    const MAX_PERSISTED_VALUE: u32 = i32::MAX as u32;

    /// The number given to the first task of a project.
    pub const FIRST: Self = Self(1);

    /// Creates a validated task number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTaskNumber`] when the value is zero or
    /// exceeds `i32::MAX`.
    pub const fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(ValidationError::InvalidTaskNumber(value as i64));
        }
        Ok(Self(value))
    }

    /// Allocates the number following `previous`, the highest number the
    /// project has ever assigned (`None` for a project without tasks).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TaskNumbersExhausted`] when `previous` is
    /// already the largest persistable number.
    pub const fn after(previous: Option<Self>) -> Result<Self, ValidationError> {
        let Some(Self(current)) = previous else {
            return Ok(Self::FIRST);
        };
        if current >= Self::MAX_PERSISTED_VALUE {
            return Err(ValidationError::TaskNumbersExhausted);
        }
        Ok(Self(current + 1))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i32> for TaskNumber {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let unsigned =
            u32::try_from(value).map_err(|_| ValidationError::InvalidTaskNumber(value.into()))?;
        Self::new(unsigned)
    }
}

impl From<TaskNumber> for i32 {
    fn from(number: TaskNumber) -> Self {
        // Construction caps the value at i32::MAX.
        Self::try_from(number.0).unwrap_or(Self::MAX)
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
