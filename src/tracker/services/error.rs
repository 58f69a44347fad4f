//! Service-level error type.

use crate::tracker::{
    domain::{ProjectId, ValidationError},
    policy::{AccessDenied, Action, Actor},
    ports::RepositoryError,
};
use thiserror::Error;
use tracing::debug;

/// Errors returned by tracker services.
#[derive(Debug, Clone, Error)]
pub enum TrackerServiceError {
    /// Input failed validation; the caller can correct it and resubmit.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The actor may not perform the operation, or the target does not exist.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Task number allocation kept colliding with concurrent creations.
    #[error("task number allocation in project {project_id} kept conflicting, try again")]
    Conflict {
        /// Project whose numbering was contended.
        project_id: ProjectId,
    },

    /// Persistence failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Result type for tracker service operations.
pub type TrackerServiceResult<T> = Result<T, TrackerServiceError>;

impl From<RepositoryError> for TrackerServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateProjectName { name, .. } => Self::Validation(
                ValidationError::DuplicateProjectName(name.as_str().to_owned()),
            ),
            RepositoryError::DuplicateTagName { name, .. } => {
                Self::Validation(ValidationError::DuplicateTagName(name.as_str().to_owned()))
            }
            RepositoryError::TagNotInProject { tag_id, .. } => {
                Self::Validation(ValidationError::TagNotInProject(tag_id))
            }
            RepositoryError::TaskNumbersExhausted(_) => {
                Self::Validation(ValidationError::TaskNumbersExhausted)
            }
            RepositoryError::TaskNumberConflict { project_id, .. } => {
                Self::Conflict { project_id }
            }
            other => Self::Repository(other),
        }
    }
}

impl TrackerServiceError {
    /// Builds the denial reported when a target entity does not exist.
    pub(super) fn missing(actor: Actor, action: Action) -> Self {
        debug!(%actor, ?action, missing = true, "access denied");
        Self::AccessDenied(AccessDenied { actor, action })
    }

    /// Converts a repository error raised while acting for `actor`.
    ///
    /// Entities vanishing between lookup and mutation are reported like any
    /// other missing target.
    pub(super) fn from_repository(actor: Actor, action: Action, err: RepositoryError) -> Self {
        match err {
            RepositoryError::ProjectNotFound(_)
            | RepositoryError::TaskNotFound(_)
            | RepositoryError::TagNotFound(_) => Self::missing(actor, action),
            other => Self::from(other),
        }
    }
}
