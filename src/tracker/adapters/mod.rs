//! Adapter implementations for tracker ports.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use crate::tracker::{
    domain::{ProjectId, ValidationError},
    ports::RepositoryError,
};

/// Lifts a failed tag membership check into the repository error space.
fn tag_membership_error(project_id: ProjectId, err: ValidationError) -> RepositoryError {
    match err {
        ValidationError::TagNotInProject(tag_id) => {
            RepositoryError::TagNotInProject { project_id, tag_id }
        }
        other => RepositoryError::persistence(other),
    }
}
