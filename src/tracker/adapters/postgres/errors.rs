//! Mapping of Diesel failures onto repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::tracker::ports::RepositoryError;

pub(super) const PROJECT_NAME_UNIQUE: &str = "projects_owner_name_unique";
pub(super) const TASK_NUMBER_UNIQUE: &str = "tasks_project_nr_unique";
pub(super) const TAG_NAME_UNIQUE: &str = "tags_project_name_unique";
pub(super) const TAG_PROJECT_FOREIGN_KEY: &str = "tags_project_id_fkey";

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// Returns `true` when `err` violates the named unique constraint.
pub(super) fn violates_unique(err: &DieselError, constraint: &str) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(constraint)
    )
}

/// Returns `true` when `err` violates the named foreign key.
pub(super) fn violates_foreign_key(err: &DieselError, constraint: &str) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info)
            if info.constraint_name() == Some(constraint)
    )
}
