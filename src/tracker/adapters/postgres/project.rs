//! [`ProjectRepository`] for the `PostgreSQL` store.

use async_trait::async_trait;
use diesel::prelude::*;

use super::{
    PostgresTrackerStore,
    errors::{PROJECT_NAME_UNIQUE, violates_unique},
    models::{NewProjectRow, ProjectRow, row_to_project},
    schema::projects,
};
use crate::tracker::{
    domain::{Project, ProjectId, ProjectName, UserId},
    ports::{ProjectRepository, RepositoryError, RepositoryResult},
};

fn write_error(
    err: diesel::result::Error,
    owner_id: UserId,
    name: &ProjectName,
) -> RepositoryError {
    if violates_unique(&err, PROJECT_NAME_UNIQUE) {
        RepositoryError::DuplicateProjectName {
            owner_id,
            name: name.clone(),
        }
    } else {
        RepositoryError::from(err)
    }
}

#[async_trait]
impl ProjectRepository for PostgresTrackerStore {
    async fn store(&self, project: &Project) -> RepositoryResult<()> {
        let row = NewProjectRow::from(project);
        let owner_id = project.owner_id();
        let name = project.name().clone();
        self.with_connection(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| write_error(err, owner_id, &name))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> RepositoryResult<()> {
        let id = project.id();
        let owner_id = project.owner_id();
        let name = project.name().clone();
        let updated_at = project.updated_at();
        self.with_connection(move |connection| {
            let affected = diesel::update(projects::table.find(id.into_inner()))
                .set((
                    projects::name.eq(name.as_str()),
                    projects::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(|err| write_error(err, owner_id, &name))?;
            if affected == 0 {
                return Err(RepositoryError::ProjectNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> RepositoryResult<()> {
        self.with_connection(move |connection| {
            // Tasks, tags and their links go with the project via cascading keys.
            let affected =
                diesel::delete(projects::table.find(id.into_inner())).execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::ProjectNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        self.with_connection(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> RepositoryResult<Vec<Project>> {
        self.with_connection(move |connection| {
            projects::table
                .filter(projects::owner_id.eq(owner_id.into_inner()))
                .order((projects::created_at.desc(), projects::name.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }
}
