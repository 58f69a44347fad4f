//! [`TagRepository`] for the `PostgreSQL` store.

use async_trait::async_trait;
use diesel::prelude::*;

use super::{
    PostgresTrackerStore,
    errors::{TAG_NAME_UNIQUE, TAG_PROJECT_FOREIGN_KEY, violates_foreign_key, violates_unique},
    models::{TagRow, row_to_tag},
    schema::tags,
};
use crate::tracker::{
    domain::{ProjectId, Tag, TagId, TagName},
    ports::{RepositoryError, RepositoryResult, TagRepository},
};

fn write_error(
    err: diesel::result::Error,
    project_id: ProjectId,
    name: &TagName,
) -> RepositoryError {
    if violates_unique(&err, TAG_NAME_UNIQUE) {
        RepositoryError::DuplicateTagName {
            project_id,
            name: name.clone(),
        }
    } else if violates_foreign_key(&err, TAG_PROJECT_FOREIGN_KEY) {
        RepositoryError::ProjectNotFound(project_id)
    } else {
        RepositoryError::from(err)
    }
}

#[async_trait]
impl TagRepository for PostgresTrackerStore {
    async fn store(&self, tag: &Tag) -> RepositoryResult<()> {
        let row = TagRow::from(tag);
        let project_id = tag.project_id();
        let name = tag.name().clone();
        self.with_connection(move |connection| {
            diesel::insert_into(tags::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| write_error(err, project_id, &name))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, tag: &Tag) -> RepositoryResult<()> {
        let id = tag.id();
        let project_id = tag.project_id();
        let name = tag.name().clone();
        let updated_at = tag.updated_at();
        self.with_connection(move |connection| {
            let affected = diesel::update(tags::table.find(id.into_inner()))
                .set((tags::name.eq(name.as_str()), tags::updated_at.eq(updated_at)))
                .execute(connection)
                .map_err(|err| write_error(err, project_id, &name))?;
            if affected == 0 {
                return Err(RepositoryError::TagNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TagId) -> RepositoryResult<()> {
        self.with_connection(move |connection| {
            let affected = diesel::delete(tags::table.find(id.into_inner())).execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::TagNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>> {
        self.with_connection(move |connection| {
            let row = tags::table
                .find(id.into_inner())
                .select(TagRow::as_select())
                .first::<TagRow>(connection)
                .optional()?;
            row.map(row_to_tag).transpose()
        })
        .await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Tag>> {
        self.with_connection(move |connection| {
            let mut listed = tags::table
                .filter(tags::project_id.eq(project_id.into_inner()))
                .select(TagRow::as_select())
                .load::<TagRow>(connection)?
                .into_iter()
                .map(row_to_tag)
                .collect::<RepositoryResult<Vec<_>>>()?;
            // Byte order of names, independent of the database collation.
            listed.sort_by(|left, right| {
                left.name()
                    .cmp(right.name())
                    .then_with(|| left.id().cmp(&right.id()))
            });
            Ok(listed)
        })
        .await
    }
}
