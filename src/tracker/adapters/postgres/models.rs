//! Diesel row models and row-to-domain conversions.

use super::schema::{projects, tag_task, tags, tasks};
use crate::tracker::{
    domain::{
        NewTask, PersistedProjectData, PersistedTagData, PersistedTaskData, Project, ProjectId,
        ProjectName, Status, StatusId, Tag, TagId, TagName, Task, TaskDescription, TaskId,
        TaskNumber, TaskTitle, UserId,
    },
    ports::{RepositoryError, RepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::collections::BTreeSet;

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Highest task number allocated so far.
    pub last_task_nr: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for projects. The task counter starts at its column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for NewProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            owner_id: project.owner_id().into_inner(),
            name: project.name().as_str().to_owned(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// Query result and insert row for tags.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TagRow {
    /// Tag identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Tag name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Tag> for TagRow {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().into_inner(),
            project_id: tag.project_id().into_inner(),
            name: tag.name().as_str().to_owned(),
            created_at: tag.created_at(),
            updated_at: tag.updated_at(),
        }
    }
}

/// Query result and insert row for tasks.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Per-project number.
    pub nr: i32,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status reference.
    pub status_id: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Builds the row for a draft that has just been numbered.
    #[must_use]
    pub fn numbered(task: &NewTask, number: TaskNumber) -> Self {
        Self {
            id: task.id().into_inner(),
            project_id: task.project_id().into_inner(),
            nr: i32::from(number),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            status_id: task.status().id().value(),
            created_at: task.created_at(),
            updated_at: task.created_at(),
        }
    }
}

/// Insert model for task-tag links.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = tag_task)]
pub struct TagTaskRow {
    /// Linked tag.
    pub tag_id: uuid::Uuid,
    /// Linked task.
    pub task_id: uuid::Uuid,
}

pub(super) fn row_to_project(row: ProjectRow) -> RepositoryResult<Project> {
    let name = ProjectName::new(row.name).map_err(RepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn row_to_tag(row: TagRow) -> RepositoryResult<Tag> {
    let name = TagName::new(row.name).map_err(RepositoryError::persistence)?;
    Ok(Tag::from_persisted(PersistedTagData {
        id: TagId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

pub(super) fn row_to_task(row: TaskRow, tag_ids: BTreeSet<TagId>) -> RepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        nr,
        title: persisted_title,
        description: persisted_description,
        status_id,
        created_at,
        updated_at,
    } = row;

    let number = TaskNumber::try_from(nr).map_err(RepositoryError::persistence)?;
    let title = TaskTitle::new(persisted_title).map_err(RepositoryError::persistence)?;
    let description =
        TaskDescription::new(persisted_description).map_err(RepositoryError::persistence)?;
    let status =
        Status::try_from(StatusId::new(status_id)).map_err(RepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        number,
        title,
        description,
        status,
        tag_ids,
        created_at,
        updated_at,
    }))
}
