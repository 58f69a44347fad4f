//! [`TaskRepository`] for the `PostgreSQL` store.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{
    PostgresTrackerStore,
    errors::{TASK_NUMBER_UNIQUE, violates_unique},
    models::{TagRow, TagTaskRow, TaskRow, row_to_tag, row_to_task},
    schema::{projects, tag_task, tags, tasks},
};
use crate::tracker::{
    adapters::tag_membership_error,
    domain::{
        NewTask, ProjectId, SortDirection, StatusFilter, Tag, TagAssignment, TagId, Task,
        TaskDetails, TaskId, TaskNumber, TaskQuery, TaskRevision, TaskSortField,
        ensure_tags_in_project,
    },
    ports::{RepositoryError, RepositoryResult, TaskRepository},
};

fn raw_ids(tag_ids: &BTreeSet<TagId>) -> Vec<uuid::Uuid> {
    tag_ids.iter().map(|tag_id| tag_id.into_inner()).collect()
}

/// Locks the project row and returns the next task number.
fn next_number(
    connection: &mut PgConnection,
    project_id: ProjectId,
) -> RepositoryResult<TaskNumber> {
    let last = projects::table
        .find(project_id.into_inner())
        .select(projects::last_task_nr)
        .for_update()
        .get_result::<i32>(connection)
        .optional()?
        .ok_or(RepositoryError::ProjectNotFound(project_id))?;
    let previous = if last == 0 {
        None
    } else {
        Some(TaskNumber::try_from(last).map_err(RepositoryError::persistence)?)
    };
    TaskNumber::after(previous).map_err(|_| RepositoryError::TaskNumbersExhausted(project_id))
}

/// Checks that every requested tag belongs to `project_id`, share-locking the
/// matching tag rows until the transaction ends.
fn ensure_project_tags(
    connection: &mut PgConnection,
    project_id: ProjectId,
    requested: &BTreeSet<TagId>,
) -> RepositoryResult<()> {
    if requested.is_empty() {
        return Ok(());
    }
    let found: BTreeSet<TagId> = tags::table
        .filter(tags::project_id.eq(project_id.into_inner()))
        .filter(tags::id.eq_any(raw_ids(requested)))
        .select(tags::id)
        .for_share()
        .load::<uuid::Uuid>(connection)?
        .into_iter()
        .map(TagId::from_uuid)
        .collect();
    ensure_tags_in_project(requested, &found)
        .map_err(|err| tag_membership_error(project_id, err))
}

fn linked_tag_ids(
    connection: &mut PgConnection,
    task_id: TaskId,
) -> RepositoryResult<BTreeSet<TagId>> {
    Ok(tag_task::table
        .filter(tag_task::task_id.eq(task_id.into_inner()))
        .select(tag_task::tag_id)
        .load::<uuid::Uuid>(connection)?
        .into_iter()
        .map(TagId::from_uuid)
        .collect())
}

fn link_tags(
    connection: &mut PgConnection,
    task_id: TaskId,
    tag_ids: &BTreeSet<TagId>,
) -> RepositoryResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows: Vec<TagTaskRow> = tag_ids
        .iter()
        .map(|tag_id| TagTaskRow {
            tag_id: tag_id.into_inner(),
            task_id: task_id.into_inner(),
        })
        .collect();
    diesel::insert_into(tag_task::table)
        .values(&rows)
        .execute(connection)?;
    Ok(())
}

fn unlink_tags(
    connection: &mut PgConnection,
    task_id: TaskId,
    tag_ids: &BTreeSet<TagId>,
) -> RepositoryResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    diesel::delete(
        tag_task::table
            .filter(tag_task::task_id.eq(task_id.into_inner()))
            .filter(tag_task::tag_id.eq_any(raw_ids(tag_ids))),
    )
    .execute(connection)?;
    Ok(())
}

/// Loads the tags of every row in one query and assembles task details,
/// preserving row order.
fn load_details(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> RepositoryResult<Vec<TaskDetails>> {
    let task_ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let links = tag_task::table
        .inner_join(tags::table)
        .filter(tag_task::task_id.eq_any(&task_ids))
        .select((tag_task::task_id, TagRow::as_select()))
        .load::<(uuid::Uuid, TagRow)>(connection)?;

    let mut tags_by_task: HashMap<uuid::Uuid, Vec<Tag>> = HashMap::new();
    for (task_id, tag_row) in links {
        tags_by_task
            .entry(task_id)
            .or_default()
            .push(row_to_tag(tag_row)?);
    }

    rows.into_iter()
        .map(|row| {
            let task_tags = tags_by_task.remove(&row.id).unwrap_or_default();
            let tag_ids = task_tags.iter().map(Tag::id).collect();
            let task = row_to_task(row, tag_ids)?;
            Ok(TaskDetails::new(task, task_tags))
        })
        .collect()
}

fn load_one(connection: &mut PgConnection, row: TaskRow) -> RepositoryResult<TaskDetails> {
    let task_id = TaskId::from_uuid(row.id);
    load_details(connection, vec![row])?
        .pop()
        .ok_or(RepositoryError::TaskNotFound(task_id))
}

fn create_in_transaction(
    connection: &mut PgConnection,
    draft: &NewTask,
) -> RepositoryResult<TaskDetails> {
    let project_id = draft.project_id();
    let number = next_number(connection, project_id)?;
    ensure_project_tags(connection, project_id, draft.tag_ids())?;

    let row = TaskRow::numbered(draft, number);
    diesel::insert_into(tasks::table)
        .values(&row)
        .execute(connection)
        .map_err(|err| {
            if violates_unique(&err, TASK_NUMBER_UNIQUE) {
                RepositoryError::TaskNumberConflict { project_id, number }
            } else {
                RepositoryError::from(err)
            }
        })?;
    diesel::update(projects::table.find(project_id.into_inner()))
        .set(projects::last_task_nr.eq(i32::from(number)))
        .execute(connection)?;
    link_tags(connection, draft.id(), draft.tag_ids())?;
    load_one(connection, row)
}

fn update_in_transaction(
    connection: &mut PgConnection,
    task_id: TaskId,
    revision: &TaskRevision,
    updated_at: DateTime<Utc>,
) -> RepositoryResult<TaskDetails> {
    let project_id = tasks::table
        .find(task_id.into_inner())
        .select(tasks::project_id)
        .for_update()
        .get_result::<uuid::Uuid>(connection)
        .optional()?
        .map(ProjectId::from_uuid)
        .ok_or(RepositoryError::TaskNotFound(task_id))?;

    if let Some(requested) = revision.tag_ids.as_ref() {
        ensure_project_tags(connection, project_id, requested)?;
        let current = linked_tag_ids(connection, task_id)?;
        let assignment = TagAssignment::plan(&current, requested);
        debug!(
            task_id = %task_id,
            linked = assignment.to_link().len(),
            unlinked = assignment.to_unlink().len(),
            "applying tag assignment"
        );
        unlink_tags(connection, task_id, assignment.to_unlink())?;
        link_tags(connection, task_id, assignment.to_link())?;
    }

    // A `None` status leaves the column out of the SET list.
    let row = diesel::update(tasks::table.find(task_id.into_inner()))
        .set((
            tasks::title.eq(revision.title.as_str()),
            tasks::description.eq(revision.description.as_str()),
            revision
                .status
                .map(|status| tasks::status_id.eq(status.id().value())),
            tasks::updated_at.eq(updated_at),
        ))
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(connection)?;
    load_one(connection, row)
}

#[async_trait]
impl TaskRepository for PostgresTrackerStore {
    async fn create(&self, task: &NewTask) -> RepositoryResult<TaskDetails> {
        let draft = task.clone();
        self.with_connection(move |connection| {
            connection
                .transaction::<_, RepositoryError, _>(|tx| create_in_transaction(tx, &draft))
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        revision: &TaskRevision,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<TaskDetails> {
        let revised = revision.clone();
        self.with_connection(move |connection| {
            connection.transaction::<_, RepositoryError, _>(|tx| {
                update_in_transaction(tx, id, &revised, updated_at)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<()> {
        self.with_connection(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.with_connection(move |connection| {
            let Some(row) = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?
            else {
                return Ok(None);
            };
            let tag_ids = linked_tag_ids(connection, id)?;
            row_to_task(row, tag_ids).map(Some)
        })
        .await
    }

    async fn list(
        &self,
        project_id: ProjectId,
        query: &TaskQuery,
    ) -> RepositoryResult<Vec<TaskDetails>> {
        let status_ids: Option<Vec<i16>> = match query.filter() {
            StatusFilter::Any => None,
            StatusFilter::Only(statuses) => {
                Some(statuses.iter().map(|status| status.id().value()).collect())
            }
        };
        let order = query.order();
        self.with_connection(move |connection| {
            let mut statement = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(ids) = status_ids {
                statement = statement.filter(tasks::status_id.eq_any(ids));
            }
            statement = match (order.field(), order.direction()) {
                (TaskSortField::Number, SortDirection::Ascending) => {
                    statement.order_by(tasks::nr.asc())
                }
                (TaskSortField::Number, SortDirection::Descending) => {
                    statement.order_by(tasks::nr.desc())
                }
                (TaskSortField::Title, SortDirection::Ascending) => {
                    statement.order_by(tasks::title.asc())
                }
                (TaskSortField::Title, SortDirection::Descending) => {
                    statement.order_by(tasks::title.desc())
                }
                (TaskSortField::Status, SortDirection::Ascending) => {
                    statement.order_by(tasks::status_id.asc())
                }
                (TaskSortField::Status, SortDirection::Descending) => {
                    statement.order_by(tasks::status_id.desc())
                }
            };
            let rows = statement
                .then_order_by(tasks::nr.asc())
                .load::<TaskRow>(connection)?;
            load_details(connection, rows)
        })
        .await
    }
}
