//! Task aggregate and its creation/revision payloads.

use super::{ProjectId, Status, Tag, TagId, TaskDescription, TaskId, TaskNumber, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A task that has been validated but not yet numbered or stored.
///
/// The store assigns the [`TaskNumber`] atomically with the insert and turns
/// the draft into a [`Task`] via [`NewTask::into_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: TaskDescription,
    status: Status,
    tag_ids: BTreeSet<TagId>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a draft task with the default status and no tags.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: TaskDescription,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            title,
            description,
            status: Status::default(),
            tag_ids: BTreeSet::new(),
            created_at: clock.utc(),
        }
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial tag set.
    #[must_use]
    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }

    /// Returns the identifier the task will be stored under.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the requested tag set.
    #[must_use]
    pub const fn tag_ids(&self) -> &BTreeSet<TagId> {
        &self.tag_ids
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completes the draft with the number allocated by the store.
    #[must_use]
    pub fn into_task(self, number: TaskNumber) -> Task {
        Task {
            id: self.id,
            project_id: self.project_id,
            number,
            title: self.title,
            description: self.description,
            status: self.status,
            tag_ids: self.tag_ids,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Unit of work inside a project, numbered sequentially per project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    number: TaskNumber,
    title: TaskTitle,
    description: TaskDescription,
    status: Status,
    tag_ids: BTreeSet<TagId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted per-project number.
    pub number: TaskNumber,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted status.
    pub status: Status,
    /// Persisted tag links.
    pub tag_ids: BTreeSet<TagId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Replacement values applied by [`Task::revise`].
///
/// `None` for `status` or `tag_ids` keeps the current value; `Some` replaces
/// it wholesale (an empty tag set clears every tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRevision {
    /// New title.
    pub title: TaskTitle,
    /// New description.
    pub description: TaskDescription,
    /// New status, if changing.
    pub status: Option<Status>,
    /// New tag set, if changing.
    pub tag_ids: Option<BTreeSet<TagId>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            number: data.number,
            title: data.title,
            description: data.description,
            status: data.status,
            tag_ids: data.tag_ids,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the per-project task number.
    #[must_use]
    pub const fn number(&self) -> TaskNumber {
        self.number
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the identifiers of the linked tags.
    #[must_use]
    pub const fn tag_ids(&self) -> &BTreeSet<TagId> {
        &self.tag_ids
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a revision stamped at `updated_at`. The number and project
    /// never change.
    pub fn revise(&mut self, revision: TaskRevision, updated_at: DateTime<Utc>) {
        let TaskRevision {
            title,
            description,
            status,
            tag_ids,
        } = revision;
        self.title = title;
        self.description = description;
        if let Some(new_status) = status {
            self.status = new_status;
        }
        if let Some(new_tags) = tag_ids {
            self.tag_ids = new_tags;
        }
        self.updated_at = updated_at;
    }

    /// Drops the link to a deleted tag. Returns `true` when a link existed.
    ///
    /// The modification timestamp is left alone: the task itself was not
    /// edited.
    pub fn unlink_tag(&mut self, tag_id: TagId) -> bool {
        self.tag_ids.remove(&tag_id)
    }
}

/// A task together with its eagerly loaded tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    task: Task,
    tags: Vec<Tag>,
}

impl TaskDetails {
    /// Pairs a task with its loaded tags, ordered by tag name.
    #[must_use]
    pub fn new(task: Task, mut tags: Vec<Tag>) -> Self {
        tags.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Self { task, tags }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the task's tags.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the task's status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.task.status()
    }

    /// Splits into the task and its tags.
    #[must_use]
    pub fn into_parts(self) -> (Task, Vec<Tag>) {
        (self.task, self.tags)
    }
}
