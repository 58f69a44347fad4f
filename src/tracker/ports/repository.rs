//! Repository ports for projects, tasks and tags.
//!
//! Each mutating method is one atomic unit: an implementation either applies
//! every change it describes or none of them.

use crate::tracker::domain::{
    NewTask, Project, ProjectId, ProjectName, Tag, TagId, TagName, Task, TaskDetails, TaskId,
    TaskNumber, TaskQuery, TaskRevision, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateProjectName`] when the owner already
    /// has a project with the same name.
    async fn store(&self, project: &Project) -> RepositoryResult<()>;

    /// Persists a renamed project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectNotFound`] when the project does not
    /// exist or [`RepositoryError::DuplicateProjectName`] when another project
    /// of the owner already uses the name.
    async fn update(&self, project: &Project) -> RepositoryResult<()>;

    /// Deletes a project together with its tasks, tags and task-tag links.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectNotFound`] when the project does not
    /// exist.
    async fn delete(&self, id: ProjectId) -> RepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;

    /// Returns the projects of `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: UserId) -> RepositoryResult<Vec<Project>>;
}

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Numbers and stores a new task, linking its requested tags.
    ///
    /// The number is the project's previous maximum plus one, allocated
    /// atomically with the insert; numbers of deleted tasks are not reused.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectNotFound`],
    /// [`RepositoryError::TagNotInProject`] when a requested tag belongs to
    /// another project, or [`RepositoryError::TaskNumberConflict`] when a
    /// concurrent creation claimed the same number. The caller may retry
    /// the whole creation on a conflict.
    async fn create(&self, task: &NewTask) -> RepositoryResult<TaskDetails>;

    /// Applies `revision` to the stored task, stamped at `updated_at`.
    ///
    /// Fields the revision leaves as `None` keep the values stored at the
    /// time of the write, not the ones the caller last read. Tag membership
    /// is only checked, and links only synchronised, when a tag set is given.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] or
    /// [`RepositoryError::TagNotInProject`]; in both cases nothing changes.
    async fn update(
        &self,
        id: TaskId,
        revision: &TaskRevision,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<TaskDetails>;

    /// Deletes a task and its tag links.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Lists the tasks of a project matching `query`, in query order, with
    /// their tags loaded.
    async fn list(
        &self,
        project_id: ProjectId,
        query: &TaskQuery,
    ) -> RepositoryResult<Vec<TaskDetails>>;
}

/// Tag persistence contract.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Stores a new tag.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectNotFound`] or
    /// [`RepositoryError::DuplicateTagName`].
    async fn store(&self, tag: &Tag) -> RepositoryResult<()>;

    /// Persists a renamed tag. Task links are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TagNotFound`] or
    /// [`RepositoryError::DuplicateTagName`].
    async fn update(&self, tag: &Tag) -> RepositoryResult<()>;

    /// Deletes a tag and unlinks it from every task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TagNotFound`] when the tag does not exist.
    async fn delete(&self, id: TagId) -> RepositoryResult<()>;

    /// Finds a tag by identifier.
    async fn find_by_id(&self, id: TagId) -> RepositoryResult<Option<Tag>>;

    /// Returns the tags of a project ordered by name.
    async fn list_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Tag>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The tag does not exist.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),

    /// The owner already has a project with this name.
    #[error("owner {owner_id} already has a project named '{name}'")]
    DuplicateProjectName {
        /// Project owner.
        owner_id: UserId,
        /// Conflicting name.
        name: ProjectName,
    },

    /// The project already has a tag with this name.
    #[error("project {project_id} already has a tag named '{name}'")]
    DuplicateTagName {
        /// Owning project.
        project_id: ProjectId,
        /// Conflicting name.
        name: TagName,
    },

    /// A requested tag does not belong to the task's project.
    #[error("tag {tag_id} not found in project {project_id}")]
    TagNotInProject {
        /// Task's project.
        project_id: ProjectId,
        /// Offending tag.
        tag_id: TagId,
    },

    /// Another creation claimed the same task number first.
    #[error("task number {number} is already taken in project {project_id}")]
    TaskNumberConflict {
        /// Project being written.
        project_id: ProjectId,
        /// Contested number.
        number: TaskNumber,
    },

    /// The project has used every representable task number.
    #[error("task numbers are exhausted in project {0}")]
    TaskNumbersExhausted(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
