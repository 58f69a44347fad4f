//! Task service: creation with per-project numbering, revision with tag
//! replacement, deletion and filtered listing.

use super::{TrackerServiceError, TrackerServiceResult, check, load_project, retry};
use crate::config::TrackerConfig;
use crate::tracker::{
    domain::{
        NewTask, Project, ProjectId, Status, StatusId, TagId, Task, TaskDescription, TaskDetails,
        TaskId, TaskQuery, TaskRevision, TaskTitle,
    },
    policy::{Action, Actor, Resource},
    ports::{ProjectRepository, TaskRepository},
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Input for [`TaskService::create_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status_id: Option<StatusId>,
    tag_ids: Vec<TagId>,
}

impl CreateTaskRequest {
    /// Creates a request with an empty description, the default status and
    /// no tags.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status_id: None,
            tag_ids: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status_id: StatusId) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Sets the tags to link.
    #[must_use]
    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }
}

/// Input for [`TaskService::update_task`].
///
/// Title and description are always replaced. The status and the tag set are
/// only replaced when set; an explicitly empty tag list clears every tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: String,
    description: String,
    status_id: Option<StatusId>,
    tag_ids: Option<Vec<TagId>>,
}

impl UpdateTaskRequest {
    /// Creates a request that keeps the current status and tags.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status_id: None,
            tag_ids: None,
        }
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status_id: StatusId) -> Self {
        self.status_id = Some(status_id);
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids = Some(tag_ids.into_iter().collect());
        self
    }
}

/// Input for [`TaskService::list_tasks`]. Never rejected: unknown statuses
/// match nothing and unknown order fields fall back to number order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksRequest {
    status_ids: Vec<StatusId>,
    order_by: Option<String>,
    descending: bool,
}

impl ListTasksRequest {
    /// Creates a request for every task in number order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only tasks whose status is among `status_ids`.
    #[must_use]
    pub fn with_statuses(mut self, status_ids: impl IntoIterator<Item = StatusId>) -> Self {
        self.status_ids = status_ids.into_iter().collect();
        self
    }

    /// Orders by the named column (`nr`, `title` or `status_id`).
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = Some(column.into());
        self
    }

    /// Reverses the primary order.
    #[must_use]
    pub const fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    fn to_query(&self) -> TaskQuery {
        TaskQuery::from_request(
            self.status_ids.iter().copied(),
            self.order_by.as_deref(),
            self.descending,
        )
    }
}

fn parse_status(status_id: Option<StatusId>) -> TrackerServiceResult<Option<Status>> {
    Ok(status_id.map(Status::try_from).transpose()?)
}

/// Creates, revises, deletes and lists tasks.
#[derive(Clone)]
pub struct TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    config: TrackerConfig,
}

impl<P, T, C> TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task service with the default configuration.
    #[must_use]
    pub fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            clock,
            config: TrackerConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a task in `project_id` with the next free number.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project, [`TrackerServiceError::Validation`] for an invalid title,
    /// description or status or a tag from another project, and
    /// [`TrackerServiceError::Conflict`] when concurrent creations kept
    /// claiming the number through every configured attempt.
    pub async fn create_task(
        &self,
        actor: Actor,
        project_id: ProjectId,
        request: CreateTaskRequest,
    ) -> TrackerServiceResult<TaskDetails> {
        let project = load_project(&*self.projects, actor, Action::Create, project_id).await?;
        check(actor, Action::Create, Resource::ProjectTasks(&project))?;

        let CreateTaskRequest {
            title,
            description,
            status_id,
            tag_ids,
        } = request;
        let draft = NewTask::new(
            project.id(),
            TaskTitle::new(title)?,
            TaskDescription::new(description)?,
            &*self.clock,
        )
        .with_status(parse_status(status_id)?.unwrap_or_default())
        .with_tags(tag_ids);

        let created = retry::retry_on_number_conflict(&self.config, || self.tasks.create(&draft))
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Create, err))?;
        info!(
            project_id = %project.id(),
            task_id = %created.task().id(),
            number = %created.task().number(),
            tags = created.tags().len(),
            "task created"
        );
        Ok(created)
    }

    /// Revises a task, replacing its tag set when the request carries one.
    ///
    /// A status or tag set left out of the request keeps whatever the store
    /// holds when the update is written.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// task's project, or [`TrackerServiceError::Validation`] for invalid
    /// input; a rejected update changes nothing.
    pub async fn update_task(
        &self,
        actor: Actor,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TrackerServiceResult<TaskDetails> {
        let (task, project) = self.load_task(actor, Action::Update, task_id).await?;
        check(
            actor,
            Action::Update,
            Resource::Task {
                task: &task,
                project: &project,
            },
        )?;

        let UpdateTaskRequest {
            title,
            description,
            status_id,
            tag_ids,
        } = request;
        let revision = TaskRevision {
            title: TaskTitle::new(title)?,
            description: TaskDescription::new(description)?,
            status: parse_status(status_id)?,
            tag_ids: tag_ids.map(|ids| ids.into_iter().collect::<BTreeSet<_>>()),
        };

        let updated = self
            .tasks
            .update(task.id(), &revision, self.clock.utc())
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Update, err))?;
        info!(
            project_id = %project.id(),
            task_id = %task.id(),
            number = %task.number(),
            "task updated"
        );
        Ok(updated)
    }

    /// Deletes a task. Its number is not handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// task's project.
    pub async fn delete_task(&self, actor: Actor, task_id: TaskId) -> TrackerServiceResult<()> {
        let (task, project) = self.load_task(actor, Action::Delete, task_id).await?;
        check(
            actor,
            Action::Delete,
            Resource::Task {
                task: &task,
                project: &project,
            },
        )?;
        self.tasks
            .delete(task.id())
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Delete, err))?;
        info!(
            project_id = %project.id(),
            task_id = %task.id(),
            number = %task.number(),
            "task deleted"
        );
        Ok(())
    }

    /// Lists a project's tasks with their tags and status.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project. The request parameters themselves never cause an error.
    pub async fn list_tasks(
        &self,
        actor: Actor,
        project_id: ProjectId,
        request: &ListTasksRequest,
    ) -> TrackerServiceResult<Vec<TaskDetails>> {
        let project = load_project(&*self.projects, actor, Action::ViewAny, project_id).await?;
        check(actor, Action::ViewAny, Resource::ProjectTasks(&project))?;
        self.tasks
            .list(project.id(), &request.to_query())
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::ViewAny, err))
    }

    async fn load_task(
        &self,
        actor: Actor,
        action: Action,
        task_id: TaskId,
    ) -> TrackerServiceResult<(Task, Project)> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, action, err))?
            .ok_or_else(|| TrackerServiceError::missing(actor, action))?;
        let project = load_project(&*self.projects, actor, action, task.project_id()).await?;
        Ok((task, project))
    }
}
