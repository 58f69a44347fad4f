//! Project management service.

use super::{TrackerServiceError, TrackerServiceResult, check, load_project};
use crate::tracker::{
    domain::{Project, ProjectId, ProjectName},
    policy::{Action, Actor, Resource},
    ports::ProjectRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Creates, renames, deletes and lists projects.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Validation`] when the name is blank, too
    /// long or already used by another of the actor's projects.
    pub async fn create_project(
        &self,
        actor: Actor,
        name: impl Into<String> + Send,
    ) -> TrackerServiceResult<Project> {
        check(actor, Action::Create, Resource::NewProject)?;
        let project_name = ProjectName::new(name)?;
        let project = Project::new(actor.user_id(), project_name, &*self.clock);
        self.repository
            .store(&project)
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Create, err))?;
        info!(project_id = %project.id(), owner_id = %project.owner_id(), "project created");
        Ok(project)
    }

    /// Renames a project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project, or [`TrackerServiceError::Validation`] for an invalid or
    /// duplicate name.
    pub async fn rename_project(
        &self,
        actor: Actor,
        project_id: ProjectId,
        name: impl Into<String> + Send,
    ) -> TrackerServiceResult<Project> {
        let mut project =
            load_project(&*self.repository, actor, Action::Update, project_id).await?;
        check(actor, Action::Update, Resource::Project(&project))?;
        let project_name = ProjectName::new(name)?;
        project.rename(project_name, &*self.clock);
        self.repository
            .update(&project)
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Update, err))?;
        info!(project_id = %project.id(), "project renamed");
        Ok(project)
    }

    /// Deletes a project with all its tasks and tags.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project.
    pub async fn delete_project(
        &self,
        actor: Actor,
        project_id: ProjectId,
    ) -> TrackerServiceResult<()> {
        let project = load_project(&*self.repository, actor, Action::Delete, project_id).await?;
        check(actor, Action::Delete, Resource::Project(&project))?;
        self.repository
            .delete(project.id())
            .await
            .map_err(|err| TrackerServiceError::from_repository(actor, Action::Delete, err))?;
        info!(project_id = %project.id(), "project deleted");
        Ok(())
    }

    /// Lists the actor's projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::Repository`] when the lookup fails.
    pub async fn list_projects(&self, actor: Actor) -> TrackerServiceResult<Vec<Project>> {
        Ok(self.repository.list_by_owner(actor.user_id()).await?)
    }

    /// Returns one of the actor's projects.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerServiceError::AccessDenied`] unless the actor owns the
    /// project.
    pub async fn get_project(
        &self,
        actor: Actor,
        project_id: ProjectId,
    ) -> TrackerServiceResult<Project> {
        let project = load_project(&*self.repository, actor, Action::View, project_id).await?;
        check(actor, Action::View, Resource::Project(&project))?;
        Ok(project)
    }
}
